use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Request context for an exchange-rate fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateRequest {
    base: String,
}

impl RateRequest {
    /// Parse a base currency code.
    ///
    /// Accepts a 3-letter ISO 4217 code, case-insensitive, surrounding
    /// whitespace ignored. Anything else is rejected so the code can be
    /// substituted into provider URLs verbatim.
    pub fn parse(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self {
                base: trimmed.to_ascii_uppercase(),
            })
        } else {
            None
        }
    }

    /// The uppercase base currency code.
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for RateRequest {
    fn default() -> Self {
        Self {
            base: "USD".to_string(),
        }
    }
}

/// Normalized exchange-rate payload served to callers.
///
/// Every provider-specific response shape is reduced to this one; missing
/// optional upstream fields fall back to defaults instead of erroring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateSheet {
    /// The requested base currency code
    pub base: String,

    /// Currency code -> rate against the base
    pub rates: HashMap<String, f64>,

    /// Unix seconds of the upstream's last update; the fetch time when the
    /// upstream omits one
    pub timestamp: i64,

    /// Hostname of the upstream that satisfied the request
    pub provider: String,
}

impl RateSheet {
    /// Build a sheet from optional upstream fields, applying defaults.
    pub fn normalized(
        base: &str,
        rates: Option<HashMap<String, f64>>,
        timestamp: Option<i64>,
        provider: &str,
    ) -> Self {
        Self {
            base: base.to_string(),
            rates: rates.unwrap_or_default(),
            timestamp: timestamp.unwrap_or_else(|| Utc::now().timestamp()),
            provider: provider.to_string(),
        }
    }
}
