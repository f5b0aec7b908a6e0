//! Attempt tracking for fallback fetch observability.

use crate::errors::ProviderError;
use crate::models::ProviderId;

/// Record of a single provider attempt within one fetch.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    /// `None` means the attempt succeeded.
    pub error: Option<ProviderError>,
}

impl ProviderAttempt {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Ordered log of every attempt made during one fetch.
#[derive(Clone, Debug, Default)]
pub struct FetchTrace {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchTrace {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, provider: ProviderId, error: ProviderError) {
        self.attempts.push(ProviderAttempt {
            provider,
            error: Some(error),
        });
    }

    pub fn record_success(&mut self, provider: ProviderId) {
        self.attempts.push(ProviderAttempt {
            provider,
            error: None,
        });
    }

    /// Whether any attempt succeeded.
    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(ProviderAttempt::succeeded)
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match &a.error {
                None => format!("{}: SUCCESS", a.provider),
                Some(error) => format!("{}: ERROR ({})", a.provider, error),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
