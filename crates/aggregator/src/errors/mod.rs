//! Error types for the aggregator crate.
//!
//! This module provides:
//! - [`ProviderError`]: the tagged failure of a single upstream attempt
//! - [`ProviderFailure`]: one recorded attempt in the fallback sequence
//! - [`AggregateError`]: the terminal outcome once the chain is exhausted

use thiserror::Error;

use crate::models::ProviderId;

/// Failure of a single upstream attempt.
///
/// Every variant carries enough context to render a human-readable detail
/// line; none of them is retried within one aggregation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The upstream answered with a non-success status code.
    #[error("HTTP error! Status: {status}")]
    Status {
        /// The HTTP status code returned by the upstream
        status: u16,
    },

    /// The attempt exceeded the per-attempt timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure: DNS, connect, TLS, or body transfer.
    #[error("network error: {message}")]
    Network {
        /// Human-readable transport error description
        message: String,
    },

    /// A 2xx body that is not valid JSON, or not the documented shape.
    #[error("invalid JSON payload: {message}")]
    Parse {
        /// What the parser rejected
        message: String,
    },

    /// The upstream returned 2xx valid JSON whose own envelope reports
    /// failure (e.g. an `"success": false` flag).
    #[error("upstream error: {message}")]
    Upstream {
        /// The upstream's own failure description
        message: String,
    },
}

impl ProviderError {
    /// Map a transport error from `reqwest`, classifying timeouts separately.
    pub fn network(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }

    /// Map a JSON deserialization error.
    pub fn parse(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// One recorded failure in the attempt sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    /// The provider that failed
    pub provider: ProviderId,
    /// Why it failed
    pub error: ProviderError,
}

impl ProviderFailure {
    /// The `"<provider>: <message>"` detail line surfaced to callers.
    pub fn detail(&self) -> String {
        format!("{}: {}", self.provider, self.error)
    }
}

/// Terminal outcome of a fallback fetch.
///
/// A provider-level failure is never fatal on its own; only these two
/// outcomes surface past the aggregation boundary.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// The chain holds no providers, so nothing could be attempted.
    #[error("no providers configured")]
    NoProviders,

    /// Every provider in the chain was attempted and failed.
    #[error("all providers failed")]
    Exhausted {
        /// Per-provider failures, in attempt order
        failures: Vec<ProviderFailure>,
    },
}

impl AggregateError {
    /// Ordered per-provider failure messages, one entry per attempt.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::NoProviders => Vec::new(),
            Self::Exhausted { failures } => {
                failures.iter().map(ProviderFailure::detail).collect()
            }
        }
    }
}
