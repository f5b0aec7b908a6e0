//! Fallback chain orchestration.
//!
//! The chain tries an ordered list of equivalent providers, handling:
//! - Strictly sequential attempts in the order supplied
//! - A deterministic per-attempt timeout
//! - First-success short-circuit
//! - Ordered failure collection for the exhaustion error

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::errors::{AggregateError, ProviderError, ProviderFailure};
use crate::models::{FetchTrace, ProviderId};
use crate::provider::UpstreamProvider;

/// Default per-attempt timeout.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(8);

/// A successful fetch with the upstream that satisfied it.
#[derive(Clone, Debug)]
pub struct Fetched<T> {
    pub payload: T,
    pub provider: ProviderId,
}

/// Ordered chain of equivalent upstream providers.
///
/// The chain is immutable after construction and holds no per-request
/// state, so one instance can serve any number of concurrent requests.
pub struct FallbackChain<R, T> {
    providers: Vec<Arc<dyn UpstreamProvider<R, T>>>,
    attempt_timeout: Duration,
}

impl<R, T> FallbackChain<R, T>
where
    R: Send + Sync,
    T: Send,
{
    /// Create a chain over the given providers, in priority order.
    pub fn new(providers: Vec<Arc<dyn UpstreamProvider<R, T>>>) -> Self {
        Self {
            providers,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Override the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// The registered providers, in attempt order.
    pub fn providers(&self) -> &[Arc<dyn UpstreamProvider<R, T>>] {
        &self.providers
    }

    /// Try providers in order until one succeeds.
    ///
    /// 1. Each attempt runs under the per-attempt timeout.
    /// 2. Any failure (timeout, network, non-2xx, parse, upstream envelope)
    ///    is recorded and the loop moves on; no attempt is retried.
    /// 3. The first success returns immediately with the responding
    ///    provider's identifier.
    /// 4. Exhausting every provider yields the ordered failure list.
    pub async fn fetch(&self, request: &R) -> Result<Fetched<T>, AggregateError> {
        if self.providers.is_empty() {
            warn!("fallback chain invoked with no providers configured");
            return Err(AggregateError::NoProviders);
        }

        let mut failures: Vec<ProviderFailure> = Vec::with_capacity(self.providers.len());
        let mut trace = FetchTrace::new();

        for provider in &self.providers {
            let provider_id: ProviderId = Cow::Borrowed(provider.id());

            let outcome = match tokio::time::timeout(self.attempt_timeout, provider.fetch(request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout),
            };

            match outcome {
                Ok(payload) => {
                    trace.record_success(provider_id.clone());
                    debug!("fetch satisfied: {}", trace.summary());
                    return Ok(Fetched {
                        payload,
                        provider: provider_id,
                    });
                }
                Err(error) => {
                    debug!("provider '{}' failed: {}, trying next", provider_id, error);
                    trace.record_failure(provider_id.clone(), error.clone());
                    failures.push(ProviderFailure {
                        provider: provider_id,
                        error,
                    });
                }
            }
        }

        warn!("all providers failed: {}", trace.summary());
        Err(AggregateError::Exhausted { failures })
    }
}
