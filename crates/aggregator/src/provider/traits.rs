//! Upstream provider trait definition.

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Trait for redundant upstream data providers.
///
/// Implement this trait to add support for a new upstream. `R` is the
/// request context (e.g. a base currency code), `T` the payload the
/// provider normalizes its response into. Equivalent providers share the
/// same `R` and `T` so a [`FallbackChain`](crate::chain::FallbackChain)
/// can try them interchangeably.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use datarelay_aggregator::{ProviderError, RateRequest, RateSheet, UpstreamProvider};
///
/// struct MyRateProvider;
///
/// #[async_trait]
/// impl UpstreamProvider<RateRequest, RateSheet> for MyRateProvider {
///     fn id(&self) -> &'static str {
///         "rates.example.com"
///     }
///
///     async fn fetch(&self, request: &RateRequest) -> Result<RateSheet, ProviderError> {
///         // one GET, one normalization, no retries
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait UpstreamProvider<R, T>: Send + Sync {
    /// Hostname identifying this upstream, e.g. "open.er-api.com".
    ///
    /// Used as the `provider` field of successful payloads and as the
    /// prefix of failure detail lines.
    fn id(&self) -> &'static str;

    /// Issue exactly one request and normalize the response.
    ///
    /// Implementations never retry and never panic; every failure mode is
    /// reported as a tagged [`ProviderError`].
    async fn fetch(&self, request: &R) -> Result<T, ProviderError>;
}
