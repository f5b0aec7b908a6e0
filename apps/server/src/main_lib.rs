use std::sync::Arc;

use datarelay_aggregator::{
    ExchangeRateApiProvider, FallbackChain, FixerProvider, GeoPayload, GeoRequest, IpApiProvider,
    IpapiProvider, IpinfoProvider, OpenErApiProvider, RateRequest, RateSheet, UpstreamProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub rates: FallbackChain<RateRequest, RateSheet>,
    pub geo: FallbackChain<GeoRequest, GeoPayload>,
}

pub fn init_tracing() {
    let log_format = std::env::var("DR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Assemble the provider chains from configuration.
///
/// Provider priority is fixed here, keyless upstreams first. Key-requiring
/// providers are registered only when their key is configured; key-optional
/// providers are registered either way.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let mut rate_providers: Vec<Arc<dyn UpstreamProvider<RateRequest, RateSheet>>> = vec![
        Arc::new(OpenErApiProvider::new()),
        Arc::new(ExchangeRateApiProvider::new()),
    ];
    match &config.fixer_access_key {
        Some(key) => rate_providers.push(Arc::new(FixerProvider::new(key.clone()))),
        None => tracing::info!("FIXER_ACCESS_KEY not set, skipping data.fixer.io"),
    }

    let geo_providers: Vec<Arc<dyn UpstreamProvider<GeoRequest, GeoPayload>>> = vec![
        Arc::new(IpapiProvider::new()),
        Arc::new(IpApiProvider::new()),
        Arc::new(IpinfoProvider::new(config.ipinfo_token.clone())),
    ];

    Arc::new(AppState {
        rates: FallbackChain::new(rate_providers).with_attempt_timeout(config.attempt_timeout),
        geo: FallbackChain::new(geo_providers).with_attempt_timeout(config.attempt_timeout),
    })
}
