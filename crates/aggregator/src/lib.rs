//! Datarelay Aggregator Crate
//!
//! This crate provides redundant-upstream fetching for the datarelay
//! service: given an ordered list of equivalent third-party HTTP JSON
//! providers, try each in sequence until one answers usefully.
//!
//! # Overview
//!
//! The aggregator supports:
//! - Multiple equivalent providers per data kind, tried in priority order
//! - Normalization of exchange-rate payloads into one stable shape
//! - Raw pass-through for geolocation payloads
//! - Structured exhaustion errors listing every attempt and why it failed
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Request context | --> |  FallbackChain   |  (ordered attempts)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | UpstreamProvider |  (open.er-api.com, ipapi.co, ...)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   Fetched<T>     |  (payload + responding provider)
//!                          +------------------+
//! ```
//!
//! The first provider to return a usable 2xx JSON response wins and no
//! further providers are attempted. Every failed attempt is recorded in
//! order; only exhausting the whole chain is fatal to the request.
//!
//! # Core Types
//!
//! - [`FallbackChain`] - Ordered chain of providers with a per-attempt timeout
//! - [`UpstreamProvider`] - Trait implemented by each upstream
//! - [`RateSheet`] - Normalized exchange-rate payload
//! - [`GeoPayload`] - Raw geolocation payload (pass-through)
//! - [`AggregateError`] - Terminal outcome when every provider failed

pub mod chain;
pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{
    FetchTrace, GeoPayload, GeoRequest, ProviderAttempt, ProviderId, RateRequest, RateSheet,
};

// Re-export error types
pub use errors::{AggregateError, ProviderError, ProviderFailure};

// Re-export chain types
pub use chain::{FallbackChain, Fetched, DEFAULT_ATTEMPT_TIMEOUT};

// Re-export provider types
pub use provider::exchange_rate_api::ExchangeRateApiProvider;
pub use provider::fixer::FixerProvider;
pub use provider::ip_api::IpApiProvider;
pub use provider::ipapi::IpapiProvider;
pub use provider::ipinfo::IpinfoProvider;
pub use provider::open_er_api::OpenErApiProvider;
pub use provider::UpstreamProvider;
