//! Data model for the aggregator crate.

mod attempt;
mod geo;
mod rates;
mod types;

pub use attempt::{FetchTrace, ProviderAttempt};
pub use geo::{GeoPayload, GeoRequest};
pub use rates::{RateRequest, RateSheet};
pub use types::ProviderId;
