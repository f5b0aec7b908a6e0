//! api.exchangerate-api.com exchange-rate provider.
//!
//! Keyless v4 endpoint (`https://api.exchangerate-api.com/v4/latest/{base}`).
//! Failures surface as non-2xx statuses rather than an error envelope.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{RateRequest, RateSheet};
use crate::provider::UpstreamProvider;

const PROVIDER_ID: &str = "api.exchangerate-api.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ExchangeRateApiResponse {
    /// Unix seconds of the last rate refresh
    time_last_updated: Option<i64>,
    rates: Option<HashMap<String, f64>>,
}

/// api.exchangerate-api.com exchange-rate provider.
pub struct ExchangeRateApiProvider {
    client: Client,
}

impl ExchangeRateApiProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn request_url(request: &RateRequest) -> String {
        format!(
            "https://api.exchangerate-api.com/v4/latest/{}",
            request.base()
        )
    }

    fn normalize(base: &str, body: &str) -> Result<RateSheet, ProviderError> {
        let parsed: ExchangeRateApiResponse =
            serde_json::from_str(body).map_err(ProviderError::parse)?;

        Ok(RateSheet::normalized(
            base,
            parsed.rates,
            parsed.time_last_updated,
            PROVIDER_ID,
        ))
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamProvider<RateRequest, RateSheet> for ExchangeRateApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, request: &RateRequest) -> Result<RateSheet, ProviderError> {
        let url = Self::request_url(request);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(ProviderError::network)?;
        Self::normalize(request.base(), &body)
    }
}
