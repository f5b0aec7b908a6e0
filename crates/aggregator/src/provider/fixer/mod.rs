//! data.fixer.io exchange-rate provider.
//!
//! Requires an access key passed as a query parameter; the provider should
//! only be registered when the key is configured. Fixer reports its own
//! failures as 2xx responses with `success: false` and an error object.
//!
//! Note: the free plan only serves EUR-based rates; requests for another
//! base come back as a `base_currency_access_restricted` upstream error,
//! which lets the chain fall through to the next provider.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{RateRequest, RateSheet};
use crate::provider::UpstreamProvider;

const PROVIDER_ID: &str = "data.fixer.io";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct FixerResponse {
    success: bool,
    /// Unix seconds of the quoted rates
    timestamp: Option<i64>,
    rates: Option<HashMap<String, f64>>,
    error: Option<FixerErrorBody>,
}

#[derive(Debug, Deserialize)]
struct FixerErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

/// data.fixer.io exchange-rate provider.
pub struct FixerProvider {
    client: Client,
    access_key: String,
}

impl FixerProvider {
    /// Create a new Fixer provider with the given access key.
    pub fn new(access_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, access_key }
    }

    fn request_url(&self, request: &RateRequest) -> String {
        format!(
            "http://data.fixer.io/api/latest?access_key={}&base={}",
            self.access_key,
            request.base()
        )
    }

    fn normalize(base: &str, body: &str) -> Result<RateSheet, ProviderError> {
        let parsed: FixerResponse = serde_json::from_str(body).map_err(ProviderError::parse)?;

        if !parsed.success {
            let message = parsed
                .error
                .and_then(|e| e.info.or(e.kind))
                .unwrap_or_else(|| "upstream reported failure".to_string());
            return Err(ProviderError::Upstream { message });
        }

        Ok(RateSheet::normalized(
            base,
            parsed.rates,
            parsed.timestamp,
            PROVIDER_ID,
        ))
    }
}

#[async_trait]
impl UpstreamProvider<RateRequest, RateSheet> for FixerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, request: &RateRequest) -> Result<RateSheet, ProviderError> {
        let url = self.request_url(request);

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
