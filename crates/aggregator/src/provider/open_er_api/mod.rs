//! open.er-api.com exchange-rate provider.
//!
//! Fetches latest exchange rates from the Open Exchange Rate API
//! (`https://open.er-api.com/v6/latest/{base}`). The endpoint is keyless
//! and serves daily-updated rates for ~160 currencies.
//!
//! Successful responses carry `result: "success"`; upstream-side failures
//! (e.g. an unsupported base code) come back as 2xx with
//! `result: "error"` and an `error-type` field.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{RateRequest, RateSheet};
use crate::provider::UpstreamProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "open.er-api.com";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// API response from open.er-api.com
#[derive(Debug, Deserialize)]
struct OpenErApiResponse {
    /// "success" or "error"
    result: Option<String>,
    /// Machine-readable failure kind when `result` is "error"
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    /// Unix seconds of the last rate refresh
    time_last_update_unix: Option<i64>,
    /// Rates keyed by currency code
    rates: Option<HashMap<String, f64>>,
}

/// open.er-api.com exchange-rate provider.
pub struct OpenErApiProvider {
    client: Client,
}

impl OpenErApiProvider {
    /// Create a new provider with its own HTTP client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn request_url(request: &RateRequest) -> String {
        format!("https://open.er-api.com/v6/latest/{}", request.base())
    }

    fn normalize(base: &str, body: &str) -> Result<RateSheet, ProviderError> {
        let parsed: OpenErApiResponse =
            serde_json::from_str(body).map_err(ProviderError::parse)?;

        if parsed.result.as_deref() == Some("error") {
            return Err(ProviderError::Upstream {
                message: parsed
                    .error_type
                    .unwrap_or_else(|| "upstream reported failure".to_string()),
            });
        }

        Ok(RateSheet::normalized(
            base,
            parsed.rates,
            parsed.time_last_update_unix,
            PROVIDER_ID,
        ))
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamProvider<RateRequest, RateSheet> for OpenErApiProvider {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_substitutes_base() {
        let request = RateRequest::parse("eur").unwrap();
        assert_eq!(
            OpenErApiProvider::request_url(&request),
            "https://open.er-api.com/v6/latest/EUR"
        );
    }

    #[test]
    fn test_normalize_maps_upstream_fields() {
        let body = r#"{"result":"success","time_last_update_unix":1690000000,"base_code":"EUR","rates":{"EUR":0.9,"GBP":0.78}}"#;
        let sheet = OpenErApiProvider::normalize("EUR", body).unwrap();

        assert_eq!(sheet.base, "EUR");
        assert_eq!(sheet.rates.get("EUR"), Some(&0.9));
        assert_eq!(sheet.rates.get("GBP"), Some(&0.78));
        assert_eq!(sheet.timestamp, 1_690_000_000);
        assert_eq!(sheet.provider, "open.er-api.com");
    }

    #[test]
    fn test_normalize_defaults_missing_optional_fields() {
        let sheet = OpenErApiProvider::normalize("USD", r#"{"result":"success"}"#).unwrap();

        assert!(sheet.rates.is_empty());
        assert!(sheet.timestamp > 0);
    }

    #[test]
    fn test_normalize_rejects_error_envelope() {
        let body = r#"{"result":"error","error-type":"unsupported-code"}"#;
        let error = OpenErApiProvider::normalize("XXX", body).unwrap_err();

        assert_eq!(
            error,
            ProviderError::Upstream {
                message: "unsupported-code".to_string()
            }
        );
    }

    #[test]
    fn test_normalize_rejects_non_json_body() {
        let error = OpenErApiProvider::normalize("USD", "not json").unwrap_err();
        assert!(matches!(error, ProviderError::Parse { .. }));
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(OpenErApiProvider::new().id(), "open.er-api.com");
    }
}
