//! ipinfo.io geolocation provider.
//!
//! The token is optional: without one the endpoint still answers with a
//! reduced quota, so the provider is registered either way and the token
//! query parameter is appended only when configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::models::{GeoPayload, GeoRequest};
use crate::provider::UpstreamProvider;

const PROVIDER_ID: &str = "ipinfo.io";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// ipinfo.io geolocation provider.
pub struct IpinfoProvider {
    client: Client,
    token: Option<String>,
}

impl IpinfoProvider {
    /// Create a new provider; `token` may be absent.
    pub fn new(token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, token }
    }

    fn request_url(&self, request: &GeoRequest) -> String {
        let mut url = match request.ip {
            Some(ip) => format!("https://ipinfo.io/{}/json", ip),
            None => "https://ipinfo.io/json".to_string(),
        };
        if let Some(token) = &self.token {
            url.push_str("?token=");
            url.push_str(token);
        }
        url
    }
}

#[async_trait]
impl UpstreamProvider<GeoRequest, GeoPayload> for IpinfoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, request: &GeoRequest) -> Result<GeoPayload, ProviderError> {
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
        serde_json::from_str(&body).map_err(ProviderError::parse)
    }
}
