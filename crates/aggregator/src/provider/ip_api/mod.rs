//! ip-api.com geolocation provider. Keyless; free tier is HTTP-only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::models::{GeoPayload, GeoRequest};
use crate::provider::UpstreamProvider;

const PROVIDER_ID: &str = "ip-api.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// ip-api.com geolocation provider.
pub struct IpApiProvider {
    client: Client,
}

impl IpApiProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    fn request_url(request: &GeoRequest) -> String {
        match request.ip {
            Some(ip) => format!("http://ip-api.com/json/{}", ip),
            None => "http://ip-api.com/json".to_string(),
        }
    }
}

impl Default for IpApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamProvider<GeoRequest, GeoPayload> for IpApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, request: &GeoRequest) -> Result<GeoPayload, ProviderError> {
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
        serde_json::from_str(&body).map_err(ProviderError::parse)
    }
}
