use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use datarelay_aggregator::{
    FallbackChain, GeoPayload, GeoRequest, ProviderError, RateRequest, RateSheet,
    UpstreamProvider,
};
use datarelay_server::api::app_router;
use datarelay_server::main_lib::AppState;
use tower::ServiceExt;

struct StaticRateProvider {
    id: &'static str,
}

#[async_trait]
impl UpstreamProvider<RateRequest, RateSheet> for StaticRateProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch(&self, request: &RateRequest) -> Result<RateSheet, ProviderError> {
        let mut rates = HashMap::new();
        rates.insert("EUR".to_string(), 0.9);
        Ok(RateSheet::normalized(
            request.base(),
            Some(rates),
            Some(1_690_000_000),
            self.id,
        ))
    }
}

struct FailingRateProvider {
    id: &'static str,
    status: u16,
}

#[async_trait]
impl UpstreamProvider<RateRequest, RateSheet> for FailingRateProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch(&self, _request: &RateRequest) -> Result<RateSheet, ProviderError> {
        Err(ProviderError::Status {
            status: self.status,
        })
    }
}

struct StaticGeoProvider {
    id: &'static str,
    payload: GeoPayload,
}

#[async_trait]
impl UpstreamProvider<GeoRequest, GeoPayload> for StaticGeoProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn fetch(&self, _request: &GeoRequest) -> Result<GeoPayload, ProviderError> {
        Ok(self.payload.clone())
    }
}

fn build_test_router(
    rate_providers: Vec<Arc<dyn UpstreamProvider<RateRequest, RateSheet>>>,
    geo_providers: Vec<Arc<dyn UpstreamProvider<GeoRequest, GeoPayload>>>,
) -> axum::Router {
    let state = Arc::new(AppState {
        rates: FallbackChain::new(rate_providers),
        geo: FallbackChain::new(geo_providers),
    });
    app_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn exchange_rates_success_shape_and_cache_header() {
    let app = build_test_router(
        vec![Arc::new(StaticRateProvider {
            id: "rates.example",
        })],
        vec![],
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/exchange-rates?base=eur")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );

    let json = body_json(response).await;
    assert_eq!(json["base"], "EUR");
    assert_eq!(json["rates"]["EUR"], 0.9);
    assert_eq!(json["timestamp"], 1_690_000_000);
    assert_eq!(json["provider"], "rates.example");
    assert!(json.get("details").is_none());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn exchange_rates_exhaustion_returns_500_with_details() {
    let app = build_test_router(
        vec![
            Arc::new(FailingRateProvider {
                id: "P1",
                status: 500,
            }),
            Arc::new(FailingRateProvider {
                id: "P2",
                status: 503,
            }),
        ],
        vec![],
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/exchange-rates")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 500);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to fetch exchange rates");
    assert_eq!(
        json["details"],
        serde_json::json!(["P1: HTTP error! Status: 500", "P2: HTTP error! Status: 503"])
    );
}

#[tokio::test]
async fn exchange_rates_rejects_invalid_base() {
    let app = build_test_router(
        vec![Arc::new(StaticRateProvider {
            id: "rates.example",
        })],
        vec![],
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/exchange-rates?base=DOLLARS")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid base currency code");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn geo_payload_is_passed_through_raw() {
    let payload = serde_json::json!({
        "ip": "203.0.113.9",
        "city": "Example City",
        "org": "AS64500 Example Net",
        "extra": { "nested": true }
    });
    let app = build_test_router(
        vec![],
        vec![Arc::new(StaticGeoProvider {
            id: "geo.example",
            payload: payload.clone(),
        })],
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/geo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "private, no-store"
    );
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn geo_rejects_invalid_ip_parameter() {
    let app = build_test_router(
        vec![],
        vec![Arc::new(StaticGeoProvider {
            id: "geo.example",
            payload: serde_json::json!({}),
        })],
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/geo?ip=not-an-ip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 400);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid ip parameter");
}

#[tokio::test]
async fn geo_with_no_providers_reports_exhaustion_shape() {
    let app = build_test_router(vec![], vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/geo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to fetch geolocation");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_test_router(vec![], vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(body_json(response).await, serde_json::json!({ "status": "ok" }));
}
