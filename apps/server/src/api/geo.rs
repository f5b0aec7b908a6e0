use std::net::IpAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use datarelay_aggregator::GeoRequest;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
struct GeoQuery {
    ip: Option<String>,
}

/// Proxy the prioritized geolocation upstreams.
///
/// The responding provider's payload is passed through unmodified. The
/// result describes one caller, so shared caches must not keep it.
async fn get_geolocation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeoQuery>,
) -> ApiResult<Response> {
    let ip = match query.ip.as_deref() {
        Some(raw) => Some(
            raw.trim()
                .parse::<IpAddr>()
                .map_err(|_| ApiError::bad_request("Invalid ip parameter"))?,
        ),
        None => None,
    };

    let fetched = state
        .geo
        .fetch(&GeoRequest { ip })
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch geolocation", e))?;

    Ok((
        [(header::CACHE_CONTROL, "private, no-store")],
        Json(fetched.payload),
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/geo", get(get_geolocation))
}
