use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use datarelay_aggregator::RateRequest;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// One hour of shared caching; rates are the same for every caller.
const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

#[derive(serde::Deserialize)]
struct RatesQuery {
    base: Option<String>,
}

/// Proxy the prioritized exchange-rate upstreams.
async fn get_exchange_rates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RatesQuery>,
) -> ApiResult<Response> {
    let request = match query.base.as_deref() {
        Some(base) => RateRequest::parse(base)
            .ok_or_else(|| ApiError::bad_request("Invalid base currency code"))?,
        None => RateRequest::default(),
    };

    let fetched = state
        .rates
        .fetch(&request)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch exchange rates", e))?;

    Ok((
        [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
        Json(fetched.payload),
    )
        .into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/exchange-rates", get(get_exchange_rates))
}
