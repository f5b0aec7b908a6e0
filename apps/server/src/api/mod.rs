mod geo;
mod health;
mod rates;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

/// Whole-request deadline. Must exceed the per-attempt timeout times the
/// longest chain so exhaustion still produces a structured error body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(rates::router())
        .merge(geo::router())
        .merge(health::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
