use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::main_lib::AppState;

/// Liveness probe.
async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
