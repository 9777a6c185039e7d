//! Liveness probe for the simulated service.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health -- crate version and the configured failure rate.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "failure_rate": state.simulator.failure_rate(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
