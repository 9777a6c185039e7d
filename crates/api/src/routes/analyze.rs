use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use vislog_core::analysis::{AnalysisRequest, AnalysisResult};

use crate::state::AppState;

/// POST / -- classify one image reference.
///
/// Responds 200 with either envelope; an empty `image_path` is rejected
/// with 422.
async fn analyze_image(
    State(state): State<AppState>,
    Json(input): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, Json<Value>)> {
    let request = AnalysisRequest::new(input.image_path).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": e.to_string(), "code": "VALIDATION_ERROR"})),
        )
    })?;

    let result = state.simulator.simulate(&mut rand::rng());
    tracing::info!(
        image_path = %request.image_path,
        success = result.success,
        "Simulated analysis"
    );

    Ok(Json(result))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze_image))
}
