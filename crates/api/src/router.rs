use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Build the service router with all routes and the request tracing layer.
pub fn build_app_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::analyze::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
