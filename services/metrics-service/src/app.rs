use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{healthz, readyz, submit_metrics};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // The metrics route takes every method; the handler does its own
    // OPTIONS/POST/other dispatch so non-POST callers still get a body.
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/v1/metrics", any(submit_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
