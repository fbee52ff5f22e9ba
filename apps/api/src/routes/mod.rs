pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Upload form (server-rendered)
        .route(
            "/",
            get(handlers::handle_form).post(handlers::handle_form_submit),
        )
        // Analysis API
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
