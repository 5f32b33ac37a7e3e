//! Axum router configuration with middleware.
//!
//! Middleware: CORS, tracing. Request/response logging for every endpoint
//! comes from the `TraceLayer`; handlers add their own spans where the
//! payload matters.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Actions
        .route(
            "/api/actions/perform_action",
            post(handlers::action::perform_action),
        )
        // Chat
        .route(
            "/api/chat/get_chat_messages",
            get(handlers::chat::get_chat_messages),
        )
        .route("/api/chat/add_message", post(handlers::chat::add_message))
        // Status
        .route(
            "/api/status/check_availability",
            get(handlers::status::check_availability),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
