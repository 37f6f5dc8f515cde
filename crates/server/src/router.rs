use crate::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/session", post(handlers::create_session_handler))
        .route("/state", get(handlers::state_handler))
        .route("/config", post(handlers::config_handler))
        .route("/key", post(handlers::key_handler))
        .route(
            "/upload",
            post(handlers::upload_handler).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .route("/chat", post(handlers::chat_handler))
        .route("/faqs", get(handlers::faqs_handler))
        .route("/samples", get(handlers::samples_handler))
        .route("/contact", get(handlers::contact_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
