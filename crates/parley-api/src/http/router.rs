//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/`.
//! Middleware: CORS, tracing.
//!
//! The chat frontend is served from the configured web directory
//! (`PARLEY_WEB_DIR`, default `web/`). API routes take priority; unknown
//! paths fall through to the frontend's `index.html`. If the directory
//! does not exist, only the API is served.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats)
                .post(handlers::chat::create_chat)
                .delete(handlers::chat::clear_chats),
        )
        .route(
            "/chats/{chat_id}/messages",
            get(handlers::message::list_messages).post(handlers::message::post_message),
        );

    let web_dir = state.web_dir.clone();

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the chat frontend from disk if the directory exists.
    // API routes and /health take priority; unknown paths fall through
    // to index.html.
    if web_dir.exists() {
        let index_path = web_dir.join("index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir.display(), "Static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
