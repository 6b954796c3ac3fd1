use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handler::{
    convert_handler, health_handler, index_handler, summarize_handler, upload_handler,
    url_handler,
};
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .route("/url", post(url_handler))
        .route("/summarize", post(summarize_handler))
        .route("/convert", post(convert_handler))
        .nest_service("/static", static_files)
        .layer(body_limit)
        .layer(trace_layer)
        .with_state(state)
}
