//! Router assembly.

mod bookmarks;
mod common;

pub use bookmarks::bookmark_routes;
pub use common::common_routes;

use crate::middleware;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Full application: common routes at the root, bookmark routes under `api_prefix`
/// (empty mounts them at the root).
pub fn build_router(state: AppState, api_prefix: &str, max_body_bytes: usize) -> Router {
    let api = bookmark_routes(state.clone());
    let api = if api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    Router::new()
        .merge(common_routes(state))
        .merge(api)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(axum::middleware::from_fn(middleware::request_id))
}
