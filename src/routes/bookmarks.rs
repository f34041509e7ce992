//! Bookmark collection and item routes, all behind the bearer-token check.

use crate::handlers::bookmarks::{create, delete, list, read, update};
use crate::middleware::require_bearer_token;
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Router};

pub fn bookmark_routes(state: AppState) -> Router {
    Router::new()
        .route("/bookmarks", get(list).post(create))
        .route("/bookmarks/:id", get(read).patch(update).delete(delete))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_token))
        .with_state(state)
}
