//! Shared application state for all routes.

use crate::service::BookmarkStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    /// Bearer token checked by the auth middleware.
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>, api_token: impl Into<Arc<str>>) -> Self {
        AppState {
            store,
            api_token: api_token.into(),
        }
    }
}
