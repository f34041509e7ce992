//! Bookmarks API: CRUD over a single PostgreSQL table with validation and
//! output sanitization.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use model::{Bookmark, BookmarkPatch, NewBookmark};
pub use routes::{bookmark_routes, build_router, common_routes};
pub use service::{BookmarkStore, PgBookmarkStore, RequestValidator};
pub use state::AppState;
pub use store::{ensure_bookmarks_table, ensure_database_exists};
