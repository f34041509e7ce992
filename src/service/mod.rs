//! Bookmark persistence, validation and output sanitization.

mod crud;
#[cfg(test)]
pub(crate) mod memory;
pub mod sanitize;
mod store;
pub mod validation;
pub use crud::{PgBookmarkStore, BOOKMARKS_TABLE};
pub use sanitize::{sanitize, sanitize_bookmark};
pub use store::BookmarkStore;
pub use validation::{is_web_uri, RequestValidator};
