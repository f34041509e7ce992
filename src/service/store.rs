//! Persistence gateway for bookmarks.

use crate::error::AppError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use async_trait::async_trait;

/// Single-table access used by the bookmark handlers. Every method is one
/// round trip to the store.
#[async_trait]
pub trait BookmarkStore: Send + Sync + 'static {
    /// All rows. Callers must not rely on the order.
    async fn list_all(&self) -> Result<Vec<Bookmark>, AppError>;

    /// The row with this id, or `None`.
    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Persist a new row and return it with its assigned id.
    async fn insert(&self, bookmark: &NewBookmark) -> Result<Bookmark, AppError>;

    /// Number of rows removed (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError>;

    /// Overwrite only the fields in `patch`. Number of rows changed (0 or 1).
    async fn update_by_id(&self, id: i64, patch: &BookmarkPatch) -> Result<u64, AppError>;

    /// Cheap liveness check backing `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
