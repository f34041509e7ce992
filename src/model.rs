//! Bookmark row and the write-side shapes derived from request bodies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of `bookmark_items`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

/// Validated creation payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

/// Columns a PATCH body may overwrite.
pub const UPDATABLE_FIELDS: [&str; 4] = ["title", "url", "rating", "description"];

/// Shallow field overwrite for one bookmark. Values are kept as raw JSON so the
/// store decides how to bind them; unknown keys never get here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookmarkPatch {
    fields: Vec<(&'static str, Value)>,
}

impl BookmarkPatch {
    /// Keep only recognized, non-null fields of `body`, in column order.
    pub fn from_body(body: &Map<String, Value>) -> Self {
        let fields = UPDATABLE_FIELDS
            .iter()
            .filter_map(|name| match body.get(*name) {
                None | Some(Value::Null) => None,
                Some(v) => Some((*name, v.clone())),
            })
            .collect();
        BookmarkPatch { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}
