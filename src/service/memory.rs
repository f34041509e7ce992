//! In-memory [`BookmarkStore`] for handler tests.

use crate::error::AppError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use crate::service::BookmarkStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<i64, Bookmark>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert rows verbatim, keeping their ids.
    pub fn seed(&self, rows: Vec<Bookmark>) {
        let mut map = self.rows.lock().unwrap();
        let mut next = self.next_id.lock().unwrap();
        for row in rows {
            *next = (*next).max(row.id);
            map.insert(row.id, row);
        }
    }

    /// Raw stored row, bypassing any response shaping.
    pub fn stored(&self, id: i64) -> Option<Bookmark> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    /// Number of gateway calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, AppError> {
        self.touch();
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError> {
        self.touch();
        Ok(self.stored(id))
    }

    async fn insert(&self, bookmark: &NewBookmark) -> Result<Bookmark, AppError> {
        self.touch();
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let row = Bookmark {
            id: *next,
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            description: bookmark.description.clone(),
            rating: bookmark.rating,
        };
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        self.touch();
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }

    async fn update_by_id(&self, id: i64, patch: &BookmarkPatch) -> Result<u64, AppError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(0);
        };
        // The whole statement fails or none of it applies.
        let mut updated = row.clone();
        for (name, v) in patch.fields() {
            match *name {
                "title" => updated.title = as_text(v),
                "url" => updated.url = as_text(v),
                "description" => updated.description = Some(as_text(v)),
                "rating" => updated.rating = as_rating(v)?,
                _ => {}
            }
        }
        *row = updated;
        Ok(1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// `$n::text` of a bound JSON value.
fn as_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `$n::integer` of a bound JSON value, followed by the `rating` CHECK.
fn as_rating(v: &Value) -> Result<i32, AppError> {
    let cast = match v {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::round_ties_even)
                .filter(|f| f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let n = cast
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| storage_error(format!("invalid input for type integer: {}", v)))?;
    if !(0..=5).contains(&n) {
        return Err(storage_error(format!("rating {} violates check constraint", n)));
    }
    Ok(n)
}

fn storage_error(message: String) -> AppError {
    AppError::Db(sqlx::Error::Protocol(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rating_follows_integer_cast() {
        assert_eq!(as_rating(&json!(3)).unwrap(), 3);
        assert_eq!(as_rating(&json!(3.7)).unwrap(), 4);
        assert_eq!(as_rating(&json!(2.5)).unwrap(), 2);
        assert_eq!(as_rating(&json!(" 5 ")).unwrap(), 5);
        assert_eq!(as_rating(&json!(true)).unwrap(), 1);
        for bad in [json!(50), json!(-1), json!("3.5"), json!("x"), json!([1]), json!(1e300)] {
            assert!(matches!(as_rating(&bad), Err(AppError::Db(_))), "{bad}");
        }
    }

    #[tokio::test]
    async fn failed_update_leaves_row_untouched() {
        let store = MemoryStore::new();
        let row = store
            .insert(&NewBookmark {
                title: "t".into(),
                url: "https://test.com".into(),
                description: None,
                rating: 2,
            })
            .await
            .unwrap();
        let body = json!({ "title": "changed", "rating": "high" });
        let patch = BookmarkPatch::from_body(body.as_object().unwrap());
        assert!(store.update_by_id(row.id, &patch).await.is_err());
        assert_eq!(store.stored(row.id), Some(row));
    }
}
