//! Response construction. Every bookmark leaving the API passes through here,
//! which is where display text gets sanitized.

use crate::model::Bookmark;
use crate::service::sanitize_bookmark;
use axum::{
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    Json,
};

pub fn bookmark_ok(row: Bookmark) -> (StatusCode, Json<Bookmark>) {
    (StatusCode::OK, Json(sanitize_bookmark(row)))
}

pub fn bookmark_list(rows: Vec<Bookmark>) -> (StatusCode, Json<Vec<Bookmark>>) {
    (
        StatusCode::OK,
        Json(rows.into_iter().map(sanitize_bookmark).collect()),
    )
}

/// 201 with `Location: {collection_path}/{id}`.
pub fn bookmark_created(
    collection_path: &str,
    row: Bookmark,
) -> (StatusCode, HeaderMap, Json<Bookmark>) {
    let mut headers = HeaderMap::new();
    let location = format!("{}/{}", collection_path.trim_end_matches('/'), row.id);
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(LOCATION, value);
    }
    (StatusCode::CREATED, headers, Json(sanitize_bookmark(row)))
}
