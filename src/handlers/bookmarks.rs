//! Bookmark handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::response::{bookmark_created, bookmark_list, bookmark_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};

/// Path ids that are not integers can never match a row.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|_| {
        tracing::error!(id = %id_str, "Bookmark with id {} not found.", id_str);
        AppError::bookmark_not_found()
    })
}

/// An empty body reads as `{}`.
fn body_to_map(body: &Bytes) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body)? {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn not_found(id: i64) -> AppError {
    tracing::error!(id, "Bookmark with id {} not found.", id);
    AppError::bookmark_not_found()
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.store.list_all().await?;
    Ok(bookmark_list(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.store.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(bookmark_ok(row))
}

pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(&body)?;
    let new = RequestValidator::validate_new(&body).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;
    let row = state.store.insert(&new).await?;
    tracing::info!(id = row.id, "Bookmark with id {} created", row.id);
    Ok(bookmark_created(uri.path(), row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if state.store.delete_by_id(id).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id, "Bookmark with id {} deleted.", id);
    Ok(StatusCode::NO_CONTENT)
}

/// A missing row answers 404 even when the body names no updatable field.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(&body)?;
    let patch = match RequestValidator::validate_patch(&body) {
        Ok(patch) => patch,
        Err(e) => {
            if state.store.get_by_id(id).await?.is_none() {
                return Err(not_found(id));
            }
            tracing::error!("{}", e);
            return Err(e);
        }
    };
    if state.store.update_by_id(id, &patch).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!(id, "Bookmark with id {} updated.", id);
    Ok(StatusCode::NO_CONTENT)
}
