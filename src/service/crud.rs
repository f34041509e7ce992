//! PostgreSQL implementation of [`BookmarkStore`].

use crate::error::AppError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use crate::service::BookmarkStore;
use crate::sql::{self, bind_all, bind_all_as, ColumnSpec, PgBindValue, QueryBuf, TableSpec};
use async_trait::async_trait;
use sqlx::PgPool;

/// Table holding bookmark rows.
pub const BOOKMARKS_TABLE: &str = "bookmark_items";

const BOOKMARK_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { name: "id", pg_type: "bigint" },
    ColumnSpec { name: "title", pg_type: "text" },
    ColumnSpec { name: "url", pg_type: "text" },
    ColumnSpec { name: "description", pg_type: "text" },
    ColumnSpec { name: "rating", pg_type: "integer" },
];

fn bookmarks_table(schema: &str) -> TableSpec {
    TableSpec {
        schema: schema.to_string(),
        table: BOOKMARKS_TABLE.to_string(),
        pk: "id",
        columns: BOOKMARK_COLUMNS,
    }
}

#[derive(Clone)]
pub struct PgBookmarkStore {
    pool: PgPool,
    table: TableSpec,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgBookmarkStore {
            pool,
            table: bookmarks_table(schema),
        }
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Bookmark>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let query = bind_all_as(sqlx::query_as::<_, Bookmark>(&q.sql), &q.params);
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Bookmark>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let query = bind_all_as(sqlx::query_as::<_, Bookmark>(&q.sql), &q.params);
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, AppError> {
        self.fetch_all(&sql::select_list(&self.table)).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, AppError> {
        self.fetch_optional(&sql::select_by_id(&self.table, id)).await
    }

    async fn insert(&self, bookmark: &NewBookmark) -> Result<Bookmark, AppError> {
        let q = sql::insert(
            &self.table,
            &[
                ("title", PgBindValue::text(&bookmark.title)),
                ("url", PgBindValue::text(&bookmark.url)),
                ("description", PgBindValue::opt_text(bookmark.description.as_deref())),
                ("rating", PgBindValue::I64(bookmark.rating.into())),
            ],
        );
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, AppError> {
        self.execute(&sql::delete(&self.table, id)).await
    }

    async fn update_by_id(&self, id: i64, patch: &BookmarkPatch) -> Result<u64, AppError> {
        let values: Vec<(&str, PgBindValue)> = patch
            .fields()
            .iter()
            .map(|(name, v)| (*name, PgBindValue::from_json(v)))
            .collect();
        match sql::update(&self.table, id, &values) {
            Some(q) => self.execute(&q).await,
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
