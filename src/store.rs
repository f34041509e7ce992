//! Database bootstrap: create the database and the bookmarks table if missing.

use crate::error::AppError;
use crate::service::BOOKMARKS_TABLE;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the schema and `bookmark_items` if they do not exist. Idempotent.
pub async fn ensure_bookmarks_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let schema_q = quote_ident(schema);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema_q))
        .execute(pool)
        .await?;

    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.{} (
            id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            description TEXT,
            rating INTEGER NOT NULL CHECK (rating >= 0 AND rating <= 5)
        )
        "#,
        schema_q,
        quote_ident(BOOKMARKS_TABLE)
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(schema, table = BOOKMARKS_TABLE, "bookmarks table ready");
    Ok(())
}

/// Connect to the `postgres` admin database and create the target database if missing.
/// No-op when the URL already points at `postgres`.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres?opts`, `db`).
/// The database name is the first path segment after the authority; query
/// options never take part in the split.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let (without_query, query) = match url.split_once('?') {
        Some((head, q)) => (head, format!("?{}", q)),
        None => (url, String::new()),
    };
    let authority_start = without_query
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: missing scheme".into()))?;
    let (base, path) = match without_query[authority_start..].find('/') {
        Some(i) => without_query.split_at(authority_start + i),
        None => (without_query, ""),
    };
    let db_name = path.trim_start_matches('/').split('/').next().unwrap_or("").trim();
    Ok((format!("{}/postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
