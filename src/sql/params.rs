//! Convert serde_json::Value to values that sqlx can bind.

use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A value that can be bound to a PostgreSQL query. Placeholders carry an
/// explicit cast, so the bound type only has to convert to the column type.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
}

impl PgBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => PgBindValue::Null,
            Value::Bool(b) => PgBindValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PgBindValue::I64(i)
                } else {
                    PgBindValue::F64(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => PgBindValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => PgBindValue::String(v.to_string()),
        }
    }

    pub fn text(s: &str) -> Self {
        PgBindValue::String(s.to_string())
    }

    pub fn opt_text(s: Option<&str>) -> Self {
        s.map(PgBindValue::text).unwrap_or(PgBindValue::Null)
    }
}

/// Bind every param, in order, to an untyped query.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[PgBindValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p.clone() {
            PgBindValue::Null => query.bind(Option::<String>::None),
            PgBindValue::Bool(b) => query.bind(b),
            PgBindValue::I64(n) => query.bind(n),
            PgBindValue::F64(n) => query.bind(n),
            PgBindValue::String(s) => query.bind(s),
        };
    }
    query
}

/// Same as [`bind_all`] for a query mapped through `FromRow`.
pub fn bind_all_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[PgBindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p.clone() {
            PgBindValue::Null => query.bind(Option::<String>::None),
            PgBindValue::Bool(b) => query.bind(b),
            PgBindValue::I64(n) => query.bind(n),
            PgBindValue::F64(n) => query.bind(n),
            PgBindValue::String(s) => query.bind(s),
        };
    }
    query
}
