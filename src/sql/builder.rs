//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for a fixed table.

use super::params::PgBindValue;

/// Column name and the PostgreSQL type used to cast its placeholder.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub pg_type: &'static str,
}

/// A table addressed by the builder. Identifiers come from code, never from requests.
#[derive(Clone, Debug)]
pub struct TableSpec {
    pub schema: String,
    pub table: String,
    pub pk: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(t: &TableSpec) -> String {
    format!("{}.{}", quoted(&t.schema), quoted(&t.table))
}

fn select_column_list(t: &TableSpec) -> String {
    t.columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Push a value and return its placeholder, cast to the column type.
    fn placeholder(&mut self, col: &ColumnSpec, v: PgBindValue) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, col.pg_type)
    }
}

/// SELECT every row ordered by primary key.
pub fn select_list(t: &TableSpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(t),
        qualified_table(t),
        quoted(t.pk)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(t: &TableSpec, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(t),
        qualified_table(t),
        quoted(t.pk),
        n
    );
    q
}

/// INSERT the given columns, leaving the primary key to its default. Unknown
/// columns are skipped. Returns the stored row.
pub fn insert(t: &TableSpec, values: &[(&str, PgBindValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, v) in values {
        if *name == t.pk {
            continue;
        }
        let Some(c) = t.column(name) else { continue };
        placeholders.push(q.placeholder(c, v.clone()));
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(t),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(t)
    );
    q
}

/// UPDATE by id: SET only the supplied columns. `None` when nothing would be set.
pub fn update(t: &TableSpec, id: i64, values: &[(&str, PgBindValue)]) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, v) in values {
        if *name == t.pk {
            continue;
        }
        let Some(c) = t.column(name) else { continue };
        let rhs = q.placeholder(c, v.clone());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        qualified_table(t),
        sets.join(", "),
        quoted(t.pk),
        id_param
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(t: &TableSpec, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(PgBindValue::I64(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        qualified_table(t),
        quoted(t.pk),
        n
    );
    q
}
