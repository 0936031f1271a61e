//! SQL execution for tabsql
//!
//! Runs the rewritten query on the embedded engine and exposes the result as
//! column names plus a forward-only cursor of text rows. The cursor is backed
//! by the live statement: rows are produced as the engine steps, and it can be
//! consumed only once.

use rusqlite::types::ValueRef;
use rusqlite::{Rows, Statement};

use crate::database::Database;
use crate::error::{TabsqlError, TabsqlResult};
use crate::table::Row;

/// A compiled query ready to run
pub struct SqlExecutor<'db> {
    stmt: Statement<'db>,
}

impl<'db> SqlExecutor<'db> {
    /// Compile a query against the database
    ///
    /// # Returns
    /// * `Ok(SqlExecutor)` - The compiled query
    /// * `Err(QuerySyntax)` - If the engine rejects the query
    pub fn prepare(database: &'db Database, query: &str) -> TabsqlResult<Self> {
        let stmt = database.prepare(query)?;
        Ok(SqlExecutor { stmt })
    }

    /// Start executing the query
    pub fn execute(&mut self) -> TabsqlResult<ResultCursor<'_>> {
        let columns: Vec<String> = self
            .stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = self
            .stmt
            .query([])
            .map_err(|e| TabsqlError::QueryRuntime(e.to_string()))?;
        Ok(ResultCursor { columns, rows })
    }
}

/// Column names and a single-pass iterator over result rows
pub struct ResultCursor<'stmt> {
    columns: Vec<String>,
    rows: Rows<'stmt>,
}

impl ResultCursor<'_> {
    /// Names of the result columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for ResultCursor<'_> {
    type Item = TabsqlResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.columns.len();
        match self.rows.next() {
            Ok(Some(row)) => Some(
                (0..width)
                    .map(|i| row.get_ref(i).map(value_to_string))
                    .collect::<rusqlite::Result<Row>>()
                    .map_err(|e| TabsqlError::QueryRuntime(e.to_string())),
            ),
            Ok(None) => None,
            Err(e) => Some(Err(TabsqlError::QueryRuntime(e.to_string()))),
        }
    }
}

/// Convert an engine value to text
///
/// NULL becomes an empty string, text and blobs are decoded as UTF-8 (lossy),
/// numbers use their default textual form. Reals are printed with `f64`'s
/// `Display`, which never uses exponent notation: `1e20` prints as
/// `100000000000000000000` and `1.5e-7` as `0.00000015`.
pub fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
