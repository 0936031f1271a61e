//! Database module for tabsql
//!
//! This module wraps the embedded SQLite engine behind the few operations the
//! pipeline needs: create a table of text columns, insert rows with bound
//! parameters, and prepare an arbitrary query. The store lives in memory and
//! disappears when the [`Database`] is dropped, on success and error paths
//! alike.

use std::collections::HashMap;

use rusqlite::{params_from_iter, Connection, Statement, Transaction};
use tracing::debug;

use crate::error::{TabsqlError, TabsqlResult};
use crate::table::{quote_identifier, Row};

/// Ephemeral in-memory store for one invocation
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a fresh in-memory store
    pub fn open() -> TabsqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database { conn })
    }

    /// Create a table whose columns are all `text`
    ///
    /// # Arguments
    /// * `identifier` - Already-quoted table identifier
    /// * `columns` - Column names, quoted here
    pub fn create_table(&self, identifier: &str, columns: &[String]) -> TabsqlResult<()> {
        let definitions: Vec<String> = columns
            .iter()
            .map(|c| format!("{} text", quote_identifier(c)))
            .collect();
        let sql = format!("CREATE TABLE {identifier} ( {} )", definitions.join(", "));
        debug!("{sql}");

        self.conn
            .execute(&sql, [])
            .map_err(|e| TabsqlError::CreateTable {
                table: identifier.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Start a bulk insert into a table
    ///
    /// All inserts made through the returned [`Inserter`] share one
    /// transaction, committed by [`Inserter::commit`].
    pub fn inserter(&mut self, identifier: &str, columns: &[String]) -> TabsqlResult<Inserter<'_>> {
        let tx = self.conn.transaction()?;
        Ok(Inserter {
            tx,
            table: identifier.to_string(),
            column_list: columns
                .iter()
                .map(|c| quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", "),
            statements: HashMap::new(),
        })
    }

    /// Compile a query
    ///
    /// # Returns
    /// * `Ok(Statement)` - The compiled statement, not yet run
    /// * `Err(QuerySyntax)` - If the engine rejects the query text
    pub fn prepare(&self, query: &str) -> TabsqlResult<Statement<'_>> {
        self.conn.prepare(query).map_err(|e| TabsqlError::QuerySyntax {
            query: query.to_string(),
            message: e.to_string(),
        })
    }
}

/// Inserts rows into one table with parameterized statements
pub struct Inserter<'conn> {
    tx: Transaction<'conn>,
    table: String,
    column_list: String,
    /// INSERT text by number of values
    statements: HashMap<usize, String>,
}

impl Inserter<'_> {
    /// Insert one row, binding every value as a parameter
    ///
    /// The statement lists every table column but has one placeholder per
    /// value, so a row of the wrong length is rejected by the engine.
    pub fn insert(&mut self, row: &Row) -> rusqlite::Result<()> {
        let (table, column_list) = (&self.table, &self.column_list);
        let sql = self.statements.entry(row.len()).or_insert_with(|| {
            let placeholders = vec!["?"; row.len()].join(", ");
            format!("INSERT INTO {table} ({column_list}) VALUES ({placeholders})")
        });

        let mut stmt = self.tx.prepare_cached(sql)?;
        stmt.execute(params_from_iter(row.iter()))?;
        Ok(())
    }

    /// Commit every row inserted so far
    pub fn commit(self) -> TabsqlResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}
