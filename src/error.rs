//! Error handling for tabsql
//!
//! This module defines the error type shared by every stage of the query
//! pipeline. Each variant belongs to exactly one stage (resolve, load,
//! execute, write) so that the binary can tell the user where an invocation
//! failed and which input was responsible.
//!
//! The module uses thiserror to minimize boilerplate code and create
//! a consistent error handling approach throughout the codebase.

use thiserror::Error;

/// TabsqlError represents all possible errors that can occur in tabsql
///
/// Only [`TabsqlError::RowInsert`] is ever recovered from (by the loader,
/// when strict mode is off). Everything else aborts the invocation.
#[derive(Error, Debug)]
pub enum TabsqlError {
    /// A table reference or `-` could not be opened for reading
    #[error("cannot open '{path}': {source}")]
    SourceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A record in an input file could not be decoded
    #[error("malformed input in '{path}': {message}")]
    FormatDecode { path: String, message: String },

    /// The query text could not be tokenized while looking for table references
    #[error("cannot scan query `{query}`: {message}")]
    Tokenize { query: String, message: String },

    /// The query was rejected by the engine before execution
    #[error("syntax error in query `{query}`: {message}")]
    QuerySyntax { query: String, message: String },

    /// The query failed while producing rows
    #[error("query failed: {0}")]
    QueryRuntime(String),

    /// A single row could not be inserted into its table
    #[error("failed to insert row {row} into {table}: {message}")]
    RowInsert {
        table: String,
        row: usize,
        message: String,
    },

    /// The engine refused a table definition
    #[error("cannot create table {table}: {message}")]
    CreateTable { table: String, message: String },

    /// Writing the result to the output sink failed
    #[error("cannot write output: {0}")]
    SinkWrite(String),

    /// A delimiter option could not be decoded into a single byte
    #[error("invalid delimiter '{0}': must be a single character or escape such as \\t")]
    InvalidDelimiter(String),

    /// The query text file given with --query-file could not be read
    #[error("cannot read query file '{path}': {source}")]
    QueryFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The embedded engine could not be opened or closed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl TabsqlError {
    /// Name of the pipeline stage this error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            TabsqlError::Tokenize { .. } => "resolve",
            TabsqlError::SourceOpen { .. }
            | TabsqlError::FormatDecode { .. }
            | TabsqlError::RowInsert { .. }
            | TabsqlError::CreateTable { .. } => "load",
            TabsqlError::QuerySyntax { .. }
            | TabsqlError::QueryRuntime(_)
            | TabsqlError::Database(_) => "execute",
            TabsqlError::SinkWrite(_) => "write",
            TabsqlError::InvalidDelimiter(_) | TabsqlError::QueryFile { .. } => "config",
        }
    }
}

/// Conversion for output failures raised by any writer
impl From<std::io::Error> for TabsqlError {
    fn from(err: std::io::Error) -> Self {
        TabsqlError::SinkWrite(err.to_string())
    }
}

/// Result type alias for operations that can produce a TabsqlError
pub type TabsqlResult<T> = std::result::Result<T, TabsqlError>;
