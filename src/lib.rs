//! Tabsql library crate
//!
//! This is the library component of tabsql, containing all the core functionality
//! for a command-line utility that runs SQL queries directly against text files.
//! The library provides:
//!
//! - Discovery of file names used as tables after FROM/JOIN, with token-level
//!   rewriting of the query to collision-free table identifiers
//! - Readers for delimited text (CSV, TSV, any single-byte separator) and LTSV
//! - Loading of every referenced file into an ephemeral in-memory SQLite store
//! - Execution of the rewritten query with a streaming result cursor
//! - Writers for CSV, LTSV, JSON, ASCII and Markdown tables, and raw output
//!
//! All columns are text; the SQL itself is entirely handled by SQLite.
//!
//! ```no_run
//! use tabsql::config::AppConfig;
//!
//! # fn main() -> tabsql::error::TabsqlResult<()> {
//! let config = AppConfig::builder().input_header(true).output_header(true).build();
//! tabsql::pipeline::run(&config, "SELECT name FROM people.csv", Box::new(std::io::stdout()))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod database;
pub mod delim_handler;
pub mod error;
pub mod exporter;
pub mod file_handler;
pub mod json_handler;
pub mod loader;
pub mod ltsv_handler;
pub mod pipeline;
pub mod resolver;
pub mod sql_executor;
pub mod table;
pub mod text_table;
