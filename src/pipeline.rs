//! Query pipeline for tabsql
//!
//! Ties the components together for a single invocation:
//!
//! 1. Resolve the table references of the query and rewrite it
//! 2. Open an ephemeral in-memory database
//! 3. Load every referenced file, one at a time, in query order
//! 4. Execute the rewritten query
//! 5. Export the result with the configured writer
//!
//! The database is dropped when `run` returns, whatever the outcome.

use std::io::{self, Write};

use tracing::debug;

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::{TabsqlError, TabsqlResult};
use crate::exporter::export;
use crate::file_handler::{new_writer, STDIN_SOURCE};
use crate::loader::load_reference;
use crate::resolver::{resolve, TableReference};
use crate::sql_executor::SqlExecutor;

/// Run one query end to end
///
/// # Arguments
/// * `config` - Application configuration
/// * `query` - Query text as given by the user
/// * `sink` - Destination of the rendered result
///
/// # Returns
/// * `Ok(usize)` - Number of result rows written
/// * `Err` - The first fatal error of any stage
pub fn run<'a>(config: &AppConfig, query: &str, sink: Box<dyn Write + 'a>) -> TabsqlResult<usize> {
    let resolved = resolve(query)?;
    if resolved.references.is_empty() {
        debug!("no table references in query");
    }

    check_single_stdin(&resolved.references)?;

    let mut database = Database::open()?;
    for reference in &resolved.references {
        let stats = load_reference(&mut database, reference, config)?;
        debug!(
            "{} -> {}: {} rows",
            reference.raw_name, reference.escaped_identifier, stats.inserted
        );
    }

    debug!("executing: {}", resolved.query);
    let mut executor = SqlExecutor::prepare(&database, &resolved.query).map_err(|e| match e {
        // Report syntax errors against the query the user wrote
        TabsqlError::QuerySyntax { message, .. } => TabsqlError::QuerySyntax {
            query: query.to_string(),
            message,
        },
        other => other,
    })?;
    let cursor = executor.execute()?;

    let mut writer = new_writer(config, sink);
    export(cursor, writer.as_mut())
}

/// Standard input can back at most one table per invocation
fn check_single_stdin(references: &[TableReference]) -> TabsqlResult<()> {
    let stdin_uses = references
        .iter()
        .filter(|r| r.source_path == STDIN_SOURCE)
        .count();
    if stdin_uses > 1 {
        return Err(TabsqlError::SourceOpen {
            path: STDIN_SOURCE.to_string(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "standard input is referenced {stdin_uses} times but can only be read once"
                ),
            ),
        });
    }
    Ok(())
}
