//! Loading of query-referenced files into the database
//!
//! For each table reference, the loader reads the header, creates a table of
//! text columns and streams every row into it with parameterized inserts.
//!
//! A row the engine refuses (most often because it has the wrong number of
//! fields) is logged and skipped, unless strict mode is on. Decode errors in
//! the input are not rows and always abort the load.

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::database::Database;
use crate::error::{TabsqlError, TabsqlResult};
use crate::file_handler::{open_reader, FormatReader};
use crate::resolver::TableReference;
use crate::table::Header;

/// Outcome of loading one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadStats {
    /// Rows stored in the table
    pub inserted: usize,
    /// Rows the engine rejected
    pub skipped: usize,
}

/// Load the file behind a table reference
///
/// # Arguments
/// * `database` - The invocation's ephemeral store
/// * `reference` - Table reference produced by the resolver
/// * `config` - Application configuration
///
/// # Returns
/// * `Ok(LoadStats)` - Counts of inserted and skipped rows
/// * `Err` - If the source cannot be opened or decoded, or a row fails in strict mode
pub fn load_reference(
    database: &mut Database,
    reference: &TableReference,
    config: &AppConfig,
) -> TabsqlResult<LoadStats> {
    let mut reader = open_reader(&reference.source_path, config)?;
    load(database, &reference.escaped_identifier, reader.as_mut(), config.strict())
}

/// Create a table from a reader's header and insert all of its rows
pub fn load(
    database: &mut Database,
    identifier: &str,
    reader: &mut dyn FormatReader,
    strict: bool,
) -> TabsqlResult<LoadStats> {
    let mut header = reader.read_header()?;
    if header.is_empty() {
        // An empty source still becomes a queryable (empty) table
        header = Header::synthetic(1);
    }
    let columns = header.schema_names();
    database.create_table(identifier, &columns)?;

    let mut stats = LoadStats::default();
    let mut inserter = database.inserter(identifier, &columns)?;
    let mut row_number = 0;

    while let Some(row) = reader.read_row()? {
        row_number += 1;
        match inserter.insert(&row) {
            Ok(()) => stats.inserted += 1,
            Err(e) if !strict => {
                warn!("{identifier}: skipping row {row_number} {row:?}: {e}");
                stats.skipped += 1;
            }
            Err(e) => {
                return Err(TabsqlError::RowInsert {
                    table: identifier.to_string(),
                    row: row_number,
                    message: e.to_string(),
                })
            }
        }
    }
    inserter.commit()?;

    debug!(
        "loaded {identifier}: {} rows, {} skipped",
        stats.inserted, stats.skipped
    );
    Ok(stats)
}
