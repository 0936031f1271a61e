//! Export of query results
//!
//! Drives a [`FormatWriter`] over a [`ResultCursor`]: column names first, then
//! every row in order, then the writer's finishing step. The cursor is
//! consumed exactly once.

use tracing::debug;

use crate::error::TabsqlResult;
use crate::file_handler::FormatWriter;
use crate::sql_executor::ResultCursor;

/// Write every row of a result through a writer
///
/// # Returns
/// * `Ok(usize)` - Number of rows written
/// * `Err` - The first query or output error; rows already written stay written
pub fn export(cursor: ResultCursor<'_>, writer: &mut dyn FormatWriter) -> TabsqlResult<usize> {
    writer.pre_write(cursor.columns())?;

    let mut written = 0;
    for row in cursor {
        writer.write_row(&row?)?;
        written += 1;
    }

    writer.post_write()?;
    debug!("exported {written} rows");
    Ok(written)
}
