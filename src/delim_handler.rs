//! Raw delimiter output for tabsql
//!
//! Writes cell values joined by a literal separator, one record per line, with
//! no quoting or escaping at all. Useful for piping values into other tools;
//! the output cannot be read back reliably when values contain the separator.

use std::io::Write;

use crate::error::TabsqlResult;
use crate::file_handler::FormatWriter;
use crate::table::Row;

/// Writes rows joined by a raw separator
pub struct RawWriter<'a> {
    sink: Box<dyn Write + 'a>,
    /// Separator placed between values, any length
    delimiter: String,
    /// Whether to emit the column names as the first line
    header: bool,
}

impl<'a> RawWriter<'a> {
    pub fn new(sink: Box<dyn Write + 'a>, delimiter: &str, header: bool) -> Self {
        RawWriter {
            sink,
            delimiter: delimiter.to_string(),
            header,
        }
    }
}

impl FormatWriter for RawWriter<'_> {
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()> {
        if self.header {
            writeln!(self.sink, "{}", columns.join(&self.delimiter))?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabsqlResult<()> {
        writeln!(self.sink, "{}", row.join(&self.delimiter))?;
        Ok(())
    }

    fn post_write(&mut self) -> TabsqlResult<()> {
        self.sink.flush()?;
        Ok(())
    }
}
