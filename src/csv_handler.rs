//! CSV file handling module for tabsql
//!
//! This module handles reading delimiter-separated input files and writing
//! delimiter-separated query results. It provides:
//!
//! - [`CsvReader`]: RFC4180 reader with a configurable single-byte separator
//! - [`CsvWriter`]: writer using the same quoting rules
//!
//! Both are thin adapters over the csv crate. The reader runs in flexible mode
//! so that a record with the wrong number of fields reaches the loader, which
//! rejects that single row, instead of aborting the whole file.

use std::io::{BufRead, Write};

use csv::StringRecord;

use crate::error::{TabsqlError, TabsqlResult};
use crate::file_handler::{FormatReader, FormatWriter};
use crate::table::{Header, Row};

/// Reads delimited text one record at a time
pub struct CsvReader {
    /// Source name, for diagnostics
    name: String,

    reader: csv::Reader<Box<dyn BufRead>>,

    /// Whether the first record holds the column names
    has_header: bool,

    /// First data record, read early to count columns when there is no header
    pending: Option<Row>,

    record: StringRecord,
}

impl CsvReader {
    /// Create a reader over an opened source
    ///
    /// # Arguments
    /// * `name` - Source name used in error messages
    /// * `source` - Opened byte stream, already past any skipped lines
    /// * `delimiter` - Field separator byte
    /// * `has_header` - Whether the first record supplies the column names
    pub fn new(name: &str, source: Box<dyn BufRead>, delimiter: u8, has_header: bool) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(source);

        CsvReader {
            name: name.to_string(),
            reader,
            has_header,
            pending: None,
            record: StringRecord::new(),
        }
    }

    fn next_record(&mut self) -> TabsqlResult<Option<Row>> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| TabsqlError::FormatDecode {
                path: self.name.clone(),
                message: e.to_string(),
            })?;

        if more {
            Ok(Some(self.record.iter().map(String::from).collect()))
        } else {
            Ok(None)
        }
    }
}

impl FormatReader for CsvReader {
    fn read_header(&mut self) -> TabsqlResult<Header> {
        let first = match self.next_record()? {
            Some(row) => row,
            None => return Ok(Header::default()),
        };

        if self.has_header {
            Ok(Header::new(first))
        } else {
            let header = Header::synthetic(first.len());
            self.pending = Some(first);
            Ok(header)
        }
    }

    fn read_row(&mut self) -> TabsqlResult<Option<Row>> {
        if let Some(row) = self.pending.take() {
            return Ok(Some(row));
        }
        self.next_record()
    }
}

/// Writes rows as delimited text
pub struct CsvWriter<'a> {
    writer: csv::Writer<Box<dyn Write + 'a>>,

    /// Whether to emit the column names as the first record
    header: bool,
}

impl<'a> CsvWriter<'a> {
    pub fn new(sink: Box<dyn Write + 'a>, delimiter: u8, header: bool) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(sink);
        CsvWriter { writer, header }
    }
}

fn sink_error(err: csv::Error) -> TabsqlError {
    TabsqlError::SinkWrite(err.to_string())
}

impl FormatWriter for CsvWriter<'_> {
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()> {
        if self.header && !columns.is_empty() {
            self.writer.write_record(columns).map_err(sink_error)?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabsqlResult<()> {
        self.writer.write_record(row).map_err(sink_error)
    }

    fn post_write(&mut self) -> TabsqlResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
