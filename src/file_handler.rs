//! File handling module for tabsql
//!
//! This module provides a unified interface for reading and writing the
//! supported text formats:
//! - Delimited text (CSV, TSV, any single-byte separator)
//! - LTSV (labeled tab-separated values)
//! - JSON, ASCII/Markdown tables and raw output (write only)
//!
//! It abstracts away the specific format details behind two traits,
//! [`FormatReader`] and [`FormatWriter`], and picks the implementation from
//! the tagged format enums in [`AppConfig`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use crate::config::{AppConfig, InputFormat, OutputFormat};
use crate::csv_handler::{CsvReader, CsvWriter};
use crate::delim_handler::RawWriter;
use crate::error::{TabsqlError, TabsqlResult};
use crate::json_handler::JsonWriter;
use crate::ltsv_handler::{LtsvReader, LtsvWriter};
use crate::table::{unquote, Header, Row};
use crate::text_table::TextTableWriter;

/// Turns a byte stream into a header and a lazy sequence of rows
///
/// `read_header` is called exactly once, before the first `read_row`.
pub trait FormatReader {
    /// Read the column names of the source
    ///
    /// An empty source yields an empty header.
    fn read_header(&mut self) -> TabsqlResult<Header>;

    /// Read the next row
    ///
    /// # Returns
    /// * `Ok(Some(row))` - The next record
    /// * `Ok(None)` - End of input
    /// * `Err(FormatDecode)` - A record could not be decoded; the import must stop
    fn read_row(&mut self) -> TabsqlResult<Option<Row>>;
}

/// Renders a result set, one row at a time, to an output sink
///
/// Writers are driven as `pre_write`, any number of `write_row`, then
/// `post_write`. Formats that need the whole result (JSON, tables) buffer
/// rows and emit everything in `post_write`.
pub trait FormatWriter {
    /// Receive the column names before any row
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()>;

    /// Emit or buffer one row
    fn write_row(&mut self, row: &Row) -> TabsqlResult<()>;

    /// Finish the output and flush the sink
    fn post_write(&mut self) -> TabsqlResult<()>;
}

/// Source name that stands for standard input
pub const STDIN_SOURCE: &str = "-";

/// Open a source named in a query
///
/// `-` is standard input. Surrounding backticks or double quotes are removed
/// before the name is used as a filesystem path.
pub fn open_source(name: &str) -> TabsqlResult<Box<dyn BufRead>> {
    let path = unquote(name);
    if path == STDIN_SOURCE {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|source| TabsqlError::SourceOpen {
        path: path.to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Discard the first `count` lines of a source
pub fn skip_lines(reader: &mut dyn BufRead, count: usize, name: &str) -> TabsqlResult<()> {
    let mut discard = Vec::new();
    for _ in 0..count {
        discard.clear();
        let read = reader
            .read_until(b'\n', &mut discard)
            .map_err(|e| TabsqlError::FormatDecode {
                path: name.to_string(),
                message: e.to_string(),
            })?;
        if read == 0 {
            break;
        }
    }
    Ok(())
}

/// Open a source and wrap it in the reader for the configured input format
///
/// # Arguments
/// * `name` - Source name as resolved from the query (`-` for stdin)
/// * `config` - Application configuration (input format, header, skip)
///
/// # Returns
/// * `Ok(Box<dyn FormatReader>)` - A reader positioned after the skipped lines
/// * `Err(SourceOpen)` - If the source cannot be opened
pub fn open_reader(name: &str, config: &AppConfig) -> TabsqlResult<Box<dyn FormatReader>> {
    let mut source = open_source(name)?;
    skip_lines(source.as_mut(), config.skip_lines(), name)?;

    let reader: Box<dyn FormatReader> = match config.input_format() {
        InputFormat::Delimited { delimiter } => Box::new(CsvReader::new(
            name,
            source,
            delimiter,
            config.input_header(),
        )),
        InputFormat::Ltsv => Box::new(LtsvReader::new(name, source)),
    };
    Ok(reader)
}

/// Create the writer for the configured output format
pub fn new_writer<'a>(config: &AppConfig, sink: Box<dyn Write + 'a>) -> Box<dyn FormatWriter + 'a> {
    let header = config.output_header();
    match config.output_format() {
        OutputFormat::Csv => Box::new(CsvWriter::new(sink, config.output_delimiter(), header)),
        OutputFormat::Ltsv => Box::new(LtsvWriter::new(sink)),
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Table => Box::new(TextTableWriter::new(sink, false)),
        OutputFormat::Markdown => Box::new(TextTableWriter::new(sink, true)),
        OutputFormat::Raw => Box::new(RawWriter::new(sink, config.raw_delimiter(), header)),
    }
}
