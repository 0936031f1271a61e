//! Configuration module for tabsql
//!
//! This module provides a centralized configuration structure for the application.
//! It is built once from the command line and passed down through the pipeline
//! rather than using global state or passing individual settings.
//!
//! Input and output formats are tagged enums decoded here, at configuration
//! time, so nothing deeper in the pipeline re-inspects raw flags.

use clap::ValueEnum;

use crate::error::{TabsqlError, TabsqlResult};

/// Format of the files named in the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Delimiter-separated text with RFC4180 quoting
    Delimited { delimiter: u8 },
    /// Labeled tab-separated values (`key:value` pairs separated by tabs)
    Ltsv,
}

/// Format used to render the query result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Delimiter-separated text
    #[default]
    Csv,
    /// Labeled tab-separated values
    Ltsv,
    /// A JSON array of objects
    Json,
    /// Aligned ASCII table
    #[value(name = "at")]
    Table,
    /// Markdown table
    #[value(name = "md")]
    Markdown,
    /// Values joined by the output delimiter with no escaping
    Raw,
}

/// Application configuration
///
/// Immutable once built. Use [`AppConfig::builder`] to create one.
#[derive(Debug, Clone)]
pub struct AppConfig {
    input_format: InputFormat,
    input_header: bool,
    skip_lines: usize,
    output_format: OutputFormat,
    output_delimiter: u8,
    raw_delimiter: String,
    output_header: bool,
    strict: bool,
    debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            input_format: InputFormat::Delimited { delimiter: b',' },
            input_header: false,
            skip_lines: 0,
            output_format: OutputFormat::Csv,
            output_delimiter: b',',
            raw_delimiter: ",".to_string(),
            output_header: false,
            strict: false,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Start building a configuration from the defaults
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder {
            config: AppConfig::default(),
        }
    }

    /// Format of the input files
    pub fn input_format(&self) -> InputFormat {
        self.input_format
    }

    /// Whether the first line of a delimited file holds the column names
    pub fn input_header(&self) -> bool {
        self.input_header
    }

    /// Number of leading lines to discard before reading a file
    pub fn skip_lines(&self) -> usize {
        self.skip_lines
    }

    /// Format of the result
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Field separator for delimited output
    pub fn output_delimiter(&self) -> u8 {
        self.output_delimiter
    }

    /// Literal separator used by the raw writer
    pub fn raw_delimiter(&self) -> &str {
        &self.raw_delimiter
    }

    /// Whether writers that support it emit a header line
    pub fn output_header(&self) -> bool {
        self.output_header
    }

    /// Whether a failed row insert aborts the load
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Whether debug diagnostics were requested
    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Builder for [`AppConfig`]
#[derive(Debug, Clone)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn input_format(mut self, format: InputFormat) -> Self {
        self.config.input_format = format;
        self
    }

    pub fn input_header(mut self, header: bool) -> Self {
        self.config.input_header = header;
        self
    }

    pub fn skip_lines(mut self, lines: usize) -> Self {
        self.config.skip_lines = lines;
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Set the output delimiter from its textual form
    ///
    /// The raw writer keeps the decoded text as-is; the delimited writer
    /// needs it to be exactly one byte.
    pub fn output_delimiter(mut self, delimiter: &str) -> TabsqlResult<Self> {
        let decoded = unescape_delimiter(delimiter);
        if decoded.is_empty() {
            return Err(TabsqlError::InvalidDelimiter(delimiter.to_string()));
        }
        if self.config.output_format != OutputFormat::Raw {
            self.config.output_delimiter = parse_delimiter(delimiter)?;
        }
        self.config.raw_delimiter = decoded;
        Ok(self)
    }

    pub fn output_header(mut self, header: bool) -> Self {
        self.config.output_header = header;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Expand the escape sequences accepted in delimiter options
fn unescape_delimiter(delimiter: &str) -> String {
    match delimiter {
        "\\t" | "tab" | "TAB" => "\t".to_string(),
        "\\n" => "\n".to_string(),
        "\\\\" => "\\".to_string(),
        "\\0" => "\0".to_string(),
        other => other.to_string(),
    }
}

/// Decode a delimiter option into a single byte
///
/// Accepts any single ASCII character plus the escapes `\t` (or `tab`),
/// `\\` and `\0`.
///
/// # Returns
/// * `Ok(u8)` - The delimiter byte
/// * `Err(InvalidDelimiter)` - If the text does not describe exactly one ASCII byte
pub fn parse_delimiter(delimiter: &str) -> TabsqlResult<u8> {
    let decoded = unescape_delimiter(delimiter);
    match decoded.as_bytes() {
        [byte] if byte.is_ascii() && *byte != b'\n' && *byte != b'"' => Ok(*byte),
        _ => Err(TabsqlError::InvalidDelimiter(delimiter.to_string())),
    }
}
