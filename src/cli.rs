//! CLI argument parsing module for tabsql
//!
//! This module handles parsing command-line arguments using the clap crate.
//! It defines the command-line interface and turns the parsed arguments into
//! the query text and the [`AppConfig`] used by the pipeline.
//!
//! Key features of the CLI:
//! - The query is given as trailing words or read from a file with -q
//! - Input format, delimiter, header and skipped lines are selectable
//! - Output format, delimiter and header are selectable
//! - Diagnostic output control via the --debug flag

use std::fs;

use clap::{Parser, ValueEnum};

use crate::config::{parse_delimiter, AppConfig, InputFormat, OutputFormat};
use crate::error::{TabsqlError, TabsqlResult};

/// Format of the input files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputKind {
    /// Delimiter-separated text (see --id)
    #[default]
    Csv,
    /// Labeled tab-separated values
    Ltsv,
}

/// Command-line arguments for tabsql
///
/// Files are not listed separately: every name that follows FROM or JOIN in
/// the query is opened as an input file (`-` reads standard input).
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Run SQL queries against CSV and LTSV files"
)]
pub struct TabsqlArgs {
    /// SQL query; multiple words are joined with spaces
    ///
    /// Example: tabsql "SELECT c1, count(*) FROM access.csv GROUP BY c1"
    #[clap(help = "SQL query (SELECT ... FROM file ...)")]
    pub query: Vec<String>,

    /// Read the query from a file instead of the command line
    #[clap(short = 'q', long = "query-file", value_name = "FILE")]
    pub query_file: Option<String>,

    /// Input format
    #[clap(short = 'i', long = "input-format", value_enum, default_value_t = InputKind::Csv)]
    pub input_format: InputKind,

    /// Field delimiter for delimited input
    ///
    /// A single character, or an escape such as \t.
    #[clap(long = "id", value_name = "DELIM", default_value = ",")]
    pub input_delimiter: String,

    /// The first line of each delimited input file holds the column names
    #[clap(long = "ih")]
    pub input_header: bool,

    /// Number of lines to skip at the start of each input file
    #[clap(long = "is", value_name = "N", default_value_t = 0)]
    pub skip_lines: usize,

    /// Output format
    #[clap(short = 'o', long = "output-format", value_enum, default_value_t = OutputFormat::Csv)]
    pub output_format: OutputFormat,

    /// Field delimiter for csv and raw output
    #[clap(long = "od", value_name = "DELIM", default_value = ",")]
    pub output_delimiter: String,

    /// Write the column names as the first output line
    #[clap(long = "oh")]
    pub output_header: bool,

    /// Fail when a row cannot be loaded instead of skipping it
    #[clap(long)]
    pub strict: bool,

    /// Enable debug diagnostics on stderr
    #[clap(short, long)]
    pub debug: bool,
}

impl TabsqlArgs {
    /// Build the application configuration from the arguments
    pub fn to_config(&self) -> TabsqlResult<AppConfig> {
        let input_format = match self.input_format {
            InputKind::Csv => InputFormat::Delimited {
                delimiter: parse_delimiter(&self.input_delimiter)?,
            },
            InputKind::Ltsv => InputFormat::Ltsv,
        };

        // Output format first: the delimiter rules depend on it
        let config = AppConfig::builder()
            .input_format(input_format)
            .input_header(self.input_header)
            .skip_lines(self.skip_lines)
            .output_format(self.output_format)
            .output_delimiter(&self.output_delimiter)?
            .output_header(self.output_header)
            .strict(self.strict)
            .debug(self.debug)
            .build();
        Ok(config)
    }

    /// Assemble the query text
    ///
    /// Reads --query-file when given, otherwise joins the positional words.
    /// Surrounding whitespace and a single trailing `;` are removed.
    pub fn query_text(&self) -> TabsqlResult<String> {
        let text = match &self.query_file {
            Some(path) => fs::read_to_string(path).map_err(|source| TabsqlError::QueryFile {
                path: path.clone(),
                source,
            })?,
            None => self.query.join(" "),
        };
        Ok(trim_query(&text).to_string())
    }
}

/// Remove surrounding whitespace and one trailing semicolon
pub fn trim_query(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix(';').unwrap_or(text).trim_end()
}

/// Parse command-line arguments into the TabsqlArgs structure
pub fn parse_args() -> TabsqlArgs {
    TabsqlArgs::parse()
}
