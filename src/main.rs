//! tabsql - run SQL queries directly against CSV and LTSV files
//!
//! Every name that follows FROM or JOIN in the query is treated as a file.
//! Each file is loaded into a table of an in-memory SQLite database, the query
//! is rewritten to use those tables, executed, and the result is printed in
//! the chosen output format.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments and build the configuration
//! 2. Install the logging subscriber
//! 3. Resolve, load, execute and export (see `tabsql::pipeline`)
//! 4. Map failures to a diagnostic on stderr and a non-zero exit status

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use tabsql::cli::{self, TabsqlArgs};
use tabsql::pipeline;

/// Exit status for a missing query, matching clap's usage errors
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let args = cli::parse_args();
    init_logging(args.debug);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(USAGE_EXIT),
        Err(err) => {
            eprintln!("tabsql: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber; RUST_LOG takes precedence over --debug
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Run the invocation
///
/// # Returns
/// * `Ok(true)` - The query ran and its result was written
/// * `Ok(false)` - No query was given; usage was printed
/// * `Err` - A fatal error, with the failing stage as context
fn run(args: &TabsqlArgs) -> Result<bool> {
    let config = args.to_config().context("invalid options")?;
    let query = args.query_text().context("cannot build query")?;

    if query.is_empty() {
        TabsqlArgs::command().print_help()?;
        return Ok(false);
    }

    tracing::debug!("config: {config:?}");
    tracing::debug!("query: {query}");

    let sink = Box::new(BufWriter::new(io::stdout().lock()));
    let rows = pipeline::run(&config, &query, sink).map_err(|err| {
        let stage = err.stage();
        anyhow::Error::new(err).context(format!("{stage} failed"))
    })?;

    tracing::debug!("{rows} rows written");
    Ok(true)
}
