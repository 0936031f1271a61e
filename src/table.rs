//! Table module for tabsql
//!
//! This module provides the format-agnostic row model that bridges the
//! input readers, the embedded engine and the output writers:
//!
//! - [`Row`]: an ordered sequence of text cells
//! - [`Header`]: the ordered column names of a table
//! - Pure naming functions for synthetic column and table identifiers
//!
//! No type inference is performed anywhere: every cell is text, and every
//! column created in the engine is declared `text`.

use std::collections::HashSet;

/// One record, cells in column order
pub type Row = Vec<String>;

/// Ordered column names of a table or result set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Create a header from literal column names
    pub fn new(columns: Vec<String>) -> Self {
        Header { columns }
    }

    /// Create a header of synthetic names `c1..cN`
    pub fn synthetic(count: usize) -> Self {
        Header {
            columns: (0..count).map(|i| column_name(i, None)).collect(),
        }
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the header has no columns at all
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names usable as a table schema
    ///
    /// Empty and repeated names cannot be used for a table definition, so
    /// they fall back to the positional name of their column.
    pub fn schema_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = column_name(i, Some(name));
                if seen.insert(name.to_lowercase()) {
                    name
                } else {
                    let mut fallback = column_name(i, None);
                    while !seen.insert(fallback.to_lowercase()) {
                        fallback.push('_');
                    }
                    fallback
                }
            })
            .collect()
    }
}

/// Name of the column at `index` (zero-based)
///
/// Uses the literal header name when one is given and not blank, the
/// synthetic `c<index+1>` name otherwise.
pub fn column_name(index: usize, header: Option<&str>) -> String {
    match header.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("c{}", index + 1),
    }
}

/// Quote an identifier for use inside SQL text
///
/// Embedded quote characters are doubled, so any name is safe.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Strip one layer of backtick or double-quote delimiters from a name
pub fn unquote(name: &str) -> &str {
    for quote in ['`', '"'] {
        if name.len() >= 2 && name.starts_with(quote) && name.ends_with(quote) {
            return &name[1..name.len() - 1];
        }
    }
    name
}

/// Build a collision-free, backtick-quoted table identifier for a raw name
///
/// The first use of a name maps to `` `name` ``; later uses of the same name
/// get a `#2`, `#3`, ... suffix. Every identifier handed out is recorded in
/// `used` in lowercase, since the engine compares table names without case:
/// `a.csv` and `A.csv` must not map to the same table.
pub fn synthetic_table_name(raw_name: &str, used: &mut HashSet<String>) -> String {
    let base = unquote(raw_name).replace('`', "``");
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate.to_lowercase()) {
        n += 1;
        candidate = format!("{base}#{n}");
    }
    used.insert(candidate.to_lowercase());
    format!("`{candidate}`")
}
