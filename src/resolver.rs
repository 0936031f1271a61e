//! Table reference resolution for tabsql
//!
//! Finds the file names that a query uses as tables and rewrites the query so
//! each of them becomes a quoted, collision-free table identifier.
//!
//! The query is tokenized with sqlparser's SQLite dialect. A table reference
//! is the run of tokens that directly follows a `FROM` or `JOIN` keyword, up to
//! the next whitespace, comma, semicolon or parenthesis. Because the scan works
//! on tokens, keywords inside string literals and comments are never matched,
//! and the substitution touches only the exact byte span of each reference:
//! the same text appearing elsewhere in the query (for example as a string
//! literal) is left alone.

use std::collections::HashSet;

use sqlparser::dialect::SQLiteDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, TokenWithLocation, Tokenizer};
use tracing::debug;

use crate::error::{TabsqlError, TabsqlResult};
use crate::table::{synthetic_table_name, unquote};

/// A file-backed table named in the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    /// The reference exactly as written in the query
    pub raw_name: String,
    /// Quoted identifier used in the rewritten query and as the physical table name
    pub escaped_identifier: String,
    /// Path to open (`-` for standard input)
    pub source_path: String,
}

/// Output of [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuery {
    /// One entry per FROM/JOIN reference, in query order, duplicates kept
    pub references: Vec<TableReference>,
    /// The query with every reference replaced by its escaped identifier
    pub query: String,
}

/// Find the table references of a query and rewrite it
///
/// # Arguments
/// * `sql` - The query as given by the user
///
/// # Returns
/// * `Ok(ResolvedQuery)` - References in query order and the rewritten query
/// * `Err(Tokenize)` - If the query cannot be tokenized (e.g. an unterminated string)
pub fn resolve(sql: &str) -> TabsqlResult<ResolvedQuery> {
    let dialect = SQLiteDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .tokenize_with_location()
        .map_err(|e| {
            let mut message = e.to_string();
            if message.contains("Unterminated") {
                message.push_str(" (wrap file names that contain quotes in backticks)");
            }
            TabsqlError::Tokenize {
                query: sql.to_string(),
                message,
            }
        })?;

    let offsets = token_offsets(sql, &tokens);
    let spans = reference_spans(&tokens);

    let mut used = HashSet::new();
    let mut references = Vec::with_capacity(spans.len());
    let mut query = String::with_capacity(sql.len() + spans.len() * 2);
    let mut copied = 0;

    for (first, end) in spans {
        let (start, stop) = (offsets[first], offsets[end]);
        let raw_name = &sql[start..stop];
        let escaped_identifier = synthetic_table_name(raw_name, &mut used);

        query.push_str(&sql[copied..start]);
        query.push_str(&escaped_identifier);
        copied = stop;

        debug!("table reference {raw_name} -> {escaped_identifier}");
        references.push(TableReference {
            raw_name: raw_name.to_string(),
            escaped_identifier,
            source_path: unquote(raw_name).to_string(),
        });
    }
    query.push_str(&sql[copied..]);

    Ok(ResolvedQuery { references, query })
}

/// Token index ranges `[first, end)` of every table reference
fn reference_spans(tokens: &[TokenWithLocation]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if !is_table_keyword(&tokens[i].token) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < tokens.len() && matches!(tokens[j].token, Token::Whitespace(_)) {
            j += 1;
        }
        let first = j;
        while j < tokens.len() && !ends_reference(&tokens[j].token) {
            j += 1;
        }

        // `FROM (subquery)` has no name; `FROM func(...)` is a table-valued function
        let is_call = tokens
            .get(j)
            .is_some_and(|t| matches!(t.token, Token::LParen));
        if j > first && !is_call {
            spans.push((first, j));
        }
        i = j.max(i + 1);
    }

    spans
}

fn is_table_keyword(token: &Token) -> bool {
    match token {
        Token::Word(word) => {
            word.quote_style.is_none() && matches!(word.keyword, Keyword::FROM | Keyword::JOIN)
        }
        _ => false,
    }
}

fn ends_reference(token: &Token) -> bool {
    matches!(
        token,
        Token::Whitespace(_)
            | Token::Comma
            | Token::SemiColon
            | Token::LParen
            | Token::RParen
            | Token::EOF
    )
}

/// Byte offset where each token starts, plus the end of the query
///
/// The tokenizer reports 1-based line/column positions counted in
/// characters; walking the query the same way maps them back to bytes.
fn token_offsets(sql: &str, tokens: &[TokenWithLocation]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(tokens.len() + 1);
    let mut chars = sql.char_indices().peekable();
    let (mut line, mut column) = (1u64, 1u64);

    for token in tokens {
        let target = (token.location.line, token.location.column);
        while (line, column) < target {
            match chars.next() {
                Some((_, '\n')) => {
                    line += 1;
                    column = 1;
                }
                Some(_) => column += 1,
                None => break,
            }
        }
        offsets.push(chars.peek().map_or(sql.len(), |(i, _)| *i));
    }
    offsets.push(sql.len());

    offsets
}
