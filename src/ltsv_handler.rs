//! LTSV file handling module for tabsql
//!
//! Labeled Tab-separated Values: every line is a record made of
//! `label:value` fields separated by tabs, e.g.
//!
//! ```text
//! host:127.0.0.1	status:200	size:512
//! ```
//!
//! Records may carry different labels. The reader's header is the union of all
//! labels in order of first appearance, which means the whole source is parsed
//! when the header is requested; rows missing a label get an empty value.

use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, Write};

use crate::error::{TabsqlError, TabsqlResult};
use crate::file_handler::{FormatReader, FormatWriter};
use crate::table::{Header, Row};

/// Reads LTSV records
pub struct LtsvReader {
    name: String,
    source: Option<Box<dyn BufRead>>,
    header: Header,
    records: VecDeque<HashMap<String, String>>,
}

impl LtsvReader {
    pub fn new(name: &str, source: Box<dyn BufRead>) -> Self {
        LtsvReader {
            name: name.to_string(),
            source: Some(source),
            header: Header::default(),
            records: VecDeque::new(),
        }
    }

    fn decode_error(&self, line: usize, message: impl Into<String>) -> TabsqlError {
        TabsqlError::FormatDecode {
            path: self.name.clone(),
            message: format!("line {line}: {}", message.into()),
        }
    }

    /// Parse every record of the source and collect the labels
    fn load(&mut self, source: Box<dyn BufRead>) -> TabsqlResult<()> {
        let mut labels: Vec<String> = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| self.decode_error(line_no, e.to_string()))?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let mut record = HashMap::new();
            for field in line.split('\t').filter(|f| !f.is_empty()) {
                let (label, value) = field
                    .split_once(':')
                    .ok_or_else(|| self.decode_error(line_no, format!("field '{field}' has no label")))?;
                if !labels.iter().any(|l| l == label) {
                    labels.push(label.to_string());
                }
                record.insert(label.to_string(), value.to_string());
            }
            self.records.push_back(record);
        }

        self.header = Header::new(labels);
        Ok(())
    }
}

impl FormatReader for LtsvReader {
    fn read_header(&mut self) -> TabsqlResult<Header> {
        if let Some(source) = self.source.take() {
            self.load(source)?;
        }
        Ok(self.header.clone())
    }

    fn read_row(&mut self) -> TabsqlResult<Option<Row>> {
        if let Some(source) = self.source.take() {
            self.load(source)?;
        }
        let Some(mut record) = self.records.pop_front() else {
            return Ok(None);
        };

        let row = self
            .header
            .columns()
            .iter()
            .map(|label| record.remove(label).unwrap_or_default())
            .collect();
        Ok(Some(row))
    }
}

/// Writes rows as LTSV, using the column names as labels
pub struct LtsvWriter<'a> {
    sink: Box<dyn Write + 'a>,
    columns: Vec<String>,
}

impl<'a> LtsvWriter<'a> {
    pub fn new(sink: Box<dyn Write + 'a>) -> Self {
        LtsvWriter {
            sink,
            columns: Vec::new(),
        }
    }
}

impl FormatWriter for LtsvWriter<'_> {
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()> {
        self.columns = columns.to_vec();
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabsqlResult<()> {
        let fields: Vec<String> = self
            .columns
            .iter()
            .zip(row)
            .map(|(label, value)| format!("{label}:{value}"))
            .collect();
        writeln!(self.sink, "{}", fields.join("\t"))?;
        Ok(())
    }

    fn post_write(&mut self) -> TabsqlResult<()> {
        self.sink.flush()?;
        Ok(())
    }
}
