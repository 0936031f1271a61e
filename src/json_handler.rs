//! JSON output for tabsql
//!
//! The whole result is emitted as one document: an array of objects mapping
//! each column name to its cell value, in column order. Rows are buffered
//! until `post_write` because the document is only complete at the end.

use std::io::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{TabsqlError, TabsqlResult};
use crate::file_handler::FormatWriter;
use crate::table::Row;

/// One result row viewed as a JSON object
struct JsonRecord<'r> {
    columns: &'r [String],
    values: &'r Row,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Writes the result as a pretty-printed JSON array
pub struct JsonWriter<'a> {
    sink: Box<dyn Write + 'a>,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl<'a> JsonWriter<'a> {
    pub fn new(sink: Box<dyn Write + 'a>) -> Self {
        JsonWriter {
            sink,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl FormatWriter for JsonWriter<'_> {
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()> {
        self.columns = columns.to_vec();
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabsqlResult<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn post_write(&mut self) -> TabsqlResult<()> {
        let records: Vec<JsonRecord> = self
            .rows
            .iter()
            .map(|values| JsonRecord {
                columns: &self.columns,
                values,
            })
            .collect();

        serde_json::to_writer_pretty(&mut self.sink, &records)
            .map_err(|e| TabsqlError::SinkWrite(e.to_string()))?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}
