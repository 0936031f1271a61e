//! Aligned text table output for tabsql
//!
//! Renders the result either as an ASCII box table:
//!
//! ```text
//! +----+-------+
//! | id | name  |
//! +----+-------+
//! | 1  | alice |
//! +----+-------+
//! ```
//!
//! or as a Markdown table with a header separator line. Column widths depend
//! on every row, so rows are buffered until `post_write`. Layout and display
//! width (including East Asian wide characters) are handled by comfy-table.

use std::io::Write;

use comfy_table::presets::{ASCII_FULL, ASCII_MARKDOWN};
use comfy_table::{Cell, Table, TableComponent};

use crate::error::TabsqlResult;
use crate::file_handler::FormatWriter;
use crate::table::Row;

/// Writes the result as an aligned table
pub struct TextTableWriter<'a> {
    sink: Box<dyn Write + 'a>,
    /// Markdown flavour instead of ASCII boxes
    markdown: bool,
    table: Table,
}

impl<'a> TextTableWriter<'a> {
    pub fn new(sink: Box<dyn Write + 'a>, markdown: bool) -> Self {
        let mut table = Table::new();
        if markdown {
            table.load_preset(ASCII_MARKDOWN);
        } else {
            // Full frame, dashed header rule, no rules between rows
            table
                .load_preset(ASCII_FULL)
                .set_style(TableComponent::LeftHeaderIntersection, '+')
                .set_style(TableComponent::HeaderLines, '-')
                .set_style(TableComponent::MiddleHeaderIntersections, '+')
                .set_style(TableComponent::RightHeaderIntersection, '+')
                .remove_style(TableComponent::HorizontalLines)
                .remove_style(TableComponent::MiddleIntersections)
                .remove_style(TableComponent::LeftBorderIntersections)
                .remove_style(TableComponent::RightBorderIntersections);
        }

        TextTableWriter {
            sink,
            markdown,
            table,
        }
    }

    fn cell(&self, value: &str) -> Cell {
        if self.markdown {
            Cell::new(value.replace('|', "\\|").replace('\n', "<br>"))
        } else {
            Cell::new(value.replace('\n', " "))
        }
    }
}

impl FormatWriter for TextTableWriter<'_> {
    fn pre_write(&mut self, columns: &[String]) -> TabsqlResult<()> {
        let header: Vec<Cell> = columns.iter().map(|c| self.cell(c)).collect();
        self.table.set_header(header);
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabsqlResult<()> {
        let cells: Vec<Cell> = row.iter().map(|v| self.cell(v)).collect();
        self.table.add_row(cells);
        Ok(())
    }

    fn post_write(&mut self) -> TabsqlResult<()> {
        writeln!(self.sink, "{}", self.table)?;
        self.sink.flush()?;
        Ok(())
    }
}
