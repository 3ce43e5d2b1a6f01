//! Tables
//!
//! Every row is defined with the same column layout: the column count is
//! the longest row's cell count, and the cell boundaries split
//! [`TABLE_WIDTH`] evenly so the last boundary always lands on it. Short
//! rows are padded with empty cells.

use md2rtf_ast::{Block, Table, TableCell};

use super::Writer;
use super::list::ListState;
use crate::style::{
    LINE_SPACING_1, LINE_SPACING_MULTIPLIER, PARAGRAPH_END, PARAGRAPH_START, TABLE_CELL_BOUNDARY,
    TABLE_CELL_END, TABLE_IN_CELL, TABLE_ROW_DEFINITION, TABLE_ROW_END, TABLE_WIDTH,
};

/// Number of columns: the longest row wins
pub(crate) fn column_count(table: &Table) -> usize {
    table.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
}

/// Cumulative right boundary of each column, in twips
pub(crate) fn cell_offsets(columns: usize) -> Vec<u32> {
    let columns = columns as u32;
    (1..=columns).map(|i| TABLE_WIDTH * i / columns).collect()
}

impl Writer<'_> {
    pub(super) fn write_table(&mut self, table: &Table) {
        let columns = column_count(table);
        if columns == 0 {
            return;
        }
        let offsets = cell_offsets(columns);

        self.push_line(PARAGRAPH_END);
        for row in &table.rows {
            self.push_line(TABLE_ROW_DEFINITION);
            for offset in &offsets {
                self.push(TABLE_CELL_BOUNDARY);
                self.push(&offset.to_string());
            }
            self.push_line(" ");

            self.push(PARAGRAPH_START);
            self.push(TABLE_IN_CELL);
            self.push(LINE_SPACING_1);
            self.push(LINE_SPACING_MULTIPLIER);
            for cell in &row.cells {
                self.output.push(' ');
                self.write_cell(cell);
                self.push(TABLE_CELL_END);
            }
            for _ in row.cells.len()..columns {
                self.output.push(' ');
                self.push(TABLE_CELL_END);
            }
            self.push_line(TABLE_ROW_END);
        }
    }

    /// Cells render a reduced block set; headings and paragraphs lose their
    /// paragraph wrapping, nested tables are not supported.
    fn write_cell(&mut self, cell: &TableCell) {
        for block in &cell.children {
            match block {
                Block::Heading(h) => self.write_inlines(&h.children),
                Block::Paragraph(p) => self.write_inlines(&p.children),
                Block::Quote(q) => self.write_quote(q),
                Block::List(l) => self.write_list(l, 0, &mut ListState::default()),
                Block::CodeBlock(c) => self.write_nested_code_block(c),
                Block::ThematicBreak => self.write_thematic_break(),
                Block::HtmlBlock(h) => self.write_nested_html_block(h),
                Block::Table(_)
                | Block::BlankLine
                | Block::LinkReferenceDefinitionGroup
                | Block::Unsupported(_) => self.write_unsupported_block(block.kind()),
            }
        }
    }
}
