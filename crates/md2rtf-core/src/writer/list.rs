//! Ordered and unordered lists
//!
//! Each item paragraph starts with a `\pntext` marker. The paragraph
//! numbering definition (`\pn...`) and the indentation are only written
//! for the first item seen at a nesting level, tracked by [`ListState`].
//!
//! ```text
//! \pard{\pntext\f0 1.\tab}{\*\pn\pnlvlbody\pnf0\pnindent0\pnstart1\pndec{\pntxta.}}
//! \fi-360\li720\sl276\slmult1 First item\par
//! {\pntext\f0 2.\tab}Second item\par
//! ```

use md2rtf_ast::{Block, List};

use super::Writer;
use crate::style::{
    HANGING_INDENT, LEFT_INDENT, LINE_SPACING_1_15, LINE_SPACING_MULTIPLIER, PARAGRAPH_END,
    PARAGRAPH_START, list_indent,
};

/// Nesting level of the last rendered list item.
///
/// Scoped to one top-level list traversal and threaded through the
/// recursion; nested lists leave it at their own level on return.
#[derive(Debug, Default)]
pub(super) struct ListState {
    last_level: Option<usize>,
}

impl Writer<'_> {
    pub(super) fn write_list(&mut self, list: &List, level: usize, state: &mut ListState) {
        for item in &list.items {
            for child in &item.children {
                match child {
                    Block::List(nested) => self.write_list(nested, level + 1, state),
                    Block::BlankLine | Block::LinkReferenceDefinitionGroup => {}
                    content => {
                        self.write_item_preamble(list.ordered, item.order, level, state);
                        self.write_item_content(content);
                        self.push_line(PARAGRAPH_END);
                        state.last_level = Some(level);
                    }
                }
            }
        }
    }

    /// Marker, plus the numbering definition when entering a new level
    fn write_item_preamble(&mut self, ordered: bool, order: u64, level: usize, state: &ListState) {
        let new_level = state.last_level != Some(level);
        if new_level {
            self.push(PARAGRAPH_START);
        }

        if ordered {
            self.push(&format!(r"{{\pntext\f0 {}.\tab}}", order));
            if new_level {
                self.push(&format!(
                    r"{{\*\pn\pnlvlbody\pnf0\pnindent0\pnstart{}\pndec{{\pntxta.}}}}",
                    order
                ));
                self.output.push('\n');
            }
        } else {
            self.push(r"{\pntext\f0\'B7\tab}");
            if new_level {
                self.push(r"{\*\pn\pnlvlblt\pnf0\pnindent0{\pntxtb\'B7}}");
            }
        }

        if new_level {
            self.push(HANGING_INDENT);
            self.push(LEFT_INDENT);
            self.push(&list_indent(level).to_string());
            self.push(LINE_SPACING_1_15);
            self.push(LINE_SPACING_MULTIPLIER);
            self.output.push(' ');
        }
    }

    fn write_item_content(&mut self, content: &Block) {
        match content {
            Block::Heading(h) => self.write_heading(h),
            Block::Paragraph(p) => self.write_inlines(&p.children),
            Block::Quote(q) => self.write_quote(q),
            Block::CodeBlock(c) => self.write_nested_code_block(c),
            Block::ThematicBreak => self.write_thematic_break(),
            Block::HtmlBlock(h) => self.write_nested_html_block(h),
            Block::Table(t) => self.write_table(t),
            Block::Unsupported(u) => self.write_unsupported_block(&u.kind),
            // Handled by write_list
            Block::List(_) | Block::BlankLine | Block::LinkReferenceDefinitionGroup => {}
        }
    }
}
