//! Document tree to RTF writer
//!
//! Walks a [`Document`] and appends RTF to a single output buffer. Block
//! kinds are dispatched here; inline content, lists and tables live in the
//! submodules. Unsupported node kinds never abort the conversion: they are
//! replaced with a visible marker naming the kind.

mod inline;
mod list;
mod table;

#[cfg(test)]
mod tests;

use log::{debug, warn};
use md2rtf_ast::{Block, CodeBlock, Document, Heading, HtmlBlock, Quote};

use crate::escape::push_escaped;
use crate::style::{
    BOLD, BOLD_END, CODE_PARAGRAPH_START, EMPTY_PARAGRAPH, FONT_CODE, FONT_SIZE, FONT_SIZE_DEFAULT,
    FONT_STANDARD, FOOTER, GENERATOR, HEADER, LINE_BREAK, PARAGRAPH_END, PARAGRAPH_START,
    QUOTE_INDENT, STANDARD_PARAGRAPH_START, TAB, heading_font_size,
};

use list::ListState;

/// Options for the RTF writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtfOptions {
    /// Wrap the output in the RTF document envelope (font table, generator, closing brace).
    /// Disable to get a fragment for splicing into an existing document.
    pub envelope: bool,
    /// Insert an empty paragraph after each block (except code and HTML blocks)
    pub spacer_paragraphs: bool,
}

impl Default for RtfOptions {
    fn default() -> Self {
        Self {
            envelope: true,
            spacer_paragraphs: true,
        }
    }
}

/// Convert a document tree to RTF
pub fn document_to_rtf(doc: &Document, options: &RtfOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_document(doc);
    writer.output
}

/// RTF writer state
struct Writer<'a> {
    options: &'a RtfOptions,
    output: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a RtfOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn write_document(&mut self, doc: &Document) {
        debug!("Converting document with {} blocks", doc.blocks.len());

        if self.options.envelope {
            self.push_line(HEADER);
            self.push_line(GENERATOR);
        }

        for block in &doc.blocks {
            self.write_top_level_block(block);
        }

        if self.options.envelope {
            self.push_line(FOOTER);
        }
    }

    fn write_top_level_block(&mut self, block: &Block) {
        // Code and HTML blocks end their own paragraph and get no spacer
        let spaced = match block {
            Block::Heading(h) => {
                self.push(STANDARD_PARAGRAPH_START);
                self.write_heading(h);
                self.push_line(PARAGRAPH_END);
                true
            }
            Block::Paragraph(p) => {
                self.push(STANDARD_PARAGRAPH_START);
                self.write_inlines(&p.children);
                self.push_line(PARAGRAPH_END);
                true
            }
            Block::Quote(q) => {
                self.push_line(PARAGRAPH_START);
                self.push(STANDARD_PARAGRAPH_START);
                self.write_quote(q);
                self.push_line(PARAGRAPH_END);
                true
            }
            Block::List(l) => {
                self.write_list(l, 0, &mut ListState::default());
                true
            }
            Block::ThematicBreak => {
                self.push(STANDARD_PARAGRAPH_START);
                self.write_thematic_break();
                self.push_line(PARAGRAPH_END);
                true
            }
            Block::CodeBlock(c) => {
                self.push(CODE_PARAGRAPH_START);
                self.write_code_block(c);
                self.push_line(PARAGRAPH_END);
                false
            }
            Block::HtmlBlock(h) => {
                self.push(CODE_PARAGRAPH_START);
                self.write_html_block(h);
                self.push_line(PARAGRAPH_END);
                false
            }
            Block::Table(t) => {
                self.write_table(t);
                true
            }
            Block::BlankLine | Block::LinkReferenceDefinitionGroup => false,
            Block::Unsupported(u) => {
                self.push(STANDARD_PARAGRAPH_START);
                self.write_unsupported_block(&u.kind);
                self.push_line(PARAGRAPH_END);
                true
            }
        };

        if spaced && self.options.spacer_paragraphs {
            self.push_line(EMPTY_PARAGRAPH);
        }
    }

    fn write_heading(&mut self, h: &Heading) {
        self.push(BOLD);
        self.push(FONT_SIZE);
        self.push(&heading_font_size(h.level).to_string());
        self.output.push(' ');
        self.write_inlines(&h.children);
        self.push(BOLD_END);
        self.push(FONT_SIZE_DEFAULT);
    }

    fn write_quote(&mut self, q: &Quote) {
        self.push(QUOTE_INDENT);

        let visible = q.children.iter().filter(|b| !is_silent(b));
        for (i, child) in visible.enumerate() {
            if i > 0 {
                self.push(LINE_BREAK);
                self.push_line(" ");
            }
            match child {
                Block::Heading(h) => self.write_heading(h),
                Block::Paragraph(p) => self.write_inlines(&p.children),
                Block::Quote(nested) => self.write_quote(nested),
                Block::List(l) => self.write_list(l, 0, &mut ListState::default()),
                Block::CodeBlock(c) => self.write_nested_code_block(c),
                Block::ThematicBreak => self.write_thematic_break(),
                Block::HtmlBlock(h) => self.write_nested_html_block(h),
                Block::Table(t) => self.write_table(t),
                Block::BlankLine | Block::LinkReferenceDefinitionGroup => {}
                Block::Unsupported(u) => {
                    self.push(STANDARD_PARAGRAPH_START);
                    self.write_unsupported_block(&u.kind);
                    self.push_line(PARAGRAPH_END);
                }
            }
        }
    }

    fn write_thematic_break(&mut self) {
        self.push(r"\qc");
        self.push(BOLD);
        self.push(FONT_SIZE);
        self.push(&heading_font_size(5).to_string());
        self.push(" * * *");
        self.push(BOLD_END);
        self.push(FONT_SIZE_DEFAULT);
    }

    fn write_code_block(&mut self, c: &CodeBlock) {
        if let Some(lang) = c.info.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            self.push(BOLD);
            self.push("Language: ");
            push_escaped(&mut self.output, lang);
            self.output.push(' ');
            self.push(BOLD_END);
            self.push(LINE_BREAK);
            self.push_line(" ");
        }
        self.write_literal_lines(&c.lines);
    }

    fn write_html_block(&mut self, h: &HtmlBlock) {
        self.push(BOLD);
        self.push("HTML:");
        self.push(BOLD_END);
        self.push(LINE_BREAK);
        self.push_line(" ");
        self.write_literal_lines(&h.lines);
    }

    /// Code block inside another block: switch fonts instead of opening a code paragraph
    fn write_nested_code_block(&mut self, c: &CodeBlock) {
        self.push(FONT_CODE);
        self.write_code_block(c);
        self.push(FONT_STANDARD);
    }

    fn write_nested_html_block(&mut self, h: &HtmlBlock) {
        self.push(FONT_CODE);
        self.write_html_block(h);
        self.push(FONT_STANDARD);
    }

    /// Write verbatim lines joined by line breaks, dropping trailing blank lines
    fn write_literal_lines(&mut self, lines: &[String]) {
        let Some(last) = lines.iter().rposition(|l| !l.trim().is_empty()) else {
            return;
        };

        for (i, line) in lines[..=last].iter().enumerate() {
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    self.push(TAB);
                }
                push_escaped(&mut self.output, segment);
            }
            if i < last {
                self.push_line(LINE_BREAK);
            }
        }
    }

    fn write_unsupported_block(&mut self, kind: &str) {
        warn!("Unsupported block type: {}", kind);
        self.write_marker("block", kind);
    }

    /// Visible placeholder for a node kind without an RTF rendering
    fn write_marker(&mut self, category: &str, kind: &str) {
        self.push("/* Unsupported ");
        self.push(category);
        self.push(" type: ");
        push_escaped(&mut self.output, kind);
        self.push(" */");
    }

    // Helper methods

    fn push(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn push_line(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}

/// Blocks that carry no visual content
fn is_silent(block: &Block) -> bool {
    matches!(
        block,
        Block::BlankLine | Block::LinkReferenceDefinitionGroup
    )
}
