//! Plain-text extraction
//!
//! Strips all Markdown markup and keeps the readable text. Every block ends
//! on its own line; table cells are separated by a tab.

use pulldown_cmark::{Event, Parser, TagEnd};

use crate::parser::parser_options;

/// Convert Markdown to plain text
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let mut out = String::new();

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => end_line(&mut out),
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => {
                let len = out.trim_end_matches('\t').len();
                out.truncate(len);
                end_line(&mut out);
            }
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::Item
                | TagEnd::BlockQuote(_),
            ) => end_line(&mut out),
            _ => {}
        }
    }

    out
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
