//! Inline content: text, emphasis, code spans, links, breaks, task markers

use log::warn;
use md2rtf_ast::{Emphasis, Inline, Link};

use super::Writer;
use crate::escape::push_escaped;
use crate::style::{
    EmphasisStyle, FONT_CODE, FONT_STANDARD, LINE_BREAK, TASK_CHECKED, TASK_UNCHECKED, UNDERLINE,
    UNDERLINE_END,
};

/// Display text for links without a usable URL or title
const LINK_FALLBACK_TEXT: &str = "URL Link";

impl Writer<'_> {
    pub(super) fn write_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.write_inline(inline);
        }
    }

    fn write_inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(t) => push_escaped(&mut self.output, &t.value),
            Inline::Emphasis(e) => self.write_emphasis(e),
            Inline::CodeSpan(c) => {
                self.push(FONT_CODE);
                push_escaped(&mut self.output, &c.value);
                self.push(FONT_STANDARD);
            }
            Inline::Link(l) => self.write_link(l),
            Inline::Autolink(a) => {
                if a.email {
                    let target = format!("mailto:{}", a.url);
                    self.write_hyperlink(&target, &a.url, true);
                } else {
                    self.write_hyperlink(&a.url, &a.url, true);
                }
            }
            // Soft and hard breaks render the same
            Inline::LineBreak(_) => {
                self.push(LINE_BREAK);
                self.push_line(" ");
            }
            // Fixed unicode escapes, not routed through the escaper
            Inline::TaskMarker(t) => {
                self.push(if t.checked {
                    TASK_CHECKED
                } else {
                    TASK_UNCHECKED
                });
            }
            Inline::Html(h) => push_escaped(&mut self.output, &h.value),
            Inline::Unsupported(u) => {
                warn!("Unsupported inline type: {}", u.kind);
                self.write_marker("inline", &u.kind);
            }
        }
    }

    fn write_emphasis(&mut self, e: &Emphasis) {
        let style = EmphasisStyle::from_delimiter(e.delimiter, e.count);

        if let Some(style) = style {
            self.push(style.open());
        }
        self.write_inlines(&e.children);
        if let Some(style) = style {
            self.push(style.close());
        }
    }

    fn write_link(&mut self, l: &Link) {
        let display = match l.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ if !l.url.is_empty() => l.url.as_str(),
            _ => LINK_FALLBACK_TEXT,
        };
        self.write_hyperlink(&l.url, display, false);
    }

    /// `{\field{\*\fldinst{HYPERLINK "target"}}{\fldrslt display}}`
    ///
    /// Only autolinks underline their display text.
    fn write_hyperlink(&mut self, target: &str, display: &str, underline: bool) {
        self.push(r#"{\field{\*\fldinst{HYPERLINK ""#);
        push_escaped(&mut self.output, target);
        self.push(r#""}}{\fldrslt "#);
        if underline {
            self.push(UNDERLINE);
        }
        push_escaped(&mut self.output, display);
        if underline {
            self.push(UNDERLINE_END);
        }
        self.push("}}");
    }
}
