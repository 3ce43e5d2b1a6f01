//! md2rtf-ast: document tree types for md2rtf
//!
//! This crate provides the structured document tree that the RTF writer
//! consumes: blocks (headings, paragraphs, quotes, lists, code, tables, ...)
//! and inline content (text, emphasis, code spans, links, ...).
//!
//! ## Example
//!
//! ```rust
//! use md2rtf_ast::{Block, Document, Inline};
//!
//! let doc = Document::new(vec![
//!     Block::heading(1, vec![Inline::text("Hello")]),
//!     Block::paragraph(vec![Inline::text("World")]),
//! ]);
//!
//! assert_eq!(doc.blocks.len(), 2);
//! assert_eq!(doc.blocks[0].kind(), "Heading");
//! ```

pub mod document;

pub use document::{
    Autolink, Block, CodeBlock, CodeSpan, Document, Emphasis, Heading, Html, HtmlBlock, Inline,
    LineBreak, Link, List, ListItem, Paragraph, Quote, Table, TableCell, TableRow, TaskMarker,
    Text, Unsupported,
};
