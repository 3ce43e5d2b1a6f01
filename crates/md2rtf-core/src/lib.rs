//! md2rtf-core: Core library for converting Markdown to RTF
//!
//! This crate provides:
//! - Markdown parsing into a document tree (pulldown-cmark front end)
//! - Document tree to RTF conversion
//! - Plain-text extraction
//!
//! ## Example
//!
//! ```rust
//! use md2rtf_core::{RtfOptions, markdown_to_rtf};
//!
//! let rtf = markdown_to_rtf("# Hello", &RtfOptions::default());
//! assert!(rtf.starts_with("{\\rtf1"));
//! assert!(rtf.contains("Hello"));
//! ```

pub mod error;
pub mod escape;
pub mod parser;
pub mod plain;
pub mod style;
pub mod writer;

pub use error::{Error, Result};
pub use escape::escape_rtf;
pub use md2rtf_ast::{Block, Document, Inline};
pub use parser::{document_from_json, parse_markdown};
pub use plain::markdown_to_plain_text;
pub use writer::{RtfOptions, document_to_rtf};

/// Parse Markdown and convert it to RTF in one step
pub fn markdown_to_rtf(markdown: &str, options: &RtfOptions) -> String {
    let doc = parse_markdown(markdown);
    document_to_rtf(&doc, options)
}
