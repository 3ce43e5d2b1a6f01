//! Document tree types
//!
//! The tree produced by the markdown front end (or supplied directly by a
//! caller) and consumed read-only by the RTF writer. Block and inline kinds
//! form closed sets, each with one `Unsupported` variant that carries the
//! name of a node kind the writer has no rendering for.
//!
//! Deserialization is total: a node whose `"type"` is not one of the known
//! kinds loads as `Unsupported` carrying that type name, so trees from
//! external parsers never fail on kinds this crate does not model.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a document: an ordered sequence of blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A block-level node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Quote(Quote),
    List(List),
    ThematicBreak,
    CodeBlock(CodeBlock),
    HtmlBlock(HtmlBlock),
    Table(Table),
    /// Blank line between blocks (no visual content)
    BlankLine,
    /// Group of link reference definitions (no visual content)
    LinkReferenceDefinitionGroup,
    Unsupported(Unsupported),
}

/// Heading (levels 1-6 in well-formed input)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Inline>,
}

/// Block quote containing nested blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub children: Vec<Block>,
}

/// Ordered or unordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// List item: its source order number and nested blocks
///
/// `order` is meaningful for ordered lists only and is rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub order: u64,
    pub children: Vec<Block>,
}

/// Fenced or indented code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Fence info string (language tag), if any
    pub info: Option<String>,
    pub lines: Vec<String>,
}

/// Raw HTML block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlBlock {
    pub lines: Vec<String>,
}

/// Table; rows may be ragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<Block>,
}

/// A node kind outside the closed set, identified by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unsupported {
    pub kind: String,
}

/// An inline node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text(Text),
    Emphasis(Emphasis),
    CodeSpan(CodeSpan),
    Link(Link),
    Autolink(Autolink),
    LineBreak(LineBreak),
    TaskMarker(TaskMarker),
    /// Raw inline HTML or an HTML entity, kept as literal text
    Html(Html),
    Unsupported(Unsupported),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Emphasis span, described by its delimiter run (`*`, `**`, `_`, `__`, `~~`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub delimiter: char,
    pub count: u8,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSpan {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
}

/// `<https://...>` or `<user@example.com>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autolink {
    pub url: String,
    pub email: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreak {
    pub hard: bool,
}

/// `[ ]` / `[x]` at the start of a task list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMarker {
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

/// `"type"` tags of the modelled block kinds
const BLOCK_TYPES: &[&str] = &[
    "heading",
    "paragraph",
    "quote",
    "list",
    "thematicBreak",
    "codeBlock",
    "htmlBlock",
    "table",
    "blankLine",
    "linkReferenceDefinitionGroup",
    "unsupported",
];

/// `"type"` tags of the modelled inline kinds
const INLINE_TYPES: &[&str] = &[
    "text",
    "emphasis",
    "codeSpan",
    "link",
    "autolink",
    "lineBreak",
    "taskMarker",
    "html",
    "unsupported",
];

/// A buffered node, split on whether its tag is a modelled kind
enum Tagged {
    Known(Value),
    Unknown(String),
}

impl Tagged {
    fn read<'de, D>(deserializer: D, known: &[&str]) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value.get("type") {
            Some(Value::String(kind)) if !known.contains(&kind.as_str()) => {
                Ok(Tagged::Unknown(kind.clone()))
            }
            // Missing or malformed tags are reported by the derived impl
            _ => Ok(Tagged::Known(value)),
        }
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Block::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Tagged::read(deserializer, BLOCK_TYPES)? {
            Tagged::Known(value) => Block::deserialize(value).map_err(de::Error::custom),
            Tagged::Unknown(kind) => Ok(Block::unsupported(kind)),
        }
    }
}

impl Serialize for Inline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Inline::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Inline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Tagged::read(deserializer, INLINE_TYPES)? {
            Tagged::Known(value) => Inline::deserialize(value).map_err(de::Error::custom),
            Tagged::Unknown(kind) => Ok(Inline::unsupported(kind)),
        }
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

// Convenience constructors
impl Block {
    pub fn heading(level: u8, children: Vec<Inline>) -> Self {
        Block::Heading(Heading { level, children })
    }

    pub fn paragraph(children: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph { children })
    }

    pub fn quote(children: Vec<Block>) -> Self {
        Block::Quote(Quote { children })
    }

    pub fn list(ordered: bool, items: Vec<ListItem>) -> Self {
        Block::List(List { ordered, items })
    }

    /// Unordered list; every item gets order 0
    pub fn bullet_list(items: Vec<Vec<Block>>) -> Self {
        Block::List(List {
            ordered: false,
            items: items
                .into_iter()
                .map(|children| ListItem { order: 0, children })
                .collect(),
        })
    }

    /// Ordered list numbered consecutively from `start`
    pub fn ordered_list_from(start: u64, items: Vec<Vec<Block>>) -> Self {
        Block::List(List {
            ordered: true,
            items: items
                .into_iter()
                .zip(start..)
                .map(|(children, order)| ListItem { order, children })
                .collect(),
        })
    }

    pub fn thematic_break() -> Self {
        Block::ThematicBreak
    }

    pub fn code(info: Option<&str>, lines: &[&str]) -> Self {
        Block::CodeBlock(CodeBlock {
            info: info.map(str::to_string),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        })
    }

    pub fn html(lines: &[&str]) -> Self {
        Block::HtmlBlock(HtmlBlock {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Table from rows of cells, each cell being a block sequence
    pub fn table(rows: Vec<Vec<Vec<Block>>>) -> Self {
        Block::Table(Table {
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells
                        .into_iter()
                        .map(|children| TableCell { children })
                        .collect(),
                })
                .collect(),
        })
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Block::Unsupported(Unsupported { kind: kind.into() })
    }

    /// Name of this block kind, used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Block::Heading(_) => "Heading",
            Block::Paragraph(_) => "Paragraph",
            Block::Quote(_) => "Quote",
            Block::List(_) => "List",
            Block::ThematicBreak => "ThematicBreak",
            Block::CodeBlock(_) => "CodeBlock",
            Block::HtmlBlock(_) => "HtmlBlock",
            Block::Table(_) => "Table",
            Block::BlankLine => "BlankLine",
            Block::LinkReferenceDefinitionGroup => "LinkReferenceDefinitionGroup",
            Block::Unsupported(u) => &u.kind,
        }
    }
}

impl ListItem {
    pub fn new(order: u64, children: Vec<Block>) -> Self {
        Self { order, children }
    }
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(Text { value: s.into() })
    }

    pub fn emphasis(delimiter: char, count: u8, children: Vec<Inline>) -> Self {
        Inline::Emphasis(Emphasis {
            delimiter,
            count,
            children,
        })
    }

    /// `*text*`
    pub fn italic(children: Vec<Inline>) -> Self {
        Self::emphasis('*', 1, children)
    }

    /// `**text**`
    pub fn bold(children: Vec<Inline>) -> Self {
        Self::emphasis('*', 2, children)
    }

    pub fn code_span(value: impl Into<String>) -> Self {
        Inline::CodeSpan(CodeSpan {
            value: value.into(),
        })
    }

    pub fn link(url: impl Into<String>) -> Self {
        Inline::Link(Link {
            url: url.into(),
            title: None,
        })
    }

    pub fn link_with_title(url: impl Into<String>, title: impl Into<String>) -> Self {
        Inline::Link(Link {
            url: url.into(),
            title: Some(title.into()),
        })
    }

    pub fn autolink(url: impl Into<String>, email: bool) -> Self {
        Inline::Autolink(Autolink {
            url: url.into(),
            email,
        })
    }

    pub fn line_break(hard: bool) -> Self {
        Inline::LineBreak(LineBreak { hard })
    }

    pub fn task_marker(checked: bool) -> Self {
        Inline::TaskMarker(TaskMarker { checked })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Inline::Html(Html {
            value: value.into(),
        })
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Inline::Unsupported(Unsupported { kind: kind.into() })
    }

    /// Name of this inline kind, used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Inline::Text(_) => "Text",
            Inline::Emphasis(_) => "Emphasis",
            Inline::CodeSpan(_) => "CodeSpan",
            Inline::Link(_) => "Link",
            Inline::Autolink(_) => "Autolink",
            Inline::LineBreak(_) => "LineBreak",
            Inline::TaskMarker(_) => "TaskMarker",
            Inline::Html(_) => "Html",
            Inline::Unsupported(u) => &u.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_constructors() {
        let heading = Block::heading(2, vec![Inline::text("Title")]);
        assert!(matches!(heading, Block::Heading(Heading { level: 2, .. })));

        let para = Block::paragraph(vec![Inline::text("content")]);
        assert!(matches!(para, Block::Paragraph(_)));

        let code = Block::code(Some("rust"), &["fn main() {}"]);
        if let Block::CodeBlock(c) = code {
            assert_eq!(c.info.as_deref(), Some("rust"));
            assert_eq!(c.lines, vec!["fn main() {}".to_string()]);
        } else {
            panic!("Expected CodeBlock");
        }
    }

    #[test]
    fn test_list_constructors() {
        let bullets = Block::bullet_list(vec![
            vec![Block::paragraph(vec![Inline::text("a")])],
            vec![Block::paragraph(vec![Inline::text("b")])],
        ]);
        if let Block::List(l) = bullets {
            assert!(!l.ordered);
            assert!(l.items.iter().all(|i| i.order == 0));
        } else {
            panic!("Expected List");
        }

        let ordered = Block::ordered_list_from(
            5,
            vec![
                vec![Block::paragraph(vec![Inline::text("five")])],
                vec![Block::paragraph(vec![Inline::text("six")])],
            ],
        );
        if let Block::List(l) = ordered {
            assert!(l.ordered);
            let orders: Vec<u64> = l.items.iter().map(|i| i.order).collect();
            assert_eq!(orders, vec![5, 6]);
        } else {
            panic!("Expected List");
        }
    }

    #[test]
    fn test_table_constructor_keeps_ragged_rows() {
        let table = Block::table(vec![
            vec![vec![], vec![]],
            vec![vec![], vec![], vec![]],
            vec![vec![]],
        ]);
        if let Block::Table(t) = table {
            let counts: Vec<usize> = t.rows.iter().map(|r| r.cells.len()).collect();
            assert_eq!(counts, vec![2, 3, 1]);
        } else {
            panic!("Expected Table");
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Block::thematic_break().kind(), "ThematicBreak");
        assert_eq!(Block::unsupported("MathBlock").kind(), "MathBlock");
        assert_eq!(Inline::task_marker(true).kind(), "TaskMarker");
        assert_eq!(Inline::unsupported("MathInline").kind(), "MathInline");
    }

    #[test]
    fn test_serde_tagging() {
        let block = Block::paragraph(vec![Inline::bold(vec![Inline::text("hi")])]);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["children"][0]["type"], "emphasis");
        assert_eq!(json["children"][0]["delimiter"], "*");
        assert_eq!(json["children"][0]["count"], 2);

        let rule = serde_json::to_value(Block::thematic_break()).unwrap();
        assert_eq!(rule["type"], "thematicBreak");
    }

    #[test]
    fn test_unknown_types_load_as_unsupported() {
        let doc: Document = serde_json::from_str(
            r#"{"blocks":[
                {"type":"paragraph","children":[
                    {"type":"text","value":"x = "},
                    {"type":"mathInline","tex":"y"}
                ]},
                {"type":"mathBlock","lines":["x"]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            doc.blocks,
            vec![
                Block::paragraph(vec![Inline::text("x = "), Inline::unsupported("mathInline")]),
                Block::unsupported("mathBlock"),
            ]
        );
    }

    #[test]
    fn test_known_type_with_bad_fields_is_an_error() {
        let result: Result<Block, _> = serde_json::from_str(r#"{"type":"heading","level":"one"}"#);
        assert!(result.is_err());

        let result: Result<Block, _> = serde_json::from_str(r#"{"children":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let doc = Document::new(vec![
            Block::heading(1, vec![Inline::text("Title")]),
            Block::quote(vec![Block::paragraph(vec![
                Inline::text("Hello "),
                Inline::italic(vec![Inline::text("world")]),
                Inline::autolink("a@b.c", true),
            ])]),
            Block::unsupported("FootnoteDefinition"),
        ]);

        let json = serde_json::to_string(&doc).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }
}
