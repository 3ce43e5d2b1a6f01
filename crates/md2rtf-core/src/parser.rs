//! Markdown front end
//!
//! Builds a [`Document`] from pulldown-cmark's event stream, with tables,
//! task lists, strikethrough, footnotes and math enabled. Node kinds the
//! RTF writer has no rendering for (footnote definitions, math, ...) are
//! kept as `Unsupported` nodes so they show up as markers in the output.
//!
//! pulldown-cmark does not wrap the text of tight list items or table
//! cells in a paragraph; the builder opens an implicit paragraph whenever
//! inline content lands directly in a block container.

use std::ops::Range;

use log::debug;
use md2rtf_ast::{
    Autolink, Block, CodeBlock, Document, Emphasis, Heading, HtmlBlock, Inline, Link, List,
    ListItem, Paragraph, Quote, Table, TableCell, TableRow, Text, Unsupported,
};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};

use crate::error::Result;

/// Parser extensions used for both RTF and plain-text output
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH
}

/// Parse Markdown into a document tree
pub fn parse_markdown(markdown: &str) -> Document {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut builder = TreeBuilder::new(markdown);

    for (event, range) in parser.into_offset_iter() {
        builder.process_event(event, range);
    }

    builder.finish()
}

/// Load a document tree serialized as JSON
pub fn document_from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// A node under construction
enum Frame {
    Container {
        kind: ContainerKind,
        blocks: Vec<Block>,
    },
    List {
        ordered: bool,
        next_order: u64,
        items: Vec<ListItem>,
    },
    Table {
        rows: Vec<TableRow>,
    },
    Row {
        cells: Vec<TableCell>,
    },
    /// Paragraph or heading collecting inline content
    Leaf {
        kind: LeafKind,
        inlines: Vec<Inline>,
    },
    /// Inline node with nested inline content
    Span {
        kind: SpanKind,
        inlines: Vec<Inline>,
    },
    /// Code or HTML block collecting raw text
    Literal {
        info: Option<String>,
        html: bool,
        text: String,
    },
}

enum ContainerKind {
    Document,
    Quote,
    Item { order: u64 },
    Cell,
}

#[derive(PartialEq)]
enum LeafKind {
    Paragraph,
    /// Paragraph opened for bare inline content; has no end event
    ImplicitParagraph,
    Heading(u8),
}

enum SpanKind {
    Emphasis { delimiter: char, count: u8 },
    Link { url: String, title: Option<String> },
    Autolink { url: String, email: bool },
}

struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Frame>,
    /// Nesting depth inside a skipped (unsupported) element
    skip_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: vec![Frame::Container {
                kind: ContainerKind::Document,
                blocks: Vec::new(),
            }],
            skip_depth: 0,
        }
    }

    fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        if self.skip_depth > 0 {
            match event {
                Event::Start(_) => self.skip_depth += 1,
                Event::End(_) => self.skip_depth -= 1,
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start_tag(tag, range),
            Event::End(_) => self.end_tag(),
            Event::Text(text) => {
                if let Some(Frame::Literal { text: buf, .. }) = self.stack.last_mut() {
                    buf.push_str(&text);
                } else {
                    self.push_inline(Inline::text(text.into_string()));
                }
            }
            Event::Code(code) => self.push_inline(Inline::code_span(code.into_string())),
            Event::InlineMath(_) => self.push_inline(Inline::unsupported("MathInline")),
            Event::DisplayMath(_) => self.push_inline(Inline::unsupported("MathBlock")),
            Event::Html(html) => {
                if let Some(Frame::Literal { text, .. }) = self.stack.last_mut() {
                    text.push_str(&html);
                } else {
                    self.push_inline(Inline::html(html.into_string()));
                }
            }
            Event::InlineHtml(html) => self.push_inline(Inline::html(html.into_string())),
            Event::FootnoteReference(_) => {
                self.push_inline(Inline::unsupported("FootnoteReference"))
            }
            Event::SoftBreak => self.push_inline(Inline::line_break(false)),
            Event::HardBreak => self.push_inline(Inline::line_break(true)),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::TaskListMarker(checked) => self.push_inline(Inline::task_marker(checked)),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Leaf {
                kind: LeafKind::Paragraph,
                inlines: Vec::new(),
            },
            Tag::Heading { level, .. } => Frame::Leaf {
                kind: LeafKind::Heading(level as u8),
                inlines: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::Container {
                kind: ContainerKind::Quote,
                blocks: Vec::new(),
            },
            Tag::CodeBlock(kind) => Frame::Literal {
                info: match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.into_string()),
                    _ => None,
                },
                html: false,
                text: String::new(),
            },
            Tag::HtmlBlock => Frame::Literal {
                info: None,
                html: true,
                text: String::new(),
            },
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                next_order: start.unwrap_or(0),
                items: Vec::new(),
            },
            Tag::Item => {
                self.close_implicit_paragraph();
                let order = match self.stack.last_mut() {
                    Some(Frame::List {
                        ordered: true,
                        next_order,
                        ..
                    }) => {
                        let order = *next_order;
                        *next_order += 1;
                        order
                    }
                    _ => 0,
                };
                Frame::Container {
                    kind: ContainerKind::Item { order },
                    blocks: Vec::new(),
                }
            }
            Tag::Table(_) => Frame::Table { rows: Vec::new() },
            Tag::TableHead | Tag::TableRow => Frame::Row { cells: Vec::new() },
            Tag::TableCell => Frame::Container {
                kind: ContainerKind::Cell,
                blocks: Vec::new(),
            },
            Tag::Emphasis => Frame::Span {
                kind: SpanKind::Emphasis {
                    delimiter: self.delimiter_at(range.start, '*'),
                    count: 1,
                },
                inlines: Vec::new(),
            },
            Tag::Strong => Frame::Span {
                kind: SpanKind::Emphasis {
                    delimiter: self.delimiter_at(range.start, '*'),
                    count: 2,
                },
                inlines: Vec::new(),
            },
            Tag::Strikethrough => Frame::Span {
                kind: SpanKind::Emphasis {
                    delimiter: '~',
                    count: self.tilde_run_at(range.start),
                },
                inlines: Vec::new(),
            },
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let kind = match link_type {
                    LinkType::Autolink | LinkType::Email => SpanKind::Autolink {
                        url: dest_url.into_string(),
                        email: link_type == LinkType::Email,
                    },
                    _ => SpanKind::Link {
                        url: dest_url.into_string(),
                        title: non_empty(title.into_string()),
                    },
                };
                Frame::Span {
                    kind,
                    inlines: Vec::new(),
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => Frame::Span {
                kind: SpanKind::Link {
                    url: dest_url.into_string(),
                    title: non_empty(title.into_string()),
                },
                inlines: Vec::new(),
            },
            Tag::FootnoteDefinition(_) => return self.skip_block("FootnoteDefinition"),
            Tag::MetadataBlock(_) => return self.skip_block("MetadataBlock"),
            Tag::DefinitionList => return self.skip_block("DefinitionList"),
            other => {
                let name = tag_name(&other);
                debug!("Skipping unsupported inline element: {}", name);
                self.push_inline(Inline::unsupported(name));
                self.skip_depth = 1;
                return;
            }
        };

        if matches!(
            frame,
            Frame::Container { .. }
                | Frame::List { .. }
                | Frame::Table { .. }
                | Frame::Leaf { .. }
                | Frame::Literal { .. }
        ) {
            self.close_implicit_paragraph();
        }
        self.stack.push(frame);
    }

    fn end_tag(&mut self) {
        self.close_implicit_paragraph();

        // The document frame is never closed by an event
        if self.stack.len() < 2 {
            return;
        }
        if let Some(frame) = self.stack.pop() {
            self.attach(frame);
        }
    }

    /// Turn a finished frame into a node and add it to its parent
    fn attach(&mut self, frame: Frame) {
        match frame {
            Frame::Container { kind, blocks } => match kind {
                ContainerKind::Document => {}
                ContainerKind::Quote => self.push_block(Block::Quote(Quote { children: blocks })),
                ContainerKind::Item { order } => {
                    if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                        items.push(ListItem {
                            order,
                            children: blocks,
                        });
                    }
                }
                ContainerKind::Cell => {
                    if let Some(Frame::Row { cells }) = self.stack.last_mut() {
                        cells.push(TableCell { children: blocks });
                    }
                }
            },
            Frame::List { ordered, items, .. } => {
                self.push_block(Block::List(List { ordered, items }))
            }
            Frame::Table { rows } => self.push_block(Block::Table(Table { rows })),
            Frame::Row { cells } => {
                if let Some(Frame::Table { rows }) = self.stack.last_mut() {
                    rows.push(TableRow { cells });
                }
            }
            Frame::Leaf { kind, inlines } => match kind {
                LeafKind::Heading(level) => self.push_block(Block::Heading(Heading {
                    level,
                    children: inlines,
                })),
                LeafKind::Paragraph | LeafKind::ImplicitParagraph => {
                    if is_display_math(&inlines) {
                        self.push_block(Block::unsupported("MathBlock"));
                    } else {
                        self.push_block(Block::Paragraph(Paragraph { children: inlines }));
                    }
                }
            },
            Frame::Span { kind, inlines } => {
                let inline = match kind {
                    SpanKind::Emphasis { delimiter, count } => Inline::Emphasis(Emphasis {
                        delimiter,
                        count,
                        children: inlines,
                    }),
                    // Links render from their destination and title only
                    SpanKind::Link { url, title } => Inline::Link(Link { url, title }),
                    SpanKind::Autolink { url, email } => Inline::Autolink(Autolink { url, email }),
                };
                self.push_inline(inline);
            }
            Frame::Literal { info, html, text } => {
                let lines = text.lines().map(str::to_string).collect();
                let block = if html {
                    Block::HtmlBlock(HtmlBlock { lines })
                } else {
                    Block::CodeBlock(CodeBlock { info, lines })
                };
                self.push_block(block);
            }
        }
    }

    fn push_block(&mut self, block: Block) {
        self.close_implicit_paragraph();
        match self.stack.last_mut() {
            Some(Frame::Container { blocks, .. }) => blocks.push(block),
            _ => debug!("Dropping {} outside a block container", block.kind()),
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        if matches!(self.stack.last(), Some(Frame::Container { .. })) {
            self.stack.push(Frame::Leaf {
                kind: LeafKind::ImplicitParagraph,
                inlines: Vec::new(),
            });
        }

        match self.stack.last_mut() {
            Some(Frame::Leaf { inlines, .. } | Frame::Span { inlines, .. }) => {
                // pulldown-cmark splits text runs at some punctuation; join them back
                if let (Some(Inline::Text(prev)), Inline::Text(Text { value })) =
                    (inlines.last_mut(), &inline)
                {
                    prev.value.push_str(value);
                } else {
                    inlines.push(inline);
                }
            }
            _ => debug!("Dropping {} outside inline content", inline.kind()),
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Leaf {
                kind: LeafKind::ImplicitParagraph,
                ..
            })
        ) && let Some(frame) = self.stack.pop()
        {
            self.attach(frame);
        }
    }

    /// Record an unsupported block and ignore its content
    fn skip_block(&mut self, kind: &str) {
        debug!("Skipping unsupported block: {}", kind);
        self.push_block(Block::Unsupported(Unsupported {
            kind: kind.to_string(),
        }));
        self.skip_depth = 1;
    }

    fn delimiter_at(&self, offset: usize, default: char) -> char {
        self.source[offset..]
            .chars()
            .next()
            .filter(|c| matches!(c, '*' | '_'))
            .unwrap_or(default)
    }

    fn tilde_run_at(&self, offset: usize) -> u8 {
        let run = self.source[offset..]
            .chars()
            .take_while(|&c| c == '~')
            .count();
        run.clamp(1, 2) as u8
    }

    fn finish(mut self) -> Document {
        self.close_implicit_paragraph();
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop() {
                self.attach(frame);
            }
        }
        match self.stack.pop() {
            Some(Frame::Container { blocks, .. }) => Document::new(blocks),
            _ => Document::default(),
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// A paragraph holding nothing but display math stands for a math block
fn is_display_math(inlines: &[Inline]) -> bool {
    let mut content = inlines.iter().filter(|inline| match inline {
        Inline::LineBreak(_) => false,
        Inline::Text(t) => !t.value.trim().is_empty(),
        _ => true,
    });
    matches!(
        (content.next(), content.next()),
        (Some(Inline::Unsupported(u)), None) if u.kind == "MathBlock"
    )
}

/// Marker name for a tag the builder does not model
fn tag_name(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Superscript => "Superscript",
        Tag::Subscript => "Subscript",
        Tag::DefinitionListTitle => "DefinitionListTitle",
        Tag::DefinitionListDefinition => "DefinitionListDefinition",
        Tag::FootnoteDefinition(_) => "FootnoteDefinition",
        Tag::MetadataBlock(_) => "MetadataBlock",
        Tag::DefinitionList => "DefinitionList",
        _ => "Unknown",
    }
}
