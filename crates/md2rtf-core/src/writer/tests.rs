use super::*;
use crate::style::{HEADING_SIZES, TASK_CHECKED};
use md2rtf_ast::Inline;

fn fragment_options() -> RtfOptions {
    RtfOptions {
        envelope: false,
        spacer_paragraphs: false,
    }
}

fn render(blocks: Vec<Block>) -> String {
    document_to_rtf(&Document::new(blocks), &fragment_options())
}

fn para(text: &str) -> Block {
    Block::paragraph(vec![Inline::text(text)])
}

#[test]
fn test_heading() {
    let rtf = render(vec![Block::heading(1, vec![Inline::text("Title")])]);
    assert_eq!(
        rtf,
        "\\pard\\sl276\\slmult1\\f0 \\fs25 \\b \\fs36 Title\\b0 \\fs25 \\par\n"
    );
}

#[test]
fn test_heading_levels() {
    for (level, size) in (1..=6).zip(HEADING_SIZES) {
        let rtf = render(vec![Block::heading(level, vec![Inline::text("H")])]);
        assert!(rtf.contains(&format!(r"\b \fs{size} H")), "level {level}");
    }
    let rtf = render(vec![Block::heading(9, vec![Inline::text("Deep")])]);
    assert!(rtf.contains(r"\b \fs31 Deep"));
}

#[test]
fn test_paragraph() {
    let rtf = render(vec![para("Hello {world}")]);
    assert_eq!(rtf, "\\pard\\sl276\\slmult1\\f0 \\fs25 Hello \\{world\\}\\par\n");
}

#[test]
fn test_spacer_after_blocks() {
    let options = RtfOptions {
        envelope: false,
        spacer_paragraphs: true,
    };
    let doc = Document::new(vec![para("one"), Block::thematic_break(), para("two")]);
    let rtf = document_to_rtf(&doc, &options);
    assert_eq!(rtf.matches(EMPTY_PARAGRAPH).count(), 3);
    assert!(rtf.ends_with(&format!("two\\par\n{EMPTY_PARAGRAPH}\n")));
}

#[test]
fn test_no_spacer_after_code_and_html() {
    let options = RtfOptions {
        envelope: false,
        spacer_paragraphs: true,
    };
    let doc = Document::new(vec![
        Block::code(None, &["x"]),
        Block::html(&["<div>"]),
    ]);
    let rtf = document_to_rtf(&doc, &options);
    assert!(!rtf.contains(EMPTY_PARAGRAPH));
}

#[test]
fn test_spacer_can_be_disabled() {
    let rtf = render(vec![para("one"), para("two")]);
    assert!(!rtf.contains(EMPTY_PARAGRAPH));
}

#[test]
fn test_silent_blocks_emit_nothing() {
    let options = RtfOptions::default();
    let doc = Document::new(vec![Block::BlankLine, Block::LinkReferenceDefinitionGroup]);
    let rtf = document_to_rtf(&doc, &options);
    assert_eq!(rtf, format!("{HEADER}\n{GENERATOR}\n{FOOTER}\n"));
}

#[test]
fn test_envelope() {
    let doc = Document::new(vec![para("body")]);
    let rtf = document_to_rtf(&doc, &RtfOptions::default());
    assert!(rtf.starts_with(r"{\rtf1\ansi"));
    assert!(rtf.contains(r"{\f0\fnil\fcharset0 Calibri;}"));
    assert!(rtf.contains(r"{\f1\fnil\fcharset0 Courier New;}"));
    assert!(rtf.contains(r"{\*\generator md2rtf "));
    assert!(rtf.ends_with("}\n"));

    let bare = document_to_rtf(
        &doc,
        &RtfOptions {
            envelope: false,
            ..Default::default()
        },
    );
    assert!(!bare.contains(r"\rtf1"));
    assert!(bare.starts_with(STANDARD_PARAGRAPH_START));
}

#[test]
fn test_braces_balance_with_envelope() {
    let doc = Document::new(vec![
        Block::heading(2, vec![Inline::text("{unbalanced")]),
        Block::bullet_list(vec![vec![para("a}")]]),
        Block::paragraph(vec![Inline::link("https://example.com")]),
        Block::table(vec![vec![vec![para("x")]]]),
    ]);
    let rtf = document_to_rtf(&doc, &RtfOptions::default());

    let mut depth = 0i32;
    let mut chars = rtf.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                assert!(depth >= 0);
            }
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_code_block_trims_trailing_blank_lines() {
    let rtf = render(vec![Block::code(Some("python"), &["a", "b", "   "])]);
    assert_eq!(
        rtf,
        "\\pard\\sl276\\slmult1\\f1 \\fs25 \\b Language: python \\b0 \\line \na\\line\nb\\par\n"
    );
}

#[test]
fn test_code_block_without_language() {
    let rtf = render(vec![Block::code(None, &["fn main() {", "\tbody", "}"])]);
    assert!(!rtf.contains("Language:"));
    assert!(rtf.contains("fn main() \\{\\line\n\\tab body\\line\n\\}\\par"));
}

#[test]
fn test_code_block_blank_info_and_body() {
    let rtf = render(vec![Block::code(Some("  "), &["", "  "])]);
    assert_eq!(rtf, format!("{CODE_PARAGRAPH_START}\\par\n"));
}

#[test]
fn test_html_block() {
    let rtf = render(vec![Block::html(&["<div>", "  {x}", "</div>", ""])]);
    assert!(rtf.starts_with(CODE_PARAGRAPH_START));
    assert!(rtf.contains("\\b HTML:\\b0 \\line \n<div>\\line\n  \\{x\\}\\line\n</div>\\par\n"));
}

#[test]
fn test_thematic_break() {
    let rtf = render(vec![Block::thematic_break()]);
    assert!(rtf.contains(r"\qc\b \fs32 * * *\b0 \fs25 \par"));
}

#[test]
fn test_quote() {
    let rtf = render(vec![Block::quote(vec![
        para("first"),
        Block::BlankLine,
        para("second"),
    ])]);
    assert!(rtf.starts_with("\\pard\n"));
    assert!(rtf.contains(&format!("{QUOTE_INDENT}first\\line \nsecond\\par\n")));
}

#[test]
fn test_nested_quote_and_unsupported_inside_quote() {
    let rtf = render(vec![Block::quote(vec![
        Block::quote(vec![para("inner")]),
        Block::unsupported("Custom"),
    ])]);
    assert_eq!(rtf.matches(QUOTE_INDENT).count(), 2);
    assert!(rtf.contains("inner"));
    assert!(rtf.contains("/* Unsupported block type: Custom */\\par\n"));
}

#[test]
fn test_unsupported_block_does_not_stop_conversion() {
    let rtf = render(vec![
        para("before"),
        Block::unsupported("MathBlock"),
        para("after"),
    ]);
    assert!(rtf.contains("/* Unsupported block type: MathBlock */"));
    let marker = rtf.find("MathBlock").unwrap();
    let after = rtf.find("after").unwrap();
    assert!(rtf.find("before").unwrap() < marker && marker < after);
}

#[test]
fn test_unsupported_kind_name_is_escaped() {
    let rtf = render(vec![Block::unsupported("Odd{Kind}")]);
    assert!(rtf.contains(r"Odd\{Kind\}"));
}

#[test]
fn test_task_list_paragraph() {
    let rtf = render(vec![Block::bullet_list(vec![vec![Block::paragraph(vec![
        Inline::task_marker(true),
        Inline::text("done"),
    ])]])]);
    assert!(rtf.contains(&format!("{TASK_CHECKED}done")));
}

#[test]
fn test_conversions_are_independent() {
    let doc = Document::new(vec![
        Block::bullet_list(vec![vec![para("a")], vec![para("b")]]),
        Block::table(vec![vec![vec![para("c")], vec![para("d")]]]),
    ]);
    let first = document_to_rtf(&doc, &RtfOptions::default());
    let second = document_to_rtf(&doc, &RtfOptions::default());
    assert_eq!(first, second);
}
