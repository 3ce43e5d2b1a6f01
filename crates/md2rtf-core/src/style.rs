//! RTF control words and fixed layout values
//!
//! Font sizes are in half-points (`\fs36` is 18pt). Font `\f0` is the body
//! font and `\f1` the fixed-width code font, matching the font table in
//! [`HEADER`].

/// Document preamble: font table with the body and code fonts
pub const HEADER: &str = r"{\rtf1\ansi\ansicpg1252\deff0\nouicompat{\fonttbl{\f0\fnil\fcharset0 Calibri;}{\f1\fnil\fcharset0 Courier New;}}";
/// Generator tag and view settings following the font table
pub const GENERATOR: &str = concat!(
    r"{\*\generator md2rtf ",
    env!("CARGO_PKG_VERSION"),
    r"}\viewkind4\uc1 "
);
/// Closes the document group opened by [`HEADER`]
pub const FOOTER: &str = "}";

pub const PARAGRAPH_START: &str = r"\pard";
pub const PARAGRAPH_END: &str = r"\par";

/// Heading sizes for levels 1 to 6
pub const HEADING_SIZES: [u32; 6] = [36, 35, 34, 33, 32, 31];
pub const FONT_SIZE: &str = r"\fs";
pub const FONT_SIZE_DEFAULT: &str = r"\fs25 ";
pub const FONT_SIZE_CODE: &str = r"\fs25 ";

/// Single line spacing
pub const LINE_SPACING_1: &str = r"\sl240";
/// 1.15 line spacing
pub const LINE_SPACING_1_15: &str = r"\sl276";
pub const LINE_SPACING_MULTIPLIER: &str = r"\slmult1";

pub const FONT_STANDARD: &str = r"\f0 ";
pub const FONT_CODE: &str = r"\f1 ";

pub const STANDARD_PARAGRAPH_START: &str = r"\pard\sl276\slmult1\f0 \fs25 ";
pub const CODE_PARAGRAPH_START: &str = r"\pard\sl276\slmult1\f1 \fs25 ";
/// Blank paragraph inserted between blocks
pub const EMPTY_PARAGRAPH: &str = r"\pard\sl276\slmult1\par";

pub const BOLD: &str = r"\b ";
pub const BOLD_END: &str = r"\b0 ";
pub const ITALIC: &str = r"\i ";
pub const ITALIC_END: &str = r"\i0 ";
pub const UNDERLINE: &str = r"\ul ";
pub const UNDERLINE_END: &str = r"\ul0 ";
pub const STRIKE: &str = r"\strike ";
pub const STRIKE_END: &str = r"\strike0 ";

pub const LINE_BREAK: &str = r"\line";
pub const TAB: &str = r"\tab ";

/// First line pulled back by a quarter inch, for list and quote markers
pub const HANGING_INDENT: &str = r"\fi-360";
pub const LEFT_INDENT: &str = r"\li";

/// Hanging indent for block quotes
pub const QUOTE_INDENT: &str = r"\fi-360\li1080\tx360 ";

/// List indentation in twips: base plus one step per nesting level
pub const LIST_BASE_INDENT: u32 = 720;
pub const LIST_LEVEL_INDENT: u32 = 360;

/// Total table width in twips, shared between columns
pub const TABLE_WIDTH: u32 = 10_000;
pub const TABLE_ROW_DEFINITION: &str = r"\trowd\trgaph10\trpaddl10\trpaddr10\trpaddfl3\trpaddfr3";
pub const TABLE_CELL_BOUNDARY: &str = r"\cellx";
/// Marks a paragraph as cell content
pub const TABLE_IN_CELL: &str = r"\intbl\nowidctlpar";
pub const TABLE_CELL_END: &str = r"\cell";
pub const TABLE_ROW_END: &str = r"\row";

/// U+25A3, white square containing black small square
pub const TASK_CHECKED: &str = r"\u9635? ";
/// U+25A2, white square with rounded corners
pub const TASK_UNCHECKED: &str = r"\u9634? ";

/// Font size in half-points for a heading level; levels past 6 use the 6th entry
pub fn heading_font_size(level: u8) -> u32 {
    let index = usize::from(level.clamp(1, 6)) - 1;
    HEADING_SIZES[index]
}

/// Indentation in twips for a list nesting level
pub fn list_indent(level: usize) -> u32 {
    LIST_BASE_INDENT + level as u32 * LIST_LEVEL_INDENT
}

/// Character style selected by an emphasis delimiter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl EmphasisStyle {
    /// Resolve a delimiter character and run length to a style.
    ///
    /// Unknown combinations (e.g. `***` or a single `~`) get no styling.
    pub fn from_delimiter(delimiter: char, count: u8) -> Option<Self> {
        match (delimiter, count) {
            ('*' | '_', 1) => Some(EmphasisStyle::Italic),
            ('*', 2) => Some(EmphasisStyle::Bold),
            ('_', 2) => Some(EmphasisStyle::Underline),
            ('~', 2) => Some(EmphasisStyle::Strikethrough),
            _ => None,
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            EmphasisStyle::Bold => BOLD,
            EmphasisStyle::Italic => ITALIC,
            EmphasisStyle::Underline => UNDERLINE,
            EmphasisStyle::Strikethrough => STRIKE,
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            EmphasisStyle::Bold => BOLD_END,
            EmphasisStyle::Italic => ITALIC_END,
            EmphasisStyle::Underline => UNDERLINE_END,
            EmphasisStyle::Strikethrough => STRIKE_END,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_font_size() {
        for (level, expected) in (1..=6).zip(HEADING_SIZES) {
            assert_eq!(heading_font_size(level), expected);
        }
        assert_eq!(heading_font_size(7), 31);
        assert_eq!(heading_font_size(u8::MAX), 31);
        assert_eq!(heading_font_size(0), 36);
    }

    #[test]
    fn test_list_indent() {
        assert_eq!(list_indent(0), 720);
        assert_eq!(list_indent(1), 1080);
        assert_eq!(list_indent(3), 1800);
    }

    #[test]
    fn test_emphasis_style_resolution() {
        assert_eq!(
            EmphasisStyle::from_delimiter('*', 1),
            Some(EmphasisStyle::Italic)
        );
        assert_eq!(
            EmphasisStyle::from_delimiter('_', 1),
            Some(EmphasisStyle::Italic)
        );
        assert_eq!(
            EmphasisStyle::from_delimiter('*', 2),
            Some(EmphasisStyle::Bold)
        );
        assert_eq!(
            EmphasisStyle::from_delimiter('_', 2),
            Some(EmphasisStyle::Underline)
        );
        assert_eq!(
            EmphasisStyle::from_delimiter('~', 2),
            Some(EmphasisStyle::Strikethrough)
        );
        assert_eq!(EmphasisStyle::from_delimiter('~', 1), None);
        assert_eq!(EmphasisStyle::from_delimiter('*', 3), None);
        assert_eq!(EmphasisStyle::from_delimiter('=', 2), None);
    }

    #[test]
    fn test_paragraph_fragments_are_composed_from_parts() {
        assert_eq!(
            STANDARD_PARAGRAPH_START,
            format!(
                "{PARAGRAPH_START}{LINE_SPACING_1_15}{LINE_SPACING_MULTIPLIER}{FONT_STANDARD}{FONT_SIZE_DEFAULT}"
            )
        );
        assert_eq!(
            CODE_PARAGRAPH_START,
            format!(
                "{PARAGRAPH_START}{LINE_SPACING_1_15}{LINE_SPACING_MULTIPLIER}{FONT_CODE}{FONT_SIZE_CODE}"
            )
        );
        assert!(QUOTE_INDENT.starts_with(HANGING_INDENT));
        assert_eq!(
            EMPTY_PARAGRAPH,
            format!("{PARAGRAPH_START}{LINE_SPACING_1_15}{LINE_SPACING_MULTIPLIER}{PARAGRAPH_END}")
        );
    }

    #[test]
    fn test_header_declares_two_fonts() {
        assert_eq!(HEADER.matches(r"\fnil").count(), 2);
        assert!(GENERATOR.starts_with(r"{\*\generator md2rtf "));
    }
}
