//! RTF text escaping
//!
//! Backslash and both curly braces are the only characters with structural
//! meaning in RTF text; everything else (including non-ASCII) is passed
//! through untouched. Newline handling belongs to the writer.

/// Escape RTF special characters in text.
///
/// # Examples
///
/// ```
/// use md2rtf_core::escape_rtf;
///
/// assert_eq!(escape_rtf(r"a\b"), r"a\\b");
/// assert_eq!(escape_rtf("{x}"), r"\{x\}");
/// ```
pub fn escape_rtf(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    push_escaped(&mut result, text);
    result
}

/// Append `text` to `out`, escaped
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            _ => out.push(c),
        }
    }
}
