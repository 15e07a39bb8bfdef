//! Concrete notations.
//!
//! Two grammars share the one semantic model: `story`, a block clause
//! syntax, and `ledger`, a table syntax. The engine only ever sees them
//! through the [`Format`](crate::format::Format) boundary.

pub mod ledger;
pub mod story;

pub use ledger::LedgerFormat;
pub use story::StoryFormat;

use text_size::TextSize;

/// 1-indexed line/column of a byte offset, for syntax errors.
pub(crate) fn line_col(input: &str, offset: TextSize) -> (u32, u32) {
    let offset = u32::from(offset) as usize;
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() as u32 + 1;
    let column = match before.rfind('\n') {
        Some(nl) => (before.len() - nl) as u32,
        None => before.len() as u32 + 1,
    };
    (line, column)
}

/// Unescapes a quoted string literal (`\"` and `\\`).
pub(crate) fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Renders a string as a quoted literal (escaping `\` and `"`).
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_indexed() {
        let input = "ab\ncd";
        assert_eq!(line_col(input, TextSize::new(0)), (1, 1));
        assert_eq!(line_col(input, TextSize::new(3)), (2, 1));
        assert_eq!(line_col(input, TextSize::new(4)), (2, 2));
    }

    #[test]
    fn quote_round_trips_escapes() {
        let original = r#"say "hi" \ bye"#;
        assert_eq!(unquote(&quote(original)), original);
    }
}
