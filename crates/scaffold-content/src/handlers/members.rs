//! Shared member-insertion logic for object and array literals
//!
//! Aggregator objects and list literals grow the same way: fill an empty
//! literal, or append after the last member with trailing-comma
//! normalization. The functions here only compute edits.

use crate::edit::Edit;
use crate::scanner::{Delimiter, Literal};

pub(crate) const DEFAULT_INDENT: &str = "  ";

/// How an empty literal is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    /// `{ key: value }` on the literal's line
    Inline,
    /// One member per line
    Block,
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |p| p + 1)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn leading_whitespace(source: &str, offset: usize) -> &str {
    let start = line_start(source, offset);
    let line = &source[start..offset];
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

/// Indentation of `offset` when only whitespace precedes it on its line.
pub(crate) fn line_indent(source: &str, offset: usize) -> Option<&str> {
    let prefix = &source[line_start(source, offset)..offset];
    prefix
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(prefix)
}

fn delimiters(literal: &Literal) -> (char, char) {
    match literal.delimiter {
        Delimiter::Brace => ('{', '}'),
        Delimiter::Bracket => ('[', ']'),
    }
}

/// Edits that add `member` to `literal`, whatever its current size.
pub(crate) fn insert_member(source: &str, literal: &Literal, member: &str, fill: Fill) -> Vec<Edit> {
    let base = leading_whitespace(source, literal.open.start);

    let Some(last) = literal.members.last() else {
        let interior = &source[literal.open.end..literal.close.start];
        if !interior.trim().is_empty() {
            // Only comments inside; keep them and add below.
            let indent = format!("{base}{DEFAULT_INDENT}");
            return before_close(source, literal, literal.open.end, false, &indent, member);
        }
        let (open, close) = delimiters(literal);
        let text = match fill {
            Fill::Inline => format!("{open} {member} {close}"),
            Fill::Block => format!("{open}\n{base}{DEFAULT_INDENT}{member},\n{base}{close}"),
        };
        return vec![Edit::replace(literal.span(), text)];
    };

    let indent = line_indent(source, last.span.start)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{base}{DEFAULT_INDENT}"));
    let (anchor, needs_comma) = match &literal.trailing_comma {
        Some(comma) => (comma.end, false),
        None => (last.span.end, true),
    };
    before_close(source, literal, anchor, needs_comma, &indent, member)
}

/// Insert `member` as the final line before the closing delimiter.
///
/// `anchor` is where the previous member (or the opening delimiter) ends;
/// `needs_comma` adds the separator the previous member is missing.
fn before_close(
    source: &str,
    literal: &Literal,
    anchor: usize,
    needs_comma: bool,
    indent: &str,
    member: &str,
) -> Vec<Edit> {
    let close = literal.close.start;
    let close_line = line_start(source, close);
    let base = leading_whitespace(source, literal.open.start);
    let comma = if needs_comma { "," } else { "" };
    let mut edits = Vec::with_capacity(2);

    if close_line > anchor && source[close_line..close].trim().is_empty() {
        // Closing delimiter sits on its own line.
        if needs_comma {
            edits.push(Edit::insert(anchor, ","));
        }
        edits.push(Edit::insert(close_line, format!("{indent}{member},\n")));
    } else if source[anchor..close].trim().is_empty() {
        edits.push(Edit::replace(
            anchor..close,
            format!("{comma}\n{indent}{member},\n{base}"),
        ));
    } else {
        // A comment shares the closing line; leave it in place.
        if needs_comma {
            edits.push(Edit::insert(anchor, ","));
        }
        edits.push(Edit::insert(close, format!("\n{indent}{member},\n{base}")));
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply_edits;
    use crate::scanner::Scanner;

    fn grow(source: &str, member: &str, fill: Fill) -> String {
        let scanner = Scanner::new(source);
        let literal = scanner.call_object_argument("f").unwrap();
        let edits = insert_member(source, &literal, member, fill);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn leading_whitespace_stops_at_code() {
        let source = "  \tconst x = {";
        assert_eq!(leading_whitespace(source, source.len() - 1), "  \t");
        assert_eq!(line_indent(source, source.len() - 1), None);
        assert_eq!(line_indent("a\n    b", 6), Some("    "));
    }

    #[test]
    fn empty_inline_and_block_fills() {
        assert_eq!(grow("f({})", "a: x", Fill::Inline), "f({ a: x })");
        assert_eq!(grow("f({ })", "a: x", Fill::Block), "f({\n  a: x,\n})");
    }

    #[test]
    fn empty_with_comment_keeps_comment() {
        assert_eq!(
            grow("f({\n  // none yet\n})", "a: x", Fill::Inline),
            "f({\n  // none yet\n  a: x,\n})"
        );
    }

    #[test]
    fn comment_on_closing_line_is_preserved() {
        assert_eq!(
            grow("f({ a: x /* keep */ })", "b: y", Fill::Inline),
            "f({ a: x, /* keep */ \n  b: y,\n})"
        );
    }

    #[test]
    fn existing_trailing_comma_is_not_doubled() {
        assert_eq!(
            grow("f({\n  a: x,\n})", "b: y", Fill::Inline),
            "f({\n  a: x,\n  b: y,\n})"
        );
    }
}
