//! Idempotency guard
//!
//! An entry counts as present when its marker occurs in the document outside
//! comments, on identifier boundaries: `userRouter` does not match inside
//! `superuserRouter`, and `"/users"` still matches because its ends are not
//! identifier characters.

use std::ops::Range;

use crate::scanner::Scanner;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether `marker` occurs in `source` as a whole token run outside comments.
pub fn contains_marker(source: &str, marker: &str) -> bool {
    contains_marker_in(source, 0..source.len(), marker)
}

/// Like [`contains_marker`], counting only occurrences that lie entirely
/// within `region`. Boundaries are still judged against the whole source.
pub fn contains_marker_in(source: &str, region: Range<usize>, marker: &str) -> bool {
    if marker.is_empty() || region.end > source.len() || region.start > region.end {
        return false;
    }

    let starts_ident = marker.chars().next().is_some_and(is_ident_char);
    let ends_ident = marker.chars().next_back().is_some_and(is_ident_char);
    let mut scanner = None;

    for (offset, _) in source.match_indices(marker) {
        if offset < region.start || offset + marker.len() > region.end {
            continue;
        }
        if starts_ident && source[..offset].chars().next_back().is_some_and(is_ident_char) {
            continue;
        }
        let end = offset + marker.len();
        if ends_ident && source[end..].chars().next().is_some_and(is_ident_char) {
            continue;
        }
        let scanner = scanner.get_or_insert_with(|| Scanner::new(source));
        if scanner.in_comment(offset) {
            continue;
        }
        return true;
    }

    false
}
