//! Offset-based edits and the single-pass applier

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{Error, Result};

/// The kind of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Zero-width insertion at an offset.
    Insert,
    /// Replacement of an existing span.
    Replace,
}

/// An edit against the original text of a document.
///
/// Spans always refer to the text the edit set was planned against, never to
/// the text produced by an earlier edit of the same set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Byte range replaced by this edit (empty for insertions).
    pub span: Range<usize>,
    /// Text written in place of `span`.
    pub new_content: String,
}

impl Edit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            span: offset..offset,
            new_content: text.into(),
        }
    }

    pub fn replace(span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            span,
            new_content: text.into(),
        }
    }

    pub fn kind(&self) -> EditKind {
        if self.span.is_empty() {
            EditKind::Insert
        } else {
            EditKind::Replace
        }
    }

    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Apply a set of non-overlapping edits to `source` in one pass.
///
/// Edits are applied from the highest offset to the lowest so that each span
/// still addresses the original text. Two edits overlap when their spans
/// intersect or when they start at the same offset (the result would depend on
/// application order).
///
/// # Errors
///
/// `EditOutOfBounds` if a span leaves the text or splits a character,
/// `OverlappingEdits` if any two spans overlap. Both indicate a planner defect;
/// no partial output is produced.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String> {
    for edit in edits {
        let span = &edit.span;
        if span.start > span.end
            || span.end > source.len()
            || !source.is_char_boundary(span.start)
            || !source.is_char_boundary(span.end)
        {
            return Err(Error::EditOutOfBounds {
                span: span.clone(),
                len: source.len(),
            });
        }
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.span.start, e.span.end));

    for pair in ordered.windows(2) {
        let (a, b) = (&pair[0].span, &pair[1].span);
        if a.start == b.start || a.end > b.start {
            tracing::error!(first = ?a, second = ?b, "planner produced overlapping edits");
            return Err(Error::OverlappingEdits {
                first: a.clone(),
                second: b.clone(),
            });
        }
    }

    let growth: usize = edits.iter().map(|e| e.new_content.len()).sum();
    let mut result = String::with_capacity(source.len() + growth);
    result.push_str(source);
    for edit in ordered.iter().rev() {
        result.replace_range(edit.span.clone(), &edit.new_content);
    }
    Ok(result)
}
