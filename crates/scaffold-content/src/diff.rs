//! Line diffs between document versions, for previews and dry runs

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Line-level comparison of two document texts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDiff {
    pub is_equivalent: bool,
    pub changes: Vec<LineChange>,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f32,
}

/// A changed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum LineChange {
    Added(String),
    Removed(String),
}

impl DocumentDiff {
    pub fn equivalent() -> Self {
        Self {
            is_equivalent: true,
            changes: Vec::new(),
            similarity: 1.0,
        }
    }

    pub fn compute(old: &str, new: &str) -> Self {
        if old == new {
            return Self::equivalent();
        }

        let text_diff = TextDiff::from_lines(old, new);
        let changes: Vec<_> = text_diff
            .iter_all_changes()
            .filter_map(|change| {
                let line = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Insert => Some(LineChange::Added(line)),
                    ChangeTag::Delete => Some(LineChange::Removed(line)),
                    ChangeTag::Equal => None,
                }
            })
            .collect();

        Self {
            is_equivalent: changes.is_empty(),
            changes,
            similarity: text_diff.ratio(),
        }
    }

    pub fn added(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LineChange::Added(_)))
            .count()
    }

    pub fn removed(&self) -> usize {
        self.changes.len() - self.added()
    }
}

impl Default for DocumentDiff {
    fn default() -> Self {
        Self::equivalent()
    }
}

/// Unified diff of `old` against `new`, headed `a/<path>` and `b/<path>`.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}
