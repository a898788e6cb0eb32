//! Error types for scaffold-content

use std::ops::Range;

use crate::construct::ConstructKind;

/// Result type for scaffold-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while augmenting a document.
///
/// An entry that is already present is not an error; it is reported through
/// [`MergeResult::applied`](crate::MergeResult::applied).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not recognise the {construct} in {path}: {reason}")]
    ShapeUnrecognized {
        construct: ConstructKind,
        path: String,
        reason: String,
    },

    #[error("Section `{section}` of the {construct} not found in {path}")]
    SectionMissing {
        construct: ConstructKind,
        section: String,
        path: String,
    },

    #[error("Planned edits overlap at {first:?} and {second:?}")]
    OverlappingEdits {
        first: Range<usize>,
        second: Range<usize>,
    },

    #[error("Edit span {span:?} is outside a document of {len} bytes")]
    EditOutOfBounds { span: Range<usize>, len: usize },

    #[error("Template `{template}` references unknown field `{field}`")]
    UnknownPlaceholder { template: String, field: String },

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

impl Error {
    pub fn unrecognized(
        construct: ConstructKind,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ShapeUnrecognized {
            construct,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure comes from the document's contents rather than a
    /// planner defect.
    ///
    /// Recoverable errors leave the document untouched and should be surfaced
    /// as "could not update this file automatically".
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ShapeUnrecognized { .. } | Self::SectionMissing { .. }
        )
    }
}
