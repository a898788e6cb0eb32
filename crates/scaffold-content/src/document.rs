//! Immutable document snapshots

use std::fmt;
use std::path::{Path, PathBuf};

use crate::edit::{Edit, apply_edits};
use crate::error::Result;

/// A text snapshot plus the path it was read from.
///
/// The path is only used to name the document in errors and logs. Documents
/// are never mutated; every operation returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    source: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// A document with no backing file, named `<memory>` in messages.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self::new("<memory>", source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path rendered for messages.
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Apply an edit set to this document's text, producing a new document
    /// with the same path.
    ///
    /// # Errors
    ///
    /// Propagates `OverlappingEdits` and `EditOutOfBounds` from
    /// [`apply_edits`]; `self` is left as it was.
    pub fn apply(&self, edits: &[Edit]) -> Result<Self> {
        let source = apply_edits(&self.source, edits)?;
        Ok(Self {
            path: self.path.clone(),
            source,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
