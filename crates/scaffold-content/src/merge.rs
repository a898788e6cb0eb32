//! Merge orchestration: guard, classify, plan, apply

use serde::Serialize;

use crate::construct::ConstructHandler;
use crate::diff::{DocumentDiff, unified_diff};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::Result;

/// Outcome of merging one entry into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub document: Document,
    /// `false` when the entry was already present and nothing changed.
    pub applied: bool,
    /// Edits that produced `document` from the input.
    pub edits: Vec<Edit>,
}

impl MergeResult {
    fn unchanged(document: Document) -> Self {
        Self {
            document,
            applied: false,
            edits: Vec::new(),
        }
    }

    pub fn diff(&self, original: &Document) -> DocumentDiff {
        DocumentDiff::compute(original.source(), self.document.source())
    }

    pub fn unified_diff(&self, original: &Document) -> String {
        unified_diff(
            &self.document.display_path(),
            original.source(),
            self.document.source(),
        )
    }
}

/// Summary of merging several entries into one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

/// Merge `entry` into `document`.
///
/// An entry whose marker is already present yields the input unchanged with
/// `applied == false`. Otherwise the document is classified, edits are planned
/// against its original text and applied in one pass.
///
/// # Errors
///
/// `ShapeUnrecognized` or `SectionMissing` when the document does not hold a
/// recognisable construct; the caller still owns the untouched input.
/// `OverlappingEdits` and `EditOutOfBounds` indicate a planner defect.
pub fn merge(
    document: &Document,
    handler: &dyn ConstructHandler,
    entry: &Entry,
) -> Result<MergeResult> {
    entry.validate()?;

    if handler.already_present(document, entry)? {
        tracing::info!(
            path = %document.display_path(),
            entry = %entry.name,
            construct = %handler.kind(),
            "entry already present, skipping"
        );
        return Ok(MergeResult::unchanged(document.clone()));
    }

    let shape = handler.classify(document)?;
    tracing::debug!(
        path = %document.display_path(),
        shape = shape.name(),
        entries = ?shape.entry_count(),
        "classified document"
    );

    let edits = handler.plan(document, &shape, entry)?;
    let merged = document.apply(&edits)?;
    tracing::debug!(
        path = %document.display_path(),
        entry = %entry.name,
        edits = edits.len(),
        "merged entry"
    );

    Ok(MergeResult {
        document: merged,
        applied: true,
        edits,
    })
}

/// Merge entries one after another, each against the previous result.
///
/// Stops at the first error; earlier merges are discarded with it.
pub fn merge_all(
    document: &Document,
    handler: &dyn ConstructHandler,
    entries: &[Entry],
) -> Result<(Document, MergeSummary)> {
    let mut current = document.clone();
    let mut summary = MergeSummary::default();

    for entry in entries {
        let result = merge(&current, handler, entry)?;
        if result.applied {
            summary.applied.push(entry.name.clone());
        } else {
            summary.skipped.push(entry.name.clone());
        }
        current = result.document;
    }

    Ok((current, summary))
}
