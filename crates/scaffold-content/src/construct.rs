//! Construct kinds and the handler trait

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::Result;
use crate::guard;
use crate::shape::Shape;

/// Families of managed constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructKind {
    /// `factory({ key: value, ... })`, e.g. a router registry.
    AggregatorObject,
    /// `const NAME: Type = [ ... ];`, e.g. navigation links.
    ListLiteral,
    /// A call with several mirrored object sections, e.g. an env schema.
    SectionedBlock,
    /// A layout whose `{children}` slot is wrapped in providers.
    ProviderRoot,
    /// A `KEY=value` dotenv file.
    DotEnv,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AggregatorObject => "aggregator object",
            Self::ListLiteral => "list literal",
            Self::SectionedBlock => "sectioned block",
            Self::ProviderRoot => "provider root",
            Self::DotEnv => "dotenv file",
        })
    }
}

/// Classification and planning for one construct kind.
///
/// Handlers are pure: they read the document text and return shapes and
/// edits, never touching the filesystem.
pub trait ConstructHandler: Send + Sync {
    /// Construct family this handler manages
    fn kind(&self) -> ConstructKind;

    /// Marker whose presence means the entry was already merged
    fn marker(&self, entry: &Entry) -> Result<String>;

    /// Idempotency check; literal marker containment outside comments by default
    fn already_present(&self, document: &Document, entry: &Entry) -> Result<bool> {
        Ok(guard::contains_marker(document.source(), &self.marker(entry)?))
    }

    /// Determine which structural variant of the construct the document holds
    fn classify(&self, document: &Document) -> Result<Shape>;

    /// Edits inserting `entry` into a document of the given shape
    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>>;

    /// Text a user should add by hand when the document is unrecognised
    fn manual_snippet(&self, entry: &Entry) -> Result<String>;
}
