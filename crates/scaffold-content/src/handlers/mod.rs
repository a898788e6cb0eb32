//! Construct handlers
//!
//! One handler per construct family. Each classifies a document into a
//! [`Shape`](crate::Shape) and plans the edits that add an entry to it.

mod aggregator;
mod dotenv;
mod list;
pub(crate) mod members;
mod provider;
mod sectioned;

pub use aggregator::AggregatorHandler;
pub use dotenv::DotEnvHandler;
pub use list::ListHandler;
pub use provider::ProviderHandler;
pub use sectioned::{SectionFilter, SectionSpec, SectionedHandler};

use std::ops::Range;

use crate::construct::ConstructKind;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::guard;
use crate::shape::Shape;

pub(crate) fn unrecognized(
    kind: ConstructKind,
    document: &Document,
    reason: impl std::fmt::Display,
) -> Error {
    Error::unrecognized(kind, document.display_path(), reason.to_string())
}

/// A shape produced for another construct family was passed to `plan`.
pub(crate) fn foreign_shape(kind: ConstructKind, document: &Document, shape: &Shape) -> Error {
    unrecognized(kind, document, format!("a {} cannot hold this entry", shape.name()))
}

/// Idempotency check limited to the managed regions of a document.
///
/// A document that cannot be classified is searched as a whole, so an entry
/// already written into a hand-edited file still counts as present.
pub(crate) fn marker_in_regions(
    document: &Document,
    marker: &str,
    regions: Result<Vec<Range<usize>>>,
) -> Result<bool> {
    let source = document.source();
    match regions {
        Ok(regions) => Ok(regions
            .into_iter()
            .any(|region| guard::contains_marker_in(source, region, marker))),
        Err(e) if e.is_recoverable() => Ok(guard::contains_marker(source, marker)),
        Err(e) => Err(e),
    }
}

/// `name` as an object key, quoted when it is not a plain identifier.
pub(crate) fn object_key(name: &str) -> String {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if plain {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}
