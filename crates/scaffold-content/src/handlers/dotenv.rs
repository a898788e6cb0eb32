//! Dotenv files: one `KEY=value` line per entry

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::foreign_shape;
use crate::construct::{ConstructHandler, ConstructKind};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::shape::Shape;

/// Appends `KEY=value` lines; the value comes from the entry's `value` field
/// and defaults to empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotEnvHandler;

impl DotEnvHandler {
    fn line(entry: &Entry) -> String {
        format!("{}={}", entry.name, entry.field("value").unwrap_or_default())
    }

    /// Matches an assignment of `name`, commented-out lines excluded.
    fn assignment_pattern(name: &str) -> Result<Regex> {
        Regex::new(&format!(r"(?m)^[ \t]*(?:export[ \t]+)?{}[ \t]*=", regex::escape(name)))
            .map_err(|e| Error::InvalidEntry(e.to_string()))
    }
}

impl ConstructHandler for DotEnvHandler {
    fn kind(&self) -> ConstructKind {
        ConstructKind::DotEnv
    }

    fn marker(&self, entry: &Entry) -> Result<String> {
        Ok(format!("{}=", entry.name))
    }

    fn already_present(&self, document: &Document, entry: &Entry) -> Result<bool> {
        Ok(Self::assignment_pattern(&entry.name)?.is_match(document.source()))
    }

    fn classify(&self, document: &Document) -> Result<Shape> {
        let source = document.source();
        Ok(Shape::EnvLines {
            len: source.len(),
            ends_with_newline: source.is_empty() || source.ends_with('\n'),
        })
    }

    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>> {
        let Shape::EnvLines {
            len,
            ends_with_newline,
        } = *shape
        else {
            return Err(foreign_shape(self.kind(), document, shape));
        };

        let separator = if ends_with_newline { "" } else { "\n" };
        Ok(vec![Edit::insert(
            len,
            format!("{separator}{}\n", Self::line(entry)),
        )])
    }

    fn manual_snippet(&self, entry: &Entry) -> Result<String> {
        Ok(Self::line(entry))
    }
}
