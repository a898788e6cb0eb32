//! List literals: `const NAME: Type[] = [ ... ];`

use serde::{Deserialize, Serialize};

use super::members::{Fill, insert_member};
use super::{foreign_shape, marker_in_regions, unrecognized};
use crate::construct::{ConstructHandler, ConstructKind};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::Result;
use crate::scanner::Scanner;
use crate::shape::Shape;
use crate::template::Template;

/// Appends one rendered element per entry to the array a binding is
/// initialised with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListHandler {
    /// Name of the `const`/`let` binding holding the array.
    pub binding: String,
    pub element: Template,
    /// Text whose presence means the element already exists.
    pub marker: Template,
}

impl ListHandler {
    pub fn new(
        binding: impl Into<String>,
        element: impl Into<Template>,
        marker: impl Into<Template>,
    ) -> Self {
        Self {
            binding: binding.into(),
            element: element.into(),
            marker: marker.into(),
        }
    }

    /// Navigation links keyed by route: entries need `kebab` and `title`
    /// fields.
    pub fn nav_links(binding: impl Into<String>) -> Self {
        Self::new(
            binding,
            r#"{ href: "/{kebab}", title: "{title}" }"#,
            r#""/{kebab}""#,
        )
    }
}

impl ConstructHandler for ListHandler {
    fn kind(&self) -> ConstructKind {
        ConstructKind::ListLiteral
    }

    fn marker(&self, entry: &Entry) -> Result<String> {
        self.marker.render(entry)
    }

    /// Only the bound array counts: the same href in another list of the
    /// file does not make the link present.
    fn already_present(&self, document: &Document, entry: &Entry) -> Result<bool> {
        let regions = self.classify(document).map(|shape| match shape {
            Shape::InitialList(l) | Shape::PopulatedList(l) => vec![l.span()],
            _ => Vec::new(),
        });
        marker_in_regions(document, &self.marker(entry)?, regions)
    }

    fn classify(&self, document: &Document) -> Result<Shape> {
        let literal = Scanner::new(document.source())
            .binding_array(&self.binding)
            .map_err(|e| unrecognized(self.kind(), document, e))?;

        Ok(if literal.is_empty() {
            Shape::InitialList(literal)
        } else {
            Shape::PopulatedList(literal)
        })
    }

    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>> {
        let literal = match shape {
            Shape::InitialList(l) | Shape::PopulatedList(l) => l,
            other => return Err(foreign_shape(self.kind(), document, other)),
        };
        let element = self.element.render(entry)?;
        Ok(insert_member(document.source(), literal, &element, Fill::Block))
    }

    fn manual_snippet(&self, entry: &Entry) -> Result<String> {
        Ok(format!("{},", self.element.render(entry)?))
    }
}
