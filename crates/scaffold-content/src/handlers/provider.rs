//! Provider roots: layouts whose `{children}` slot is wrapped in context
//! providers.

use serde::{Deserialize, Serialize};

use super::{foreign_shape, unrecognized};
use crate::construct::{ConstructHandler, ConstructKind};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::Result;
use crate::import::plan_import_before;
use crate::scanner::Scanner;
use crate::shape::Shape;
use crate::template::Template;

const DEFAULT_IMPORT: &str = r#"import { {name} } from "{import_path}";"#;

/// Wraps the layout's single children slot: `{children}` becomes
/// `<Name>{children}</Name>`, nesting inside any provider already there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHandler {
    /// Identifier of the JSX slot, normally `children`.
    pub slot: String,
    pub import: Option<Template>,
}

impl Default for ProviderHandler {
    fn default() -> Self {
        Self {
            slot: "children".to_string(),
            import: Some(Template::new(DEFAULT_IMPORT)),
        }
    }
}

impl ProviderHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    fn wrapped(&self, entry: &Entry) -> String {
        format!("<{name}>{{{slot}}}</{name}>", name = entry.name, slot = self.slot)
    }

    fn import_statement(&self, entry: &Entry) -> Result<Option<String>> {
        match (&self.import, &entry.import_path) {
            (Some(template), Some(_)) => template.render(entry).map(Some),
            _ => Ok(None),
        }
    }
}

impl ConstructHandler for ProviderHandler {
    fn kind(&self) -> ConstructKind {
        ConstructKind::ProviderRoot
    }

    /// The opening tag; `<Name` matches with or without props.
    fn marker(&self, entry: &Entry) -> Result<String> {
        Ok(format!("<{}", entry.name))
    }

    fn classify(&self, document: &Document) -> Result<Shape> {
        let source = document.source();
        let slots = Scanner::new(source).jsx_slots(&self.slot);
        let written = textual_slots(source, &self.slot);
        if written != slots.len() {
            return Err(unrecognized(
                self.kind(),
                document,
                format!(
                    "{written} {{{slot}}} slots written but {} found outside comments and strings",
                    slots.len(),
                    slot = self.slot
                ),
            ));
        }
        match slots.as_slice() {
            [span] => Ok(Shape::ChildrenSlot { span: span.clone() }),
            [] => Err(unrecognized(
                self.kind(),
                document,
                format!("no {{{}}} slot found", self.slot),
            )),
            many => Err(unrecognized(
                self.kind(),
                document,
                format!("{} {{{}}} slots found, expected one", many.len(), self.slot),
            )),
        }
    }

    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>> {
        let Shape::ChildrenSlot { span } = shape else {
            return Err(foreign_shape(self.kind(), document, shape));
        };

        let mut edits = vec![Edit::replace(span.clone(), self.wrapped(entry))];
        if let Some(statement) = self.import_statement(entry)? {
            let import = plan_import_before(document, &statement, span.start)
                .map_err(|reason| unrecognized(self.kind(), document, reason))?;
            edits.extend(import);
        }
        Ok(edits)
    }

    fn manual_snippet(&self, entry: &Entry) -> Result<String> {
        let wrapped = self.wrapped(entry);
        Ok(match self.import_statement(entry)? {
            Some(statement) => format!("{statement}\n\n{wrapped}"),
            None => wrapped,
        })
    }
}

/// Counts `{slot}` groups that look like JSX children by their neighbours
/// alone, ignoring what the tokenizer made of the surrounding text.
///
/// JSX text such as `Don't` or `http://` lexes as a string or a comment, which
/// can swallow a real slot; a count that disagrees with the scanner means
/// the layout cannot be wrapped safely.
fn textual_slots(source: &str, slot: &str) -> usize {
    let group = format!("{{{slot}}}");
    source
        .match_indices(&group)
        .filter(|&(offset, _)| {
            let before = source[..offset].trim_end().ends_with('>');
            let after = source[offset + group.len()..].trim_start().starts_with('<');
            before || after
        })
        .count()
}
