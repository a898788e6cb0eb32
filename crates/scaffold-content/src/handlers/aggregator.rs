//! Aggregator objects: `factory({ key: value, ... })`

use serde::{Deserialize, Serialize};

use super::members::{Fill, insert_member};
use super::{foreign_shape, object_key, unrecognized};
use crate::construct::{ConstructHandler, ConstructKind};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::Result;
use crate::import::plan_import_before;
use crate::scanner::Scanner;
use crate::shape::Shape;
use crate::template::Template;

const DEFAULT_VALUE: &str = "{name}Router";
const DEFAULT_IMPORT: &str = r#"import { {name}Router } from "{import_path}";"#;

/// Registers entries as `name: value` members of the object literal passed to
/// `factory(...)`, importing the value alongside.
///
/// The defaults describe a router registry: `user` becomes
/// `user: userRouter` plus `import { userRouter } from "<import_path>";`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorHandler {
    /// Callee whose first argument is the aggregate, e.g. `router`.
    pub factory: String,
    /// Member value, also the idempotency marker.
    pub value: Template,
    /// Import statement; skipped for entries without an import path.
    pub import: Option<Template>,
}

impl AggregatorHandler {
    pub fn new(factory: impl Into<String>) -> Self {
        Self {
            factory: factory.into(),
            value: Template::new(DEFAULT_VALUE),
            import: Some(Template::new(DEFAULT_IMPORT)),
        }
    }

    pub fn with_value(mut self, value: impl Into<Template>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_import(mut self, import: impl Into<Template>) -> Self {
        self.import = Some(import.into());
        self
    }

    pub fn without_import(mut self) -> Self {
        self.import = None;
        self
    }

    fn member(&self, entry: &Entry) -> Result<String> {
        Ok(format!("{}: {}", object_key(&entry.name), self.value.render(entry)?))
    }

    fn import_statement(&self, entry: &Entry) -> Result<Option<String>> {
        match (&self.import, &entry.import_path) {
            (Some(template), Some(_)) => template.render(entry).map(Some),
            _ => Ok(None),
        }
    }
}

impl ConstructHandler for AggregatorHandler {
    fn kind(&self) -> ConstructKind {
        ConstructKind::AggregatorObject
    }

    fn marker(&self, entry: &Entry) -> Result<String> {
        self.value.render(entry)
    }

    fn classify(&self, document: &Document) -> Result<Shape> {
        let source = document.source();
        let literal = Scanner::new(source)
            .call_object_argument(&self.factory)
            .map_err(|e| unrecognized(self.kind(), document, e))?;

        Ok(if literal.is_empty() {
            Shape::EmptyAggregate(literal)
        } else if literal.is_multiline(source) {
            Shape::MultiLineAggregate(literal)
        } else {
            Shape::SingleLineAggregate(literal)
        })
    }

    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>> {
        let literal = match shape {
            Shape::EmptyAggregate(l) | Shape::SingleLineAggregate(l) | Shape::MultiLineAggregate(l) => l,
            other => return Err(foreign_shape(self.kind(), document, other)),
        };

        let mut edits = insert_member(document.source(), literal, &self.member(entry)?, Fill::Inline);
        if let Some(statement) = self.import_statement(entry)? {
            let import = plan_import_before(document, &statement, literal.open.start)
                .map_err(|reason| unrecognized(self.kind(), document, reason))?;
            edits.extend(import);
        }
        Ok(edits)
    }

    fn manual_snippet(&self, entry: &Entry) -> Result<String> {
        let member = self.member(entry)?;
        Ok(match self.import_statement(entry)? {
            Some(statement) => format!("{statement}\n\n{}({{ {member} }})", self.factory),
            None => format!("{}({{ {member} }})", self.factory),
        })
    }
}
