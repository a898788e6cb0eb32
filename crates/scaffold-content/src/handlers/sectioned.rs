//! Sectioned blocks: one call whose object argument holds several mirrored
//! sections that must stay consistent per entry.

use serde::{Deserialize, Serialize};

use super::members::{DEFAULT_INDENT, Fill, insert_member, leading_whitespace, line_indent};
use super::{foreign_shape, marker_in_regions, unrecognized};
use crate::construct::{ConstructHandler, ConstructKind};
use crate::document::Document;
use crate::edit::Edit;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::scanner::{Literal, Scanner};
use crate::shape::{Section, Shape};
use crate::template::Template;

/// Which entries a section receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionFilter {
    #[default]
    All,
    PublicOnly,
    PrivateOnly,
}

impl SectionFilter {
    pub fn admits(self, entry: &Entry) -> bool {
        match self {
            Self::All => true,
            Self::PublicOnly => entry.is_public(),
            Self::PrivateOnly => !entry.is_public(),
        }
    }
}

/// One section of the block and the member text it gets per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub template: Template,
    #[serde(default)]
    pub applies_to: SectionFilter,
}

impl SectionSpec {
    pub fn new(name: impl Into<String>, template: impl Into<Template>, applies_to: SectionFilter) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            applies_to,
        }
    }
}

/// Adds an entry to every section whose filter admits it. Sections are
/// located together; if any is missing nothing is planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedHandler {
    /// Callee taking the sectioned object, e.g. `createEnv`.
    pub call: String,
    pub sections: Vec<SectionSpec>,
    pub marker: Template,
}

impl SectionedHandler {
    pub fn new(call: impl Into<String>, sections: Vec<SectionSpec>) -> Self {
        Self {
            call: call.into(),
            sections,
            marker: Template::new("{name}"),
        }
    }

    /// An environment schema with server, client and runtime-exposure
    /// sections. Entries need a `validator` field.
    pub fn env(call: impl Into<String>, section_names: [&str; 3]) -> Self {
        let [server, client, runtime] = section_names;
        Self::new(
            call,
            vec![
                SectionSpec::new(server, "{name}: {validator}", SectionFilter::All),
                SectionSpec::new(client, "{name}: {validator}", SectionFilter::PublicOnly),
                SectionSpec::new(runtime, "{name}: process.env.{name}", SectionFilter::PublicOnly),
            ],
        )
    }

    fn locate(&self, document: &Document) -> Result<Vec<Section>> {
        let scanner = Scanner::new(document.source());
        let outer = scanner
            .call_object_argument(&self.call)
            .map_err(|e| unrecognized(self.kind(), document, e))?;

        self.sections
            .iter()
            .map(|spec| {
                let member = outer.member(&spec.name).ok_or_else(|| Error::SectionMissing {
                    construct: self.kind(),
                    section: spec.name.clone(),
                    path: document.display_path(),
                })?;
                let literal = scanner
                    .member_literal(member)
                    .map_err(|e| unrecognized(self.kind(), document, e))?;
                Ok(Section {
                    name: spec.name.clone(),
                    literal,
                })
            })
            .collect()
    }
}

/// Insert `member` immediately after the section's opening brace.
fn prepend_member(source: &str, literal: &Literal, member: &str) -> Vec<Edit> {
    if source[literal.open.end..literal.close.start].trim().is_empty() {
        return insert_member(source, literal, member, Fill::Block);
    }
    let indent = literal
        .members
        .first()
        .and_then(|m| line_indent(source, m.span.start))
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{}{DEFAULT_INDENT}", leading_whitespace(source, literal.open.start)));
    vec![Edit::insert(literal.open.end, format!("\n{indent}{member},"))]
}

impl ConstructHandler for SectionedHandler {
    fn kind(&self) -> ConstructKind {
        ConstructKind::SectionedBlock
    }

    fn marker(&self, entry: &Entry) -> Result<String> {
        self.marker.render(entry)
    }

    /// Present when the marker occurs in any configured section.
    fn already_present(&self, document: &Document, entry: &Entry) -> Result<bool> {
        let regions = self
            .locate(document)
            .map(|sections| sections.iter().map(|s| s.literal.span()).collect());
        marker_in_regions(document, &self.marker(entry)?, regions)
    }

    fn classify(&self, document: &Document) -> Result<Shape> {
        self.locate(document).map(Shape::SectionedBlock)
    }

    fn plan(&self, document: &Document, shape: &Shape, entry: &Entry) -> Result<Vec<Edit>> {
        let Shape::SectionedBlock(sections) = shape else {
            return Err(foreign_shape(self.kind(), document, shape));
        };

        let mut edits = Vec::new();
        for spec in self.sections.iter().filter(|s| s.applies_to.admits(entry)) {
            let section = sections
                .iter()
                .find(|s| s.name == spec.name)
                .ok_or_else(|| Error::SectionMissing {
                    construct: self.kind(),
                    section: spec.name.clone(),
                    path: document.display_path(),
                })?;
            let member = spec.template.render(entry)?;
            edits.extend(prepend_member(document.source(), &section.literal, &member));
        }
        Ok(edits)
    }

    fn manual_snippet(&self, entry: &Entry) -> Result<String> {
        let mut lines = Vec::new();
        for spec in self.sections.iter().filter(|s| s.applies_to.admits(entry)) {
            lines.push(format!("{}: {{ {}, }}", spec.name, spec.template.render(entry)?));
        }
        Ok(lines.join("\n"))
    }
}
