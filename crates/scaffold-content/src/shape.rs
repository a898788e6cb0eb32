//! Structural variants a managed construct can take

use std::ops::Range;

use crate::scanner::Literal;

/// A named sub-block of a sectioned document (`server: { ... }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub literal: Literal,
}

/// The recognised form of a managed region, with the offsets the planners
/// need to insert into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `factory({})`, possibly with whitespace between the braces.
    EmptyAggregate(Literal),
    /// `factory({ a: aRouter })` on one line.
    SingleLineAggregate(Literal),
    /// An aggregate object spread over several lines.
    MultiLineAggregate(Literal),
    /// `const links: Link[] = [];`
    InitialList(Literal),
    /// `const links: Link[] = [ ... ];` with at least one element.
    PopulatedList(Literal),
    /// Every configured section, in configuration order.
    SectionedBlock(Vec<Section>),
    /// The JSX `{children}` slot a provider wraps.
    ChildrenSlot { span: Range<usize> },
    /// A line-oriented `KEY=value` file.
    EnvLines { len: usize, ends_with_newline: bool },
}

impl Shape {
    /// Short name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmptyAggregate(_) => "empty aggregate",
            Self::SingleLineAggregate(_) => "single-line aggregate",
            Self::MultiLineAggregate(_) => "multi-line aggregate",
            Self::InitialList(_) => "initial list",
            Self::PopulatedList(_) => "populated list",
            Self::SectionedBlock(_) => "sectioned block",
            Self::ChildrenSlot { .. } => "children slot",
            Self::EnvLines { .. } => "env lines",
        }
    }

    /// Number of entries currently in the managed region, where that is
    /// meaningful.
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            Self::EmptyAggregate(l)
            | Self::SingleLineAggregate(l)
            | Self::MultiLineAggregate(l)
            | Self::InitialList(l)
            | Self::PopulatedList(l) => Some(l.members.len()),
            Self::SectionedBlock(sections) => sections.first().map(|s| s.literal.members.len()),
            Self::ChildrenSlot { .. } | Self::EnvLines { .. } => None,
        }
    }
}
