//! Incremental source augmentation for generated project files
//!
//! Adds named entries to router registries, navigation lists, environment
//! schemas, layouts and dotenv files. Every operation is a pure function of
//! the document text: recognise the construct's current shape, plan edits
//! against the original text, apply them in one pass. Merging an entry that
//! is already present changes nothing.

pub mod construct;
pub mod diff;
pub mod document;
pub mod edit;
pub mod entry;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod import;
pub mod merge;
pub mod scanner;
pub mod shape;
pub mod template;

pub use construct::{ConstructHandler, ConstructKind};
pub use diff::{DocumentDiff, LineChange};
pub use document::Document;
pub use edit::{Edit, EditKind, apply_edits};
pub use entry::{Entry, Visibility};
pub use error::{Error, Result};
pub use handlers::{
    AggregatorHandler, DotEnvHandler, ListHandler, ProviderHandler, SectionFilter, SectionSpec,
    SectionedHandler,
};
pub use import::{plan_import, plan_import_before};
pub use merge::{MergeResult, MergeSummary, merge, merge_all};
pub use shape::{Section, Shape};
pub use template::Template;
