//! Shared test utilities for the scaffold workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: freshly generated project files, standard and t3 layouts
//! - [`project`]: [`TestProject`](project::TestProject) builder over a temp directory

pub mod fixtures;
pub mod project;

pub use project::TestProject;
