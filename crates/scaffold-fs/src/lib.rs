//! Filesystem shell for scaffold
//!
//! Everything that touches the disk lives here: path normalization and
//! import-alias resolution, locked atomic writes, and config loading. The
//! augmentation engine itself stays pure.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::{LockedFile, RobustnessConfig, read_text, write_atomic};
pub use path::{NormalizedPath, alias_import};
