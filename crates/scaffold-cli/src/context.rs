//! Project context detection
//!
//! Finds the project root by walking up from the working directory to the
//! nearest `scaffold.toml`, so commands work from anywhere in the project.

use std::path::{Path, PathBuf};

use scaffold_fs::{ConfigStore, NormalizedPath, alias_import};

use crate::config::{CONFIG_FILE, ProjectConfig};
use crate::error::Result;
use crate::formatter::{self, Formatter};

/// Nearest directory at or above `cwd` holding a `scaffold.toml`.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// A project root, its configuration and the formatter to run after writes.
pub struct ProjectContext {
    pub root: NormalizedPath,
    pub config: ProjectConfig,
    pub formatter: Box<dyn Formatter>,
}

impl ProjectContext {
    /// Resolve the project from `cwd`, or from an explicit config file.
    ///
    /// Without a config file anywhere above `cwd`, `cwd` is the root and the
    /// defaults apply.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(cwd.join(path)),
            None => find_config(cwd),
        };

        let (root, config) = match config_path {
            Some(path) => {
                let config: ProjectConfig = ConfigStore::new().load(&NormalizedPath::new(&path))?;
                let root = path.parent().unwrap_or(cwd).to_path_buf();
                tracing::debug!(config = %path.display(), "loaded project config");
                (root, config)
            }
            None => {
                tracing::debug!(cwd = %cwd.display(), "no {CONFIG_FILE} found, using defaults");
                (cwd.to_path_buf(), ProjectConfig::default())
            }
        };

        Ok(Self {
            root: NormalizedPath::new(root),
            formatter: formatter::for_kind(config.formatter),
            config,
        })
    }

    /// Project-relative path of a managed source file.
    pub fn source_path(&self, relative: &str) -> NormalizedPath {
        NormalizedPath::new(&self.config.root_path).join(relative)
    }

    /// Absolute path of a project-relative path.
    pub fn absolute(&self, relative: &NormalizedPath) -> NormalizedPath {
        self.root.join(relative.as_str())
    }

    /// Import specifier for `from`: project files (with a source extension)
    /// resolve through the alias, anything else is used verbatim.
    pub fn import_specifier(&self, from: &str) -> String {
        let path = NormalizedPath::new(from);
        match path.extension() {
            Some("ts" | "tsx" | "js" | "jsx" | "mjs") => {
                alias_import(&self.config.alias, &self.config.root_path, &path)
            }
            _ => from.to_string(),
        }
    }
}
