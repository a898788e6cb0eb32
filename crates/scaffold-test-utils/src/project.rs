//! [`TestProject`] builder for scaffold test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// A temporary project directory with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use scaffold_test_utils::TestProject;
///
/// let project = TestProject::new().with_generated_files();
/// project.assert_file_contains("lib/env.mjs", "createEnv({");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Write `scaffold.toml` at the root.
    pub fn write_config(&self, toml: &str) -> &Self {
        self.write_file("scaffold.toml", toml)
    }

    /// Every managed file of the standard layout, as freshly generated.
    pub fn with_generated_files(self) -> Self {
        self.write_file("lib/server/routers/_app.ts", fixtures::ROOT_ROUTER)
            .write_file("config/nav.ts", fixtures::NAV)
            .write_file("lib/env.mjs", fixtures::ENV_SCHEMA)
            .write_file("app/layout.tsx", fixtures::ROOT_LAYOUT)
            .write_file(".env", fixtures::DOTENV);
        self
    }

    /// A t3 project: sources under `src/`, `~` alias, t3 root router.
    pub fn with_t3_layout(self) -> Self {
        self.write_config("t3 = true\nroot_path = \"src/\"\nalias = \"~\"\n")
            .write_file("src/server/api/root.ts", fixtures::T3_ROOT_ROUTER)
            .write_file("src/env.mjs", fixtures::ENV_SCHEMA)
            .write_file(".env", fixtures::DOTENV);
        self
    }

    /// Read the file at `relative`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read_file(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }

    /// Assert how many times `needle` occurs in the file at `relative`.
    pub fn assert_occurrences(&self, relative: &str, needle: &str, expected: usize) {
        let actual = self.read_file(relative).matches(needle).count();
        assert_eq!(
            actual, expected,
            "Expected {expected} occurrence(s) of {needle:?} in {relative}, found {actual}"
        );
    }
}
