//! Normalized path handling and import-alias resolution

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Generated projects are addressed with forward slashes everywhere (config
/// values, import specifiers), so paths are kept in that form and converted
/// to platform-native format only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes, collapses repeated slashes
    /// and drops `.` segments. `..` segments are kept.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: clean(&path.as_ref().to_string_lossy()),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if idx > 0 => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// This path with its extension removed (`lib/user.ts` → `lib/user`).
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => Self {
                inner: self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            },
            None => self.clone(),
        }
    }

    /// The remainder after `prefix`, on a segment boundary.
    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return Some(&self.inner);
        }
        let rest = self.inner.strip_prefix(prefix)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

fn clean(raw: &str) -> String {
    let raw = raw.replace('\\', "/");
    let absolute = raw.starts_with('/');
    let segments: Vec<&str> = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

/// Import specifier for a project file under an alias.
///
/// `root_path` is the source root the alias points at. With alias `@` and
/// root `src/`, `src/components/ThemeProvider.tsx` becomes
/// `@/components/ThemeProvider`. Files outside the root keep their full
/// project-relative path behind the alias.
pub fn alias_import(alias: &str, root_path: &str, file: &NormalizedPath) -> String {
    let stem = file.without_extension();
    let relative = stem.strip_prefix(root_path).unwrap_or(stem.as_str());
    let alias = alias.trim_end_matches('/');
    if alias.is_empty() {
        relative.to_string()
    } else {
        format!("{alias}/{relative}")
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_separators_and_dots() {
        assert_eq!(NormalizedPath::new("src\\lib//./env.mjs").as_str(), "src/lib/env.mjs");
        assert_eq!(NormalizedPath::new("/tmp/x/").as_str(), "/tmp/x");
    }

    #[test]
    fn parent_and_file_name() {
        let path = NormalizedPath::new("src/lib/env.mjs");
        assert_eq!(path.file_name(), Some("env.mjs"));
        assert_eq!(path.parent().unwrap().as_str(), "src/lib");
        assert_eq!(NormalizedPath::new("/a").parent().unwrap().as_str(), "/");
        assert_eq!(NormalizedPath::new("a").parent(), None);
    }

    #[test]
    fn extension_skips_dotfiles() {
        assert_eq!(NormalizedPath::new("routers/_app.ts").extension(), Some("ts"));
        assert_eq!(NormalizedPath::new(".env").extension(), None);
        assert_eq!(NormalizedPath::new("a/user.ts").without_extension().as_str(), "a/user");
    }

    #[test]
    fn strip_prefix_respects_segments() {
        let path = NormalizedPath::new("src/lib/user");
        assert_eq!(path.strip_prefix("src/"), Some("lib/user"));
        assert_eq!(path.strip_prefix("sr"), None);
        assert_eq!(path.strip_prefix(""), Some("src/lib/user"));
    }

    #[test]
    fn alias_import_strips_root_and_extension() {
        let file = NormalizedPath::new("src/components/ThemeProvider.tsx");
        assert_eq!(alias_import("@", "src/", &file), "@/components/ThemeProvider");
        assert_eq!(alias_import("~/", "", &file), "~/src/components/ThemeProvider");
    }
}
