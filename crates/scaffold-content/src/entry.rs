//! The unit of incremental growth

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Whether an entry is exposed to client code.
///
/// Only the section merger looks at this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// One named addition to an aggregator, list, or sectioned document.
///
/// `name` is the idempotency key within the managed region: merging an entry
/// whose derived marker is already present is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Auxiliary template fields (`title`, `validator`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: None,
            visibility: Visibility::Private,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_import_path(mut self, import_path: impl Into<String>) -> Self {
        self.import_path = Some(import_path.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn public(self) -> Self {
        self.with_visibility(Visibility::Public)
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Look up a template field.
    ///
    /// `name` and `import_path` resolve to the entry's own fields; anything
    /// else is looked up in `extra`.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "import_path" => self.import_path.as_deref(),
            "visibility" => Some(match self.visibility {
                Visibility::Public => "public",
                Visibility::Private => "private",
            }),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// Reject names that cannot be spliced into source text as a single token,
    /// and field values that would span more than one line.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidEntry("entry name is empty".into()));
        }
        if let Some(c) = self
            .name
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '{' | '}' | ',' | '"' | '\''))
        {
            return Err(Error::InvalidEntry(format!(
                "entry name `{}` contains `{}`",
                self.name,
                c.escape_debug()
            )));
        }
        let values = self.import_path.iter().map(|v| ("import_path", v));
        let extra = self.extra.iter().map(|(k, v)| (k.as_str(), v));
        if let Some((key, _)) = values.chain(extra).find(|(_, v)| v.contains(['\n', '\r'])) {
            return Err(Error::InvalidEntry(format!(
                "field `{key}` of entry `{}` contains a line break",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_resolves_builtin_and_extra_keys() {
        let entry = Entry::new("user")
            .with_import_path("./user")
            .with_field("title", "Users");

        assert_eq!(entry.field("name"), Some("user"));
        assert_eq!(entry.field("import_path"), Some("./user"));
        assert_eq!(entry.field("visibility"), Some("private"));
        assert_eq!(entry.field("title"), Some("Users"));
        assert_eq!(entry.field("missing"), None);
    }

    #[test]
    fn import_path_is_absent_by_default() {
        assert_eq!(Entry::new("API_KEY").field("import_path"), None);
    }

    #[test]
    fn validate_rejects_empty_and_spliced_names() {
        assert!(Entry::new("").validate().is_err());
        assert!(Entry::new("two words").validate().is_err());
        assert!(Entry::new("a,b").validate().is_err());
        assert!(Entry::new("user").validate().is_ok());
        assert!(Entry::new("NEXT_PUBLIC_KEY").validate().is_ok());
    }

    #[test]
    fn validate_rejects_line_breaks_in_values() {
        let injected = Entry::new("API_KEY").with_field("value", "x\nADMIN=true");
        assert!(matches!(
            injected.validate(),
            Err(Error::InvalidEntry(ref message)) if message.contains("`value`")
        ));
        assert!(Entry::new("A").with_field("value", "x\r").validate().is_err());
        assert!(Entry::new("user").with_import_path("./a\nb").validate().is_err());
        assert!(Entry::new("A").with_field("value", "a b=c#d").validate().is_ok());
    }

    #[test]
    fn visibility_serializes_lowercase() {
        let entry = Entry::new("KEY").public();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["visibility"], "public");
        assert!(json.get("import_path").is_none());
    }
}
