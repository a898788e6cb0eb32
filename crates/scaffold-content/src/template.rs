//! Fragment templates rendered against an [`Entry`]
//!
//! A template is plain source text with `{field}` placeholders. `{{` and `}}`
//! produce literal braces. Braces that are not followed by an identifier and
//! a closing brace (`{ href: ... }`) are copied as-is, so object-literal
//! fragments rarely need escaping.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::entry::Entry;
use crate::error::{Error, Result};

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid placeholder regex")
});

/// A `{field}` template producing an opaque source fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of the placeholders this template references, in order.
    pub fn fields(&self) -> Vec<&str> {
        PLACEHOLDER_PATTERN
            .captures_iter(&self.0)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Render against an entry.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPlaceholder` when a placeholder names a field the entry
    /// does not carry.
    pub fn render(&self, entry: &Entry) -> Result<String> {
        let mut out = String::with_capacity(self.0.len() + entry.name.len());
        let mut last = 0;

        for cap in PLACEHOLDER_PATTERN.captures_iter(&self.0) {
            let Some(whole) = cap.get(0) else {
                continue;
            };
            out.push_str(&self.0[last..whole.start()]);
            last = whole.end();

            match (whole.as_str(), cap.get(1)) {
                ("{{", _) => out.push('{'),
                ("}}", _) => out.push('}'),
                (_, Some(field)) => {
                    let value = entry.field(field.as_str()).ok_or_else(|| {
                        Error::UnknownPlaceholder {
                            template: self.0.clone(),
                            field: field.as_str().to_string(),
                        }
                    })?;
                    out.push_str(value);
                }
                _ => out.push_str(whole.as_str()),
            }
        }

        out.push_str(&self.0[last..]);
        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_builtin_and_extra_fields() {
        let entry = Entry::new("user").with_import_path("./user");
        let template = Template::new(r#"import { {name}Router } from "{import_path}";"#);

        assert_eq!(
            template.render(&entry).unwrap(),
            r#"import { userRouter } from "./user";"#
        );
    }

    #[test]
    fn object_literal_braces_pass_through() {
        let entry = Entry::new("users")
            .with_field("kebab", "users")
            .with_field("title", "Users");
        let template = Template::new(r#"{ href: "/{kebab}", title: "{title}" }"#);

        assert_eq!(
            template.render(&entry).unwrap(),
            r#"{ href: "/users", title: "Users" }"#
        );
    }

    #[test]
    fn doubled_braces_escape() {
        let entry = Entry::new("x");
        let template = Template::new("{{name}} is {name}");
        assert_eq!(template.render(&entry).unwrap(), "{name} is x");
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = Template::new("{name}: {validator}")
            .render(&Entry::new("API_KEY"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPlaceholder { field, .. } if field == "validator"));
    }

    #[test]
    fn fields_lists_placeholders_in_order() {
        let template = Template::new("{name}: process.env.{name} // {{ignored}}");
        assert_eq!(template.fields(), vec!["name", "name"]);
    }
}
