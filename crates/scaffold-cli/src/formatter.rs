//! Post-write formatting collaborator

use std::io::Write;
use std::process::{Command, Stdio};

use scaffold_fs::NormalizedPath;

use crate::config::FormatterKind;

/// Formats a file's text before it is written.
pub trait Formatter {
    fn format(&self, path: &NormalizedPath, text: &str) -> std::io::Result<String>;
}

/// Leaves text untouched.
#[derive(Debug, Default)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, _path: &NormalizedPath, text: &str) -> std::io::Result<String> {
        Ok(text.to_string())
    }
}

/// Pipes text through `prettier --stdin-filepath <path>`.
#[derive(Debug)]
pub struct Prettier {
    program: String,
    args: Vec<String>,
}

impl Default for Prettier {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["--no-install".to_string(), "prettier".to_string()],
        }
    }
}

impl Formatter for Prettier {
    fn format(&self, path: &NormalizedPath, text: &str) -> std::io::Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--stdin-filepath")
            .arg(path.to_native())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(std::io::Error::other(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        String::from_utf8(output.stdout).map_err(std::io::Error::other)
    }
}

pub fn for_kind(kind: FormatterKind) -> Box<dyn Formatter> {
    match kind {
        FormatterKind::None => Box::new(Passthrough),
        FormatterKind::Prettier => Box::new(Prettier::default()),
    }
}

/// Format `text`, falling back to the unformatted text on failure.
pub fn format_or_keep(formatter: &dyn Formatter, path: &NormalizedPath, text: String) -> String {
    match formatter.format(path, &text) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "formatter failed, keeping unformatted text");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Formatter for Failing {
        fn format(&self, _path: &NormalizedPath, _text: &str) -> std::io::Result<String> {
            Err(std::io::Error::other("boom"))
        }
    }

    #[test]
    fn passthrough_is_identity() {
        let path = NormalizedPath::new("a.ts");
        assert_eq!(format_or_keep(&Passthrough, &path, "x".into()), "x");
    }

    #[test]
    fn failure_keeps_text() {
        let path = NormalizedPath::new("a.ts");
        assert_eq!(format_or_keep(&Failing, &path, "router({})".into()), "router({})");
    }

    #[test]
    fn missing_program_is_an_error() {
        let prettier = Prettier {
            program: "scaffold-no-such-formatter".into(),
            args: Vec::new(),
        };
        assert!(prettier.format(&NormalizedPath::new("a.ts"), "x").is_err());
    }
}
