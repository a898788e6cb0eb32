//! Project configuration files in TOML, JSON or YAML

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> std::result::Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        }
    }
}

/// Loads and saves typed configuration, writing through the locked atomic
/// writer.
#[derive(Debug, Default)]
pub struct ConfigStore {
    robustness: io::RobustnessConfig,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_robustness(robustness: io::RobustnessConfig) -> Self {
        Self { robustness }
    }

    /// Load a config file. A missing file is `ConfigNotFound`, so callers
    /// can fall back to defaults.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::from_path(path)?;
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }

        format
            .parse(&io::read_text(path)?)
            .map_err(|message| Error::ConfigParse {
                path: path.to_native(),
                format: format.name().into(),
                message,
            })
    }

    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = ConfigFormat::from_path(path)?;
        let content = format.render(value).map_err(|message| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.name().into(),
            message,
        })?;
        tracing::debug!(path = %path, format = format.name(), "saving config");
        io::write_atomic(path, content.as_bytes(), self.robustness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(ConfigFormat::from_path(&"scaffold.toml".into()).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(&"a/b.YML".into()).unwrap(), ConfigFormat::Yaml);
        assert!(matches!(
            ConfigFormat::from_path(&"scaffold".into()),
            Err(Error::UnsupportedFormat { ref extension }) if extension.is_empty()
        ));
    }
}
