//! Document formats a configuration can be written in.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Formats an [`EmitterConfig`](super::EmitterConfig) can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "json"),
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Toml => write!(f, "toml"),
        }
    }
}

impl ConfigFormat {
    /// Parse a format from its name or one of its extensions.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_str)
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Yaml => &["yaml", "yml"],
            ConfigFormat::Toml => &["toml"],
        }
    }

    /// Check if this format is available (feature enabled).
    pub fn is_available(&self) -> bool {
        match self {
            #[cfg(feature = "json")]
            ConfigFormat::Json => true,
            #[cfg(not(feature = "json"))]
            ConfigFormat::Json => false,

            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => true,
            #[cfg(not(feature = "yaml"))]
            ConfigFormat::Yaml => false,

            #[cfg(feature = "toml")]
            ConfigFormat::Toml => true,
            #[cfg(not(feature = "toml"))]
            ConfigFormat::Toml => false,
        }
    }
}

/// Errors while decoding a configuration document.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file extension does not name a known format
    #[error("Cannot infer configuration format from '{0}'")]
    UnknownExtension(String),

    /// Format feature not enabled
    #[error("Format '{0}' is not enabled. Enable the corresponding feature.")]
    NotEnabled(ConfigFormat),

    /// Serialization/deserialization error
    #[error("Serde error: {0}")]
    Serde(Box<dyn std::error::Error + Send + Sync>),
}

/// Deserialize from bytes using the specified format.
pub fn deserialize<T: DeserializeOwned>(
    format: ConfigFormat,
    bytes: &[u8],
) -> Result<T, FormatError> {
    match format {
        #[cfg(feature = "json")]
        ConfigFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| FormatError::Serde(Box::new(e)))
        }

        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => {
            serde_yaml::from_slice(bytes).map_err(|e| FormatError::Serde(Box::new(e)))
        }

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|e| FormatError::Serde(Box::new(e)))?;
            toml::from_str(text).map_err(|e| FormatError::Serde(Box::new(e)))
        }

        #[allow(unreachable_patterns)]
        _ => Err(FormatError::NotEnabled(format)),
    }
}
