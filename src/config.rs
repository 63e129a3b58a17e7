//! Content source configuration.
//!
//! Describes where content lives and which files count as documents.
//! Loadable from a TOML file so a host generator can keep it alongside its
//! own settings:
//!
//! ```toml
//! content = "content"
//! extensions = ["md", "markdown"]
//! ```

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default values for serde deserialization
mod config_defaults {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn extensions() -> Vec<String> {
        vec!["md".into(), "markdown".into()]
    }
}

/// Where content lives and which files count as documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory scanned for source documents.
    #[serde(default = "config_defaults::content")]
    pub content: PathBuf,

    /// Recognized file extensions, matched case-insensitively and without
    /// the leading dot.
    #[serde(default = "config_defaults::extensions")]
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content: config_defaults::content(),
            extensions: config_defaults::extensions(),
        }
    }
}

impl ContentConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "at least one file extension is required".to_owned(),
            ));
        }
        if let Some(dotted) = self.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(ConfigError::Validation(format!(
                "extensions are matched without the dot: `{dotted}`"
            )));
        }
        Ok(())
    }
}
