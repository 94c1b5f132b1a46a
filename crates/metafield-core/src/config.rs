//! Filter configuration.
//!
//! Configuration is a small TOML document. Every key is optional:
//!
//! ```toml
//! trim_body = true
//! on_missing = "empty"   # empty | keep | warn
//! ```
//!
//! # Usage
//!
//! ```rust
//! use metafield_core::{MetaConfig, MissingFieldPolicy};
//!
//! let config = MetaConfig::from_toml_str("on_missing = \"keep\"").unwrap();
//! assert_eq!(config.on_missing, MissingFieldPolicy::Keep);
//! assert!(config.trim_body);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What the substitution pass does with a reference to an undeclared field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Replace the reference with the empty string.
    #[default]
    Empty,
    /// Leave the reference token in the output unchanged.
    Keep,
    /// Replace with the empty string and log a warning.
    Warn,
}

impl MissingFieldPolicy {
    /// Lowercase name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Keep => "keep",
            Self::Warn => "warn",
        }
    }
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "keep" => Ok(Self::Keep),
            "warn" => Ok(Self::Warn),
            other => Err(Error::config(format!(
                "unknown missing-field policy '{other}' (expected empty, keep, or warn)"
            ))),
        }
    }
}

/// Settings for the extraction and substitution passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaConfig {
    /// Trim surrounding whitespace from a body once declarations are removed.
    pub trim_body: bool,
    /// Handling of references to undeclared fields.
    pub on_missing: MissingFieldPolicy,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            trim_body: true,
            on_missing: MissingFieldPolicy::Empty,
        }
    }
}

impl MetaConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
