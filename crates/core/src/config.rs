//! Configuration loading and schema definitions
//!
//! Optional `.cordova-tools.toml` configuration. CLI flags always override
//! config values; config values override built-in defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Build defaults
    #[serde(default)]
    pub build: BuildConfig,

    /// Signing defaults
    #[serde(default)]
    pub signing: SigningConfig,
}

/// Build defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Skip the `cordova requirements` check before building
    #[serde(default)]
    pub skip_checks: bool,
}

/// Signing defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SigningConfig {
    /// Default keystore path when no --keystore flag is given
    #[serde(default)]
    pub keystore: Option<String>,

    /// Default key alias when no --alias flag is given
    #[serde(default)]
    pub alias: Option<String>,
}

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed configuration values
    pub schema: ConfigSchema,
    /// Path the configuration was loaded from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".cordova-tools.toml",
        "cordova-tools.toml",
        ".config/cordova-tools.toml",
    ];

    candidates
        .iter()
        .find(|c| Path::new(c).exists())
        .map(|c| (*c).to_string())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse config file {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert!(!config.schema.build.skip_checks);
        assert!(config.schema.signing.keystore.is_none());
    }

    #[test]
    fn test_config_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[signing]\nkeystore = \"release.keystore\"\nalias = \"upload\"\n\n[build]\nskip_checks = true"
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(
            config.schema.signing.keystore.as_deref(),
            Some("release.keystore")
        );
        assert_eq!(config.schema.signing.alias.as_deref(), Some("upload"));
        assert!(config.schema.build.skip_checks);
    }

    #[test]
    fn test_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[signing\nbroken").unwrap();

        assert!(Config::load(Some(file.path().to_str().unwrap())).is_err());
    }
}
