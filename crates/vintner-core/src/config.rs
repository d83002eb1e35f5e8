//! Configuration for vintner
//!
//! Locates the trained artifacts. Loaded from TOML with the following
//! structure:
//!
//! ```toml
//! [artifacts]
//! model = "artifacts/wine_quality_model.json"
//! imputer = "artifacts/imputer.json"
//! ```
//!
//! Resolution order: project (`.vintner/config.toml`) > user
//! (`~/.vintner/config.toml`) > builtin defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name holding vintner configuration, both per project and per user
pub const CONFIG_DIR: &str = ".vintner";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Where the active configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in defaults
    Builtin,
    /// Loaded from ~/.vintner/config.toml
    User,
    /// Loaded from .vintner/config.toml (project directory)
    Project,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VintnerConfig {
    /// Artifact locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

/// Filesystem locations of the trained artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Regression model JSON
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    /// Missing-value imputer JSON
    #[serde(default = "default_imputer_path")]
    pub imputer: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("artifacts/wine_quality_model.json")
}

fn default_imputer_path() -> PathBuf {
    PathBuf::from("artifacts/imputer.json")
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            imputer: default_imputer_path(),
        }
    }
}

impl VintnerConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from standard locations
    ///
    /// Checks `<project_root>/.vintner/config.toml`, then
    /// `~/.vintner/config.toml`, and falls back to defaults. The first file
    /// found wins; a file that exists but fails to parse is an error.
    pub fn load_standard(project_root: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(root) = project_root {
            let path = root.join(CONFIG_DIR).join(CONFIG_FILE);
            if path.is_file() {
                tracing::info!("Loading config from {:?}", path);
                return Ok((Self::load_from_file(&path)?, ConfigSource::Project));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(CONFIG_DIR).join(CONFIG_FILE);
            if path.is_file() {
                tracing::info!("Loading config from {:?}", path);
                return Ok((Self::load_from_file(&path)?, ConfigSource::User));
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok((Self::default(), ConfigSource::Builtin))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.artifacts.model.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("artifacts.model".to_string()));
        }
        if self.artifacts.imputer.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("artifacts.imputer".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VintnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.artifacts.model,
            PathBuf::from("artifacts/wine_quality_model.json")
        );
    }

    #[test]
    fn test_toml_partial_override() {
        let config = VintnerConfig::from_toml("[artifacts]\nmodel = \"/opt/forest.json\"\n").unwrap();
        assert_eq!(config.artifacts.model, PathBuf::from("/opt/forest.json"));
        assert_eq!(
            config.artifacts.imputer,
            PathBuf::from("artifacts/imputer.json")
        );
    }

    #[test]
    fn test_toml_empty_is_default() {
        assert_eq!(VintnerConfig::from_toml("").unwrap(), VintnerConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = VintnerConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert_eq!(VintnerConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_json_serialization() {
        let config = VintnerConfig::default();
        let json = config.to_json().unwrap();
        let parsed = VintnerConfig::from_json(&json).unwrap();
        assert_eq!(config.artifacts.imputer, parsed.artifacts.imputer);
    }

    #[test]
    fn test_json_empty_path_rejected() {
        let err = VintnerConfig::from_json(r#"{"artifacts": {"model": ""}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "artifacts.model"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = VintnerConfig::from_toml("[artifacts]\nimputer = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "artifacts.imputer"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = VintnerConfig::from_toml("[artifacts\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_project_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(CONFIG_FILE),
            "[artifacts]\nmodel = \"m.json\"\nimputer = \"i.json\"\n",
        )
        .unwrap();

        let (config, source) = VintnerConfig::load_standard(Some(dir.path())).unwrap();
        assert_eq!(source, ConfigSource::Project);
        assert_eq!(config.artifacts.model, PathBuf::from("m.json"));
    }

    #[test]
    fn test_project_config_parse_error_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILE), "artifacts = 3").unwrap();

        assert!(VintnerConfig::load_standard(Some(dir.path())).is_err());
    }
}
