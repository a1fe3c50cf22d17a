//! Configuration for the spatial index
//!
//! This module provides the tunables for tree subdivision and identity
//! handling, and re-exports the value types from the `quadspace-types` crate
//! for convenience.
use serde::de::Error;
use std::path::Path;

use crate::error::{QuadspaceError, Result};

pub use quadspace_types::bbox::BoundingBox;
pub use quadspace_types::point::Position;
pub use quadspace_types::stats::IndexStats;

/// Split thresholds above this are accepted but rarely what callers want.
const LARGE_SPLIT_THRESHOLD: usize = 1024;

/// Index configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum quadrant width/height; a leaf splits only while both of its
    /// dimensions exceed twice this value.
    #[serde(default = "Config::default_cell_size")]
    pub cell_size: u32,

    /// Number of objects a leaf may hold before it tries to split.
    #[serde(default = "Config::default_split_threshold")]
    pub split_threshold: usize,

    /// Reject inserts whose identity is already indexed.
    #[serde(default)]
    pub reject_duplicate_ids: bool,
}

impl Config {
    const fn default_cell_size() -> u32 {
        16
    }

    const fn default_split_threshold() -> usize {
        8
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        assert!(cell_size > 0, "Cell size must be greater than zero");
        self.cell_size = cell_size;
        self
    }

    pub fn with_split_threshold(mut self, threshold: usize) -> Self {
        assert!(threshold > 0, "Split threshold must be greater than zero");

        if threshold > LARGE_SPLIT_THRESHOLD {
            log::warn!(
                "Split threshold of {} is very large; leaves will be scanned linearly \
                on every query that reaches them.",
                threshold
            );
        }

        self.split_threshold = threshold;
        self
    }

    pub fn with_reject_duplicate_ids(mut self, reject: bool) -> Self {
        self.reject_duplicate_ids = reject;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cell_size == 0 {
            return Err("Cell size must be greater than zero".to_string());
        }

        if self.split_threshold == 0 {
            return Err("Split threshold must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.json` is always supported; `.toml` requires the `toml` feature.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::from_json(&contents)?),
            #[cfg(feature = "toml")]
            Some("toml") => Ok(Self::from_toml(&contents)?),
            other => Err(QuadspaceError::InvalidConfig(format!(
                "unsupported config format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: Self::default_cell_size(),
            split_threshold: Self::default_split_threshold(),
            reject_duplicate_ids: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.split_threshold, 8);
        assert!(!config.reject_duplicate_ids);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_cell_size(4)
            .with_split_threshold(32)
            .with_reject_duplicate_ids(true);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "cell_size": 10 }"#).unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.split_threshold, 8);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        assert!(Config::from_json(r#"{ "cell_size": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "split_threshold": 0 }"#).is_err());
        assert!(Config::from_json(r#"{ "max_depth": 3 }"#).is_err());
    }

    #[test]
    #[should_panic(expected = "Cell size must be greater than zero")]
    fn test_with_cell_size_zero_panics() {
        let _ = Config::default().with_cell_size(0);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "cell_size": 5, "reject_duplicate_ids": true }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.cell_size, 5);
        assert!(config.reject_duplicate_ids);
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, QuadspaceError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, QuadspaceError::Io(_)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip_and_load() {
        let config = Config::default().with_cell_size(12);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "cell_size = 3\nsplit_threshold = 4\n").unwrap();
        let loaded = Config::load(file.path()).unwrap();
        assert_eq!(loaded.cell_size, 3);
        assert_eq!(loaded.split_threshold, 4);
    }
}
