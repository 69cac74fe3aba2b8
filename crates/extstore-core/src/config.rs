//! Converter configuration, loadable from TOML.

use crate::DEFAULT_MAX_DEPTH;
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_depth must be at least 1")]
    ZeroDepth,
}

///
/// ConvertConfig
///
/// ```toml
/// max_depth = 16
/// debug = true
/// omit_empty_maps = true
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Deepest record nesting accepted before conversion fails.
    pub max_depth: usize,

    /// Print `[debug]` traces of every conversion step to stdout.
    pub debug: bool,

    /// Leave empty associative fields unwritten, as for empty sequences.
    pub omit_empty_maps: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            debug: false,
            omit_empty_maps: true,
        }
    }
}

impl ConvertConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;

        Self::from_toml_str(&source)
    }

    const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = ConvertConfig::from_toml_str("").expect("defaults");

        assert_eq!(config, ConvertConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.omit_empty_maps);
    }

    #[test]
    fn fields_override_defaults() {
        let config = ConvertConfig::from_toml_str("max_depth = 4\ndebug = true\nomit_empty_maps = false")
            .expect("parse");

        assert_eq!(config.max_depth, 4);
        assert!(config.debug);
        assert!(!config.omit_empty_maps);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = ConvertConfig::from_toml_str("max_depth = 0").expect_err("zero depth");

        assert!(matches!(err, ConfigError::ZeroDepth));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConvertConfig::from_toml_str("depth = 3").expect_err("unknown key");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_io() {
        let err = ConvertConfig::from_path("/definitely/not/here.toml").expect_err("io");

        assert!(matches!(err, ConfigError::Io(_)));
    }
}
