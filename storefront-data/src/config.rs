use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Site the public pattern library is served from.
pub const DEFAULT_PATTERN_SOURCE_SITE_ID: u64 = 174455;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the `storefront` tool.
///
/// ```toml
/// pattern_source_site_id = 174455
/// log_level = "debug"
/// site = "example.com"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub pattern_source_site_id: u64,
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub log_level: String,
    pub site: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pattern_source_site_id: DEFAULT_PATTERN_SOURCE_SITE_ID,
            log_level: "info".to_string(),
            site: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pattern_source_site_id, 174455);
    }

    #[test]
    fn partial_config_overrides_given_keys() {
        let config = AppConfig::from_toml_str("site = \"example.com\"\nlog_level = \"debug\"").unwrap();

        assert_eq!(config.site.as_deref(), Some("example.com"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.pattern_source_site_id, DEFAULT_PATTERN_SOURCE_SITE_ID);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = AppConfig::from_toml_str("backend = \"sqlite\"");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("does/not/exist.toml")).unwrap_err();

        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
