//! Configuration loading
//!
//! User configuration lives in `config.yaml` under the platform config
//! directory (e.g. `~/.config/schem/config.yaml` on Linux). Every field is
//! optional.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::allocator::DEFAULT_PART_LIMIT;
use crate::core::numeric::DEFAULT_SIGNIFICANT_DIGITS;
use crate::core::service::RegistryService;

const CONFIG_FILE: &str = "config.yaml";

/// Errors that can occur while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Invalid config: {field} must be at least 1")]
    ZeroValue { field: &'static str },
}

/// Tool and registry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of live parts sharing one ID prefix
    pub part_limit: usize,

    /// Significant digits used when rounding values
    pub significant_digits: usize,

    /// Label unit options with localized numeral prefixes
    pub localized_labels: bool,

    /// Unit label used when none is given
    pub unit: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            part_limit: DEFAULT_PART_LIMIT,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            localized_labels: false,
            unit: "Ω".to_string(),
        }
    }
}

impl Config {
    /// Path of the user config file, if a home directory can be determined
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "schem").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the user config, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::user_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yml::from_str(content)?;
        if config.part_limit == 0 {
            return Err(ConfigError::ZeroValue { field: "part_limit" });
        }
        if config.significant_digits == 0 {
            return Err(ConfigError::ZeroValue {
                field: "significant_digits",
            });
        }
        Ok(config)
    }

    /// Build an empty registry service honoring this config
    pub fn registry_service(&self) -> RegistryService {
        RegistryService::with_part_limit(self.part_limit)
    }
}
