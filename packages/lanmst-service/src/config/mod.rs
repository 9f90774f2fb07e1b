//! Configuration System
//!
//! Versioned YAML file with three sections, every field optional:
//!
//! ```yaml
//! version: 1
//! store:
//!   self_loops: reject   # or: allow
//! export:
//!   dir: static
//!   json_file: lan_network.json
//!   txt_file: pt_topology.txt
//!   dot_file: mst_graph.dot
//!   weight_unit: m
//! logging:
//!   filter: info
//! ```
//!
//! Precedence: defaults < YAML file < environment (`LANMST_EXPORT_DIR`).

pub mod error;

pub use error::{ConfigError, ConfigResult};

use lanmst_engine::ExportConfig;
use lanmst_storage::SelfLoopPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;
pub const SUPPORTED_VERSIONS: &[u32] = &[1];
pub const EXPORT_DIR_ENV: &str = "LANMST_EXPORT_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StoreConfig {
    pub self_loops: SelfLoopPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `LANMST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanMstConfig {
    pub version: u32,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Same layout with an optional version, to report a missing one clearly
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    version: Option<u32>,
    #[serde(default)]
    store: StoreConfig,
    #[serde(default)]
    export: ExportConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl Default for LanMstConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            store: StoreConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LanMstConfig {
    /// Load and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(content)?;
        let version = raw.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            version,
            store: raw.store,
            export: raw.export,
            logging: raw.logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// File if given, defaults otherwise; environment applied last
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_yaml(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(EXPORT_DIR_ENV) {
            if !dir.is_empty() {
                self.export.dir = PathBuf::from(dir);
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let export = &self.export;
        for (field, value) in [
            ("export.json_file", &export.json_file),
            ("export.txt_file", &export.txt_file),
            ("export.dot_file", &export.dot_file),
        ] {
            if value.is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(ConfigError::invalid(
                    field,
                    "must be a file name; set export.dir for the directory",
                ));
            }
        }
        if export.weight_unit.is_empty() {
            return Err(ConfigError::invalid("export.weight_unit", "must not be empty"));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::invalid("logging.filter", "must not be empty"));
        }
        Ok(())
    }
}
