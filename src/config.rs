//! TOML-based application configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::verdict::CoverageTarget;

/// Top-level configuration parsed from TOML.
///
/// Every section is optional. Load with [`AppConfig::from_toml_file`] or
/// use [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Reference table locations.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Request defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP adapter settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Reference table locations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// JSON product table keyed by kit watts. The built-in entry is used
    /// when unset or unreadable.
    pub products_path: Option<PathBuf>,
    /// TOML `[[appliance]]` table. The built-in table is used when unset.
    pub appliances_path: Option<PathBuf>,
}

/// Values applied when a request leaves them out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Coverage target percentage: 50, 70 or 90.
    pub coverage_target: u8,
    /// Kit size (W) a production series refers to when the kit size is auto-selected.
    pub reference_kit_watts: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            coverage_target: 70,
            reference_kit_watts: 100,
        }
    }
}

/// Log filter, overridden by `RUST_LOG` when set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"solar_prescription=debug"`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// HTTP adapter settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"defaults.coverage_target"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl AppConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Reads and validates the file at `path`, or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] listing every problem found.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path).map_err(|e| crate::Error::Config(vec![e]))?,
            None => Self::default(),
        };
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(crate::Error::Config(errors))
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let d = &self.defaults;
        if CoverageTarget::try_from_percent(d.coverage_target).is_none() {
            errors.push(ConfigError {
                field: "defaults.coverage_target".into(),
                message: format!("must be 50, 70 or 90, got {}", d.coverage_target),
            });
        }
        if d.reference_kit_watts == 0 {
            errors.push(ConfigError {
                field: "defaults.reference_kit_watts".into(),
                message: "must be > 0".into(),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        if self.api.port == 0 {
            errors.push(ConfigError {
                field: "api.port".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
