//! Crate-wide error type for the I/O edges around the engine.
//!
//! The engine functions themselves are total; only loading catalogs,
//! reading requests, validating production data and exporting CSV can fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("production series must contain exactly 12 monthly values, found {found}")]
    InvalidProductionSeries { found: usize },

    #[error("product catalog key \"{0}\" is not a kit size in watts")]
    InvalidProductKey(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{}", join_config_errors(.0))]
    Config(Vec<ConfigError>),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
