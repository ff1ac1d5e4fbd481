//! Error types for the sweep harness.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring a sweep or writing its results.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The configuration failed validation.
    #[error("invalid sweep configuration: {0}")]
    InvalidConfig(String),
    /// The host has no test object to instantiate.
    #[error("simulation host has no test object configured")]
    MissingTestObject,
    /// A configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A configuration file was not valid TOML for [`crate::SweepConfig`].
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Filesystem failure on the results file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
