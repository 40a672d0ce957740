//! Error types for registration and configuration loading
//!
//! Frame-loop code never returns these; it recovers locally and logs instead.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a view-mode definition is rejected by the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewModeError {
    #[error("view mode id must not be empty")]
    EmptyId,
    #[error("view mode '{0}' is already registered")]
    DuplicateId(String),
    #[error("view mode '{id}': {field} must be finite, got {value}")]
    NonFinite {
        id: String,
        field: &'static str,
        value: f64,
    },
    #[error("view mode '{id}': visual sizes need max > min > 0, got min {min} max {max}")]
    InvalidSizeRange { id: String, min: f64, max: f64 },
    #[error("view mode '{id}': camera distances need max > min > 0, got min {min} max {max}")]
    InvalidDistanceRange { id: String, min: f64, max: f64 },
    #[error("view mode '{id}': {field} must be positive, got {value}")]
    NotPositive {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// Failures while reading RON configuration or system files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("view mode rejected: {0}")]
    ViewMode(#[from] ViewModeError),
}
