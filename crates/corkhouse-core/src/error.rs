//! Core error types for corkhouse-core.
//!
//! Inside a session, bad counts and failed writes are never errors: counts
//! are ignored and writes are logged. [`CoreError`] is what the outer
//! surfaces (the CLI) report back to the user.

use std::path::PathBuf;
use thiserror::Error;

use crate::contributor::Contributor;

/// Core error type for corkhouse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected input or request
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-separated key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence gateway errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode contribution log: {0}")]
    Encode(#[from] serde_json::Error),

    /// Store refused the write (used by the in-memory store).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown contributor '{0}' (expected one of: Markus, Diana)")]
    UnknownContributor(String),

    #[error("Unknown locale '{0}' (expected 'en' or 'de')")]
    UnknownLocale(String),

    #[error("Goal must be a positive number of corks")]
    ZeroGoal,

    #[error("no contributor selected: pass --as <name> or set CORKHOUSE_USER")]
    NoContributor,

    #[error("only {admin} can reset progress")]
    NotAdmin { admin: Contributor },

    #[error("this wipes all corks and cannot be undone; re-run with --yes")]
    ResetNotConfirmed,

    #[error("at most {max} corks can be added at once (got {count})")]
    BatchTooLarge { count: i64, max: i64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
