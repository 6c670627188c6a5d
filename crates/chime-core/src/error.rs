//! Core error types for chime-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures reject the operation with no state mutation; persistence
//! failures are fatal to the core, which has no fallback store.

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

/// Core error type for chime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Alarm store persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alarm-store-specific errors. All of them mean the durable list could
/// not be read or written; none of them are retried by the core.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the alarm list
    #[error("Failed to read alarm list at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the alarm list
    #[error("Failed to write alarm list at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The on-disk list exists but is not valid JSON
    #[error("Alarm list at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to encode the alarm list
    #[error("Failed to encode alarm list: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors. Operating on a missing alarm id is deliberately NOT
/// an error anywhere in the crate; it is swallowed as a no-op.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A time-of-day component is out of range
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// An alarm with the same time and name is already scheduled
    #[error("An alarm named '{name}' at {time} already exists")]
    DuplicateAlarm { time: NaiveTime, name: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
