//! Error types for textboard
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for textboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the text plugin
#[derive(Debug, Error)]
pub enum Error {
    /// The backing store has no records for this run/tag combination
    #[error("No records for run {run:?} tag {tag:?}")]
    NotFound {
        /// Run that was queried
        run: String,
        /// Tag that was queried
        tag: String,
    },

    /// A legacy plugin asset does not exist for the run
    #[error("Asset {asset:?} not found for run {run:?}")]
    AssetNotFound {
        /// Run that was queried
        run: String,
        /// Asset file name
        asset: String,
    },

    /// I/O error (asset files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A legacy tag index file could not be parsed
    #[error("Malformed legacy index for run {run:?}: {reason}")]
    MalformedLegacyIndex {
        /// Run owning the index file
        run: String,
        /// Parser message
        reason: String,
    },

    /// A stored payload could not be decoded into text
    #[error("Decode error: {0}")]
    Decode(String),

    /// Backing store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Whether this error means "nothing stored here"
    ///
    /// Request handlers treat these as empty results rather than failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::AssetNotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
