//! Shared error types for bucketmap.
//!
//! The normalization pipeline itself never fails: invalid inputs degrade to
//! `null` buckets. Errors only surface while building a normalization plan,
//! loading configuration, or doing I/O from the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bucketmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Scale range whose lower bound exceeds its upper bound
    #[error("Invalid scale range: min {min} is greater than max {max}")]
    InvalidScaleRange { min: i64, max: i64 },

    /// Classification table that is empty, unordered or overlapping
    #[error("Invalid classification table '{table}': {message}")]
    InvalidTable { table: String, message: String },

    /// A field policy references a table nobody defined
    #[error("Unknown classification table '{0}'")]
    UnknownTable(String),

    /// Fill color lookup failures reported by a rendering surface
    #[error("Fill lookup failed for '{entity}': {message}")]
    Lookup { entity: String, message: String },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create an invalid table error
    pub fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
