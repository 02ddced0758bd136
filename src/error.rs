//! Error types for the surfsup application.
//!
//! Startup failures (missing dataset, schema mismatch, bad configuration) are
//! fatal. Request-time failures are turned into HTTP responses by the handlers.

use thiserror::Error;

/// The main error type for surfsup operations.
#[derive(Error, Debug)]
pub enum SurfsUpError {
    /// SQLite driver errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The dataset does not match the declared table layout
    #[error("Schema error in table '{table}': {message}")]
    Schema { table: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SurfsUpError {
    /// Whether this error comes from the database driver
    pub fn is_database(&self) -> bool {
        matches!(self, SurfsUpError::Database(_))
    }
}

/// Convenience type alias for Results with SurfsUpError
pub type Result<T> = std::result::Result<T, SurfsUpError>;
