//! Error types for the Quanda library.
//!
//! All fallible operations in Quanda return [`Result`], whose error type is
//! the [`QuandaError`] enum. Construction-time failures (unreadable import
//! sources, a closed index) surface as errors; per-lookup degradation is
//! logged and resolved as an empty result by the callers instead.
//!
//! # Examples
//!
//! ```
//! use quanda::error::{QuandaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(QuandaError::invalid_operation("dictionary already closed"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Quanda operations.
#[derive(Error, Debug)]
pub enum QuandaError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors while importing surface forms into a dictionary
    #[error("Import error: {0}")]
    Import(String),

    /// Dictionary-related errors (index construction, closed handles)
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Knowledge-source errors (relation lookup backends)
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with QuandaError.
pub type Result<T> = std::result::Result<T, QuandaError>;

impl QuandaError {
    /// Create a new import error.
    pub fn import<S: Into<String>>(msg: S) -> Self {
        QuandaError::Import(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        QuandaError::Dictionary(msg.into())
    }

    /// Create a new knowledge-source error.
    pub fn knowledge<S: Into<String>>(msg: S) -> Self {
        QuandaError::Knowledge(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        QuandaError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        QuandaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = QuandaError::import("Truncated line");
        assert_eq!(error.to_string(), "Import error: Truncated line");

        let error = QuandaError::dictionary("Index closed");
        assert_eq!(error.to_string(), "Dictionary error: Index closed");

        let error = QuandaError::invalid_operation("lookup after close");
        assert_eq!(
            error.to_string(),
            "Invalid operation: lookup after close"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let error: QuandaError = io_error.into();
        assert!(error.to_string().contains("I/O error"));
    }
}
