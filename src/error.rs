//! Error types for the fuzzpost library.
//!
//! The matching core never fails: edit distance and window search are total
//! functions over any pair of strings. Errors only come from the layers
//! around it (function calls with bad arguments, malformed filter
//! expressions, configuration and input files). All of them are represented
//! by the [`FuzzpostError`] enum.
//!
//! # Examples
//!
//! ```
//! use fuzzpost::error::{FuzzpostError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FuzzpostError::invalid_config("threshold must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for fuzzpost operations.
#[derive(Error, Debug)]
pub enum FuzzpostError {
    /// I/O errors (reading data or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Query-related errors (expression evaluation, type mismatches)
    #[error("Query error: {0}")]
    Query(String),

    /// Scalar function errors (unknown function, arity, argument types)
    #[error("Function error: {0}")]
    Function(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying context about what was being loaded
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FuzzpostError.
pub type Result<T> = std::result::Result<T, FuzzpostError>;

impl FuzzpostError {
    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        FuzzpostError::Query(msg.into())
    }

    /// Create a new function error.
    pub fn function<S: Into<String>>(msg: S) -> Self {
        FuzzpostError::Function(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        FuzzpostError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        FuzzpostError::Other(format!("Not found: {}", msg.into()))
    }
}
