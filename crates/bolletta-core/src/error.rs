//! Error types for the bolletta-core library.
//!
//! The extraction pipeline itself is total: a pattern that fails to match
//! or a value that fails validation simply leaves its field absent. Errors
//! here cover the library boundary only (configuration, collaborator I/O).

use thiserror::Error;

/// Main error type for the bolletta library.
#[derive(Error, Debug)]
pub enum BollettaError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the bolletta library.
pub type Result<T> = std::result::Result<T, BollettaError>;
