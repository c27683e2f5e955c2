//! Theme store error types
//!
//! Defines all errors that can occur in the store and preference layer.
//! None of these escape the store's mutators; they surface only through the
//! explicit fallible entry points and the preference backends.

use thiserror::Error;

/// Errors that can occur in the theme store
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A display mode string was not one of light, dark or dynamic
    #[error("Invalid display mode: {0:?}")]
    InvalidDisplayMode(String),

    /// Preference storage is unavailable or rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::Serialization(err.to_string())
    }
}

/// Result type alias for theme store operations
pub type ThemeResult<T> = Result<T, ThemeError>;
