//! Core error types shared across the configuration crates

use thiserror::Error;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the core key and value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Key syntax violation
    #[error("invalid key '{raw}': {reason}")]
    InvalidKey {
        raw: String,
        reason: &'static str,
    },

    /// A stored value was requested as an incompatible type
    #[error("cannot read a stored '{stored}' as '{requested}'")]
    TypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },
}

impl CoreError {
    /// Create a new invalid key error
    pub fn invalid_key(raw: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidKey {
            raw: raw.into(),
            reason,
        }
    }
}
