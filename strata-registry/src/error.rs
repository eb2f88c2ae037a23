//! Registry and discovery error types

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Registry result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced by capability discovery and the deserializer registry
///
/// `Clone` is required because the process-wide registry caches its
/// construction result and hands the same error to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No deserializer is registered for the requested target type
    #[error("found no deserializer for target type '{target}'")]
    NoDeserializer { target: &'static str },

    /// Two discovered capabilities claim the same target type
    #[error("multiple deserializers claim target type '{target}'")]
    DuplicateDeserializer { target: &'static str },

    /// A deserializer rejected its input string
    #[error("cannot deserialize '{raw}' as '{target}': {reason}")]
    MalformedValue {
        target: &'static str,
        raw: String,
        reason: String,
    },

    /// The capability namespace could not be enumerated
    #[error("failed to enumerate capability namespace '{namespace}': {reason}")]
    Discovery { namespace: String, reason: String },
}

impl RegistryError {
    /// Create a malformed-value error for target type `T`
    pub fn malformed<T: Any>(raw: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedValue {
            target: std::any::type_name::<T>(),
            raw: raw.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a discovery failure for the given namespace
    pub fn discovery(namespace: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Discovery {
            namespace: namespace.into(),
            reason: reason.into(),
        }
    }
}
