//! Configuration error types

use strata_core::{CoreError, Key};
use strata_registry::RegistryError;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Key syntax or value type violation
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The key was already added to the builder
    #[error("the key '{key}' has already been added")]
    DuplicateKey { key: Key },

    /// The builder was used after `build()`
    #[error("the builder has already been built")]
    AlreadyBuilt,

    /// The configuration does not contain the requested key
    #[error("the configuration does not contain the key '{key}'")]
    NoSuchKey { key: Key },

    /// Conversion or discovery failure while building an override layer
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
