//! Layered, typed configuration for Strata
//!
//! This crate provides an immutable typed key-value store built once through
//! a one-shot builder, plus decorator layers that override typed defaults
//! with values parsed from string sources (environment variables, property
//! tables). String parsing is delegated to the deserializer registry in
//! `strata-registry`.
//!
//! Construction is strictly separated from reading: layers convert their
//! overrides eagerly and fail fast, so application code only ever observes a
//! fully valid configuration.

pub mod env;
pub mod error;
pub mod layer;
pub mod props;
pub mod store;

// Re-export main types
pub use env::EnvConfig;
pub use error::{ConfigError, ConfigResult};
pub use layer::StringOverrideLayer;
pub use props::PropertiesConfig;
pub use store::{Config, ConfigBuilder, ConfigExt, ConfigStore};

// Re-export the core leaf types for convenience
pub use strata_core::{ConfigValue, CoreError, Key, TypeTag, TypedValue};
