//! Core types for the Strata configuration system
//!
//! This crate holds the leaf types shared by the configuration store and the
//! deserializer registry: validated hierarchical keys and tagged typed
//! values. Keeping them in a dedicated crate breaks the dependency cycle
//! between the store (which converts override strings through the registry)
//! and the registry (which ships a key deserializer).

pub mod error;
pub mod key;
pub mod value;

// Re-export main types
pub use error::{CoreError, CoreResult};
pub use key::Key;
pub use value::{ConfigValue, TypeTag, TypedValue};
