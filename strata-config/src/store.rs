//! The typed configuration store and its builder
//!
//! A [`ConfigStore`] is an immutable mapping from [`Key`] to a typed value,
//! produced exactly once by a [`ConfigBuilder`]. The [`Config`] trait is the
//! read surface shared with the override layers; [`ConfigExt`] adds the
//! generic typed accessors on top of it.

use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use strata_core::{ConfigValue, Key, TypeTag, TypedValue};

use crate::error::{ConfigError, ConfigResult};

/// Read-only view of a layered configuration
///
/// Object-safe so layers can hold their base as `Arc<dyn Config>` and chains
/// of arbitrary depth compose.
pub trait Config: fmt::Debug + Send + Sync {
    /// Whether the configuration declares the given key
    fn contains_key(&self, key: &Key) -> bool;

    /// The typed value stored under `key`
    fn entry(&self, key: &Key) -> ConfigResult<&TypedValue>;

    /// All declared keys, independent of override layers
    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_>;
}

/// Generic typed accessors for any [`Config`]
pub trait ConfigExt: Config {
    /// The value stored under `key`, read as type `T`.
    ///
    /// Fails with `NoSuchKey` if the key is absent and `TypeMismatch` if the
    /// declared type is not `T`.
    fn get<T: Any + Clone>(&self, key: &Key) -> ConfigResult<T> {
        let value = self.entry(key)?;
        Ok(value.downcast_ref::<T>().map_err(ConfigError::from)?.clone())
    }

    /// The declared type of the value stored under `key`.
    fn declared_type(&self, key: &Key) -> ConfigResult<TypeTag> {
        Ok(self.entry(key)?.tag())
    }
}

impl<C: Config + ?Sized> ConfigExt for C {}

/// Immutable Key -> TypedValue mapping, created through [`ConfigBuilder`]
#[derive(Debug)]
pub struct ConfigStore {
    entries: HashMap<Key, TypedValue>,
}

impl ConfigStore {
    /// Start building a new store.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Config for ConfigStore {
    fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    fn entry(&self, key: &Key) -> ConfigResult<&TypedValue> {
        self.entries
            .get(key)
            .ok_or_else(|| ConfigError::NoSuchKey { key: key.clone() })
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        Box::new(self.entries.keys())
    }
}

/// One-shot builder for a [`ConfigStore`]
///
/// Single-owner and not thread-safe; the `Building -> Built` transition is
/// one-way. Dropping a builder that never built a store logs a warning,
/// since keys were declared but never became usable.
#[must_use = "a builder that is never built produces no configuration"]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    entries: HashMap<Key, TypedValue>,
    built: bool,
}

impl ConfigBuilder {
    /// Create a builder in the `Building` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` with the given typed default value.
    ///
    /// Fails with `DuplicateKey` if the key was already added and
    /// `AlreadyBuilt` after `build()`.
    pub fn add<T: ConfigValue>(&mut self, key: Key, default: T) -> ConfigResult<&mut Self> {
        if self.built {
            return Err(ConfigError::AlreadyBuilt);
        }

        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Err(ConfigError::DuplicateKey {
                key: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                vacant.insert(TypedValue::new(default));
                Ok(self)
            }
        }
    }

    /// Freeze the declared entries into an immutable store.
    ///
    /// Valid once; a second call fails with `AlreadyBuilt`.
    pub fn build(&mut self) -> ConfigResult<ConfigStore> {
        if self.built {
            return Err(ConfigError::AlreadyBuilt);
        }
        self.built = true;

        Ok(ConfigStore {
            entries: std::mem::take(&mut self.entries),
        })
    }
}

impl Drop for ConfigBuilder {
    fn drop(&mut self) {
        if !self.built && !self.entries.is_empty() {
            tracing::warn!(
                target: "config_builder",
                keys = self.entries.len(),
                "builder dropped without build(); declared keys never became a store"
            );
        }
    }
}
