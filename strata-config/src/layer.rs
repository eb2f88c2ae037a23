//! String-override layers
//!
//! A [`StringOverrideLayer`] decorates a base [`Config`]: for every key the
//! base declares, an external lookup function may supply a string which is
//! converted to the key's declared type through the deserializer registry.
//! Conversion happens eagerly at construction, so a malformed override fails
//! the layer instead of surfacing at read time.

use std::collections::HashMap;
use std::sync::Arc;

use strata_core::{Key, TypedValue};
use strata_registry::DeserializerRegistry;

use crate::error::{ConfigError, ConfigResult};
use crate::store::{Config, ConfigExt};

/// Read view that overrides a subset of a base configuration's values
///
/// The layer's key set is always a subset of the base's; keys without an
/// override fall through. Layers chain: the base may itself be a layer, and
/// the outermost layer wins.
pub struct StringOverrideLayer {
    base: Arc<dyn Config>,
    overrides: HashMap<Key, TypedValue>,
}

impl StringOverrideLayer {
    /// Build a layer over `base` using the process-wide deserializer registry.
    pub fn new<F>(base: Arc<dyn Config>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&Key) -> Option<String>,
    {
        let registry = DeserializerRegistry::shared().map_err(ConfigError::from)?;
        Self::with_registry(base, registry, lookup)
    }

    /// Build a layer over `base` with an explicit registry.
    ///
    /// Queries `lookup` for every key the base declares and converts each
    /// supplied string to the key's declared type. Any conversion failure
    /// aborts construction.
    pub fn with_registry<F>(
        base: Arc<dyn Config>,
        registry: &DeserializerRegistry,
        lookup: F,
    ) -> ConfigResult<Self>
    where
        F: Fn(&Key) -> Option<String>,
    {
        let mut overrides = HashMap::new();
        for key in base.keys() {
            let Some(raw) = lookup(key) else {
                continue;
            };
            let target = base.declared_type(key)?;
            let value = registry.convert(target, &raw)?;
            tracing::debug!(
                target: "config_layer",
                key = %key,
                declared = %target,
                "applied string override"
            );
            overrides.insert(key.clone(), value);
        }

        Ok(Self { base, overrides })
    }

    /// Number of keys this layer overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Config for StringOverrideLayer {
    fn contains_key(&self, key: &Key) -> bool {
        self.overrides.contains_key(key) || self.base.contains_key(key)
    }

    fn entry(&self, key: &Key) -> ConfigResult<&TypedValue> {
        match self.overrides.get(key) {
            Some(value) => Ok(value),
            None => self.base.entry(key),
        }
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        self.base.keys()
    }
}

impl std::fmt::Debug for StringOverrideLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringOverrideLayer")
            .field("base", &self.base)
            .field("overrides", &self.overrides)
            .finish()
    }
}
