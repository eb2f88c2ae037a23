//! Environment-variable configuration layer

use std::sync::Arc;

use strata_core::{Key, TypedValue};

use crate::error::ConfigResult;
use crate::layer::StringOverrideLayer;
use crate::store::Config;

/// Override layer backed by the process environment
///
/// Each declared key is looked up under its environment name: the leading
/// `/` stripped, the remaining `/` replaced by `_`, upper-cased. The key
/// `/db/host` reads `DB_HOST`.
#[derive(Debug)]
pub struct EnvConfig {
    inner: StringOverrideLayer,
}

impl EnvConfig {
    /// Build an environment layer over `base`.
    pub fn new(base: Arc<dyn Config>) -> ConfigResult<Self> {
        let inner =
            StringOverrideLayer::new(base, |key| std::env::var(Self::env_name(key)).ok())?;
        Ok(Self { inner })
    }

    /// The environment variable name for a key.
    pub fn env_name(key: &Key) -> String {
        key.as_str()[1..].replace('/', "_").to_uppercase()
    }
}

impl Config for EnvConfig {
    fn contains_key(&self, key: &Key) -> bool {
        self.inner.contains_key(key)
    }

    fn entry(&self, key: &Key) -> ConfigResult<&TypedValue> {
        self.inner.entry(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        self.inner.keys()
    }
}
