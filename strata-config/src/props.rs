//! Property-table configuration layer

use std::collections::HashMap;
use std::sync::Arc;

use strata_core::{Key, TypedValue};

use crate::error::ConfigResult;
use crate::layer::StringOverrideLayer;
use crate::store::Config;

/// Override layer backed by a string-keyed property table
///
/// Each declared key is looked up under its property name: the leading `/`
/// stripped and the remaining `/` replaced by `_`, case preserved. The key
/// `/db/host` reads the property `db_host`. How the table itself is read
/// (from a file or elsewhere) is the caller's concern.
#[derive(Debug)]
pub struct PropertiesConfig {
    inner: StringOverrideLayer,
}

impl PropertiesConfig {
    /// Build a properties layer over `base`.
    pub fn new(base: Arc<dyn Config>, properties: &HashMap<String, String>) -> ConfigResult<Self> {
        let inner = StringOverrideLayer::new(base, |key| {
            properties.get(&Self::property_name(key)).cloned()
        })?;
        Ok(Self { inner })
    }

    /// The property name for a key.
    pub fn property_name(key: &Key) -> String {
        key.as_str()[1..].replace('/', "_")
    }
}

impl Config for PropertiesConfig {
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
