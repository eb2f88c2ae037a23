//! The deserializer registry
//!
//! Built once from the discovered conversion capabilities, indexed by the
//! target type each capability declares. Read-only after construction.

use std::collections::HashMap;
use std::sync::OnceLock;

use strata_core::{TypeTag, TypedValue};

use crate::discovery::{self, Capability};
use crate::error::{RegistryError, RegistryResult};

/// The namespace scanned for string-to-value conversion capabilities
pub const DESERIALIZER_NAMESPACE: &str = "deserializers";

/// A string-to-typed-value conversion capability
///
/// Implementations declare exactly one target type and must produce a
/// [`TypedValue`] tagged with that type. Registration requires a
/// zero-argument constructor, expressed as a [`Default`] bound in
/// [`register_deserializer!`](crate::register_deserializer).
pub trait Deserializer: Send + Sync {
    /// The type this capability converts to
    fn target(&self) -> TypeTag;

    /// Convert the raw string into a value of the target type
    fn deserialize(&self, raw: &str) -> RegistryResult<TypedValue>;
}

inventory::collect!(Capability<dyn Deserializer>);

/// Immutable index of conversion capabilities, keyed by target type
pub struct DeserializerRegistry {
    deserializers: HashMap<TypeTag, Box<dyn Deserializer>>,
}

impl DeserializerRegistry {
    /// Build the registry from the discovered capability set.
    ///
    /// Every discovered factory is instantiated exactly once. Fails if the
    /// namespace cannot be enumerated or two capabilities claim the same
    /// target type.
    pub fn discover() -> RegistryResult<Self> {
        let capabilities = discovery::discover::<dyn Deserializer>(DESERIALIZER_NAMESPACE)?;
        Self::from_deserializers(capabilities.into_iter().map(Capability::instantiate))
    }

    /// Build a registry from explicit deserializer instances.
    ///
    /// Fails with [`RegistryError::DuplicateDeserializer`] if two instances
    /// declare the same target type.
    pub fn from_deserializers(
        deserializers: impl IntoIterator<Item = Box<dyn Deserializer>>,
    ) -> RegistryResult<Self> {
        let mut index = HashMap::new();
        for deserializer in deserializers {
            let target = deserializer.target();
            if index.insert(target, deserializer).is_some() {
                return Err(RegistryError::DuplicateDeserializer {
                    target: target.name(),
                });
            }
        }

        tracing::info!(
            target: "deserializer_registry",
            count = index.len(),
            "deserializer registry initialized"
        );

        Ok(Self {
            deserializers: index,
        })
    }

    /// The process-wide registry, built at most once.
    ///
    /// The construction result (success or failure) is cached; concurrent
    /// first callers race on a single initialization and all observe the
    /// same outcome.
    pub fn shared() -> RegistryResult<&'static Self> {
        static SHARED: OnceLock<RegistryResult<DeserializerRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(Self::discover)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Convert `raw` into a value of the given target type.
    pub fn convert(&self, target: TypeTag, raw: &str) -> RegistryResult<TypedValue> {
        let deserializer =
            self.deserializers
                .get(&target)
                .ok_or(RegistryError::NoDeserializer {
                    target: target.name(),
                })?;
        deserializer.deserialize(raw)
    }

    /// Whether a deserializer is registered for the given target type.
    pub fn supports(&self, target: TypeTag) -> bool {
        self.deserializers.contains_key(&target)
    }

    /// Number of registered deserializers.
    pub fn len(&self) -> usize {
        self.deserializers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.deserializers.is_empty()
    }
}

impl std::fmt::Debug for DeserializerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut targets: Vec<&str> = self.deserializers.keys().map(TypeTag::name).collect();
        targets.sort_unstable();
        f.debug_struct("DeserializerRegistry")
            .field("targets", &targets)
            .finish()
    }
}
