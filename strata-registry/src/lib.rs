//! Capability discovery and the deserializer registry for Strata
//!
//! This crate locates string-to-value conversion capabilities through a
//! compile-time registration table and indexes them by target type into an
//! immutable, process-wide registry. The override layers in `strata-config`
//! drive all of their string parsing through [`DeserializerRegistry::convert`].

pub mod deserializers;
pub mod discovery;
pub mod error;
pub mod registry;

// Re-export main types
pub use discovery::Capability;
pub use error::{RegistryError, RegistryResult};
pub use registry::{Deserializer, DeserializerRegistry, DESERIALIZER_NAMESPACE};

// Re-exported for use by `register_deserializer!`
pub use inventory;

/// Register a deserializer capability into the discovery table
///
/// The type must implement [`Deserializer`] and [`Default`] (the
/// zero-argument constructor required of every capability). Construction is
/// deferred until the registry is built.
///
/// # Example
/// ```rust,ignore
/// #[derive(Default)]
/// struct PortDeserializer;
///
/// impl strata_registry::Deserializer for PortDeserializer {
///     // ...
/// }
///
/// strata_registry::register_deserializer!(PortDeserializer);
/// ```
#[macro_export]
macro_rules! register_deserializer {
    ($ty:ty) => {
        $crate::inventory::submit! {
            $crate::Capability::<dyn $crate::Deserializer>::new(
                ::core::stringify!($ty),
                || ::std::boxed::Box::new(<$ty as ::core::default::Default>::default()),
            )
        }
    };
}
