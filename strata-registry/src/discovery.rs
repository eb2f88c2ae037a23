//! Capability discovery over a compile-time registration table
//!
//! Capabilities are concrete implementations of a narrow interface `T`
//! registered into a process-wide table at link time (via `inventory`).
//! Discovery enumerates the table and yields lazy factories; nothing is
//! instantiated until a factory is invoked. This replaces runtime namespace
//! scanning with an explicit table while keeping the same contract: a
//! deterministic, unordered set of zero-argument constructors.

use crate::error::{RegistryError, RegistryResult};

/// A lazily constructed capability implementing interface `T`
///
/// Registered through [`inventory::submit!`], typically via the
/// [`register_deserializer!`](crate::register_deserializer) macro. The
/// factory is a plain function pointer so registration itself constructs
/// nothing.
pub struct Capability<T: ?Sized + 'static> {
    construct: fn() -> Box<T>,
    implementation: &'static str,
}

impl<T: ?Sized> Capability<T> {
    /// Create a capability entry for the named implementation
    pub const fn new(implementation: &'static str, construct: fn() -> Box<T>) -> Self {
        Self {
            construct,
            implementation,
        }
    }

    /// Construct the capability instance
    pub fn instantiate(&self) -> Box<T> {
        (self.construct)()
    }

    /// Name of the implementing type, for diagnostics
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }
}

impl<T: ?Sized> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Capability({})", self.implementation)
    }
}

/// Enumerate every capability registered for interface `T`.
///
/// The result is unordered but deterministic for a given binary. An empty
/// table is treated as a failed enumeration: the system cannot start
/// without its capability set, and an empty table means the registrations
/// were stripped from the binary.
pub fn discover<T>(namespace: &str) -> RegistryResult<Vec<&'static Capability<T>>>
where
    T: ?Sized + 'static,
    Capability<T>: inventory::Collect,
{
    let found: Vec<&'static Capability<T>> = inventory::iter::<Capability<T>>.into_iter().collect();

    if found.is_empty() {
        return Err(RegistryError::discovery(
            namespace,
            "registration table is empty",
        ));
    }

    tracing::debug!(
        target: "capability_discovery",
        namespace = namespace,
        count = found.len(),
        "enumerated capability namespace"
    );

    Ok(found)
}
