//! Tagged configuration values
//!
//! A [`TypedValue`] pairs a value with an explicit [`TypeTag`] recorded at
//! insertion time. Reads verify the tag instead of relying on an unchecked
//! cast, so a mismatch surfaces as a typed error.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;

/// Marker for types that can be stored as configuration values
pub trait ConfigValue: Any + Send + Sync + fmt::Debug {}

impl<T: Any + Send + Sync + fmt::Debug> ConfigValue for T {}

/// Identifier for a declared configuration value type
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag for type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Human-readable name of the tagged type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this tag identifies type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// Equality and hashing go through the TypeId only; the name is carried for
// diagnostics.
impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Object-safe view of a stored value
trait AnyValue: Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T: ConfigValue> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A (declared type, value) pair
///
/// The value is never absent and always an instance of the declared type;
/// both are fixed at construction. Cloning is cheap (shared storage).
#[derive(Clone)]
pub struct TypedValue {
    tag: TypeTag,
    value: Arc<dyn AnyValue>,
}

impl TypedValue {
    /// Wrap `value`, declaring its type as `T`.
    pub fn new<T: ConfigValue>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// The declared type of the stored value.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Whether the stored value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.tag.is::<T>()
    }

    /// Borrow the stored value as `T`, verifying the tag.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T, CoreError> {
        (*self.value)
            .as_any()
            .downcast_ref::<T>()
            .ok_or(CoreError::TypeMismatch {
                stored: self.tag.name,
                requested: std::any::type_name::<T>(),
            })
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedValue")
            .field("type", &self.tag.name)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_identity() {
        assert_eq!(TypeTag::of::<i32>(), TypeTag::of::<i32>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i64>());
        assert!(TypeTag::of::<String>().is::<String>());
    }

    #[test]
    fn test_downcast_matching_type() {
        let value = TypedValue::new(42i32);
        assert!(value.is::<i32>());
        assert_eq!(*value.downcast_ref::<i32>().unwrap(), 42);
    }

    #[test]
    fn test_downcast_mismatch_is_typed_error() {
        let value = TypedValue::new(42i32);
        let err = value.downcast_ref::<i64>().unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
    }

    #[test]
    fn test_clones_share_storage() {
        let value = TypedValue::new("hello".to_string());
        let clone = value.clone();
        assert_eq!(
            value.downcast_ref::<String>().unwrap(),
            clone.downcast_ref::<String>().unwrap()
        );
        assert_eq!(value.tag(), clone.tag());
    }
}
