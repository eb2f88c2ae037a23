//! Built-in string-to-value conversion capabilities
//!
//! Each deserializer targets exactly one type and registers itself into the
//! capability table. Most primitives delegate to their `FromStr`
//! implementation; the option wrapper and the key deserializer have bespoke
//! grammars.

use strata_core::{Key, TypeTag, TypedValue};

use crate::error::{RegistryError, RegistryResult};
use crate::registry::Deserializer;

macro_rules! from_str_deserializer {
    ($(#[$meta:meta])* $name:ident => $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name;

        impl Deserializer for $name {
            fn target(&self) -> TypeTag {
                TypeTag::of::<$ty>()
            }

            fn deserialize(&self, raw: &str) -> RegistryResult<TypedValue> {
                let parsed: $ty = raw
                    .parse()
                    .map_err(|e| RegistryError::malformed::<$ty>(raw, e))?;
                Ok(TypedValue::new(parsed))
            }
        }

        crate::register_deserializer!($name);
    };
}

from_str_deserializer!(
    /// Parses `true` / `false`
    BoolDeserializer => bool
);
from_str_deserializer!(
    /// Parses a single character; any other length is malformed
    CharDeserializer => char
);
from_str_deserializer!(I8Deserializer => i8);
from_str_deserializer!(I16Deserializer => i16);
from_str_deserializer!(I32Deserializer => i32);
from_str_deserializer!(I64Deserializer => i64);
from_str_deserializer!(U8Deserializer => u8);
from_str_deserializer!(U16Deserializer => u16);
from_str_deserializer!(U32Deserializer => u32);
from_str_deserializer!(U64Deserializer => u64);
from_str_deserializer!(F32Deserializer => f32);
from_str_deserializer!(F64Deserializer => f64);
from_str_deserializer!(
    /// Identity conversion
    StringDeserializer => String
);
from_str_deserializer!(
    /// Delegates to [`Key::parse`]
    KeyDeserializer => Key
);

/// Parses `None` or `Some(<value>)` into an `Option<String>`
#[derive(Debug, Default)]
pub struct OptionDeserializer;

impl Deserializer for OptionDeserializer {
    fn target(&self) -> TypeTag {
        TypeTag::of::<Option<String>>()
    }

    fn deserialize(&self, raw: &str) -> RegistryResult<TypedValue> {
        if raw == "None" {
            return Ok(TypedValue::new(None::<String>));
        }

        match raw.strip_prefix("Some(").and_then(|r| r.strip_suffix(')')) {
            Some(inner) => Ok(TypedValue::new(Some(inner.to_string()))),
            None => Err(RegistryError::malformed::<Option<String>>(
                raw,
                "expected 'None' or 'Some(<value>)'",
            )),
        }
    }
}

crate::register_deserializer!(OptionDeserializer);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DeserializerRegistry;

    fn registry() -> &'static DeserializerRegistry {
        DeserializerRegistry::shared().unwrap()
    }

    #[test]
    fn test_discovery_finds_all_builtins() {
        let registry = registry();
        assert!(registry.supports(TypeTag::of::<bool>()));
        assert!(registry.supports(TypeTag::of::<char>()));
        assert!(registry.supports(TypeTag::of::<i32>()));
        assert!(registry.supports(TypeTag::of::<u64>()));
        assert!(registry.supports(TypeTag::of::<f64>()));
        assert!(registry.supports(TypeTag::of::<String>()));
        assert!(registry.supports(TypeTag::of::<Key>()));
        assert!(registry.supports(TypeTag::of::<Option<String>>()));
        assert!(!registry.supports(TypeTag::of::<Vec<String>>()));
    }

    #[test]
    fn test_bool_conversion() {
        let value = registry().convert(TypeTag::of::<bool>(), "true").unwrap();
        assert_eq!(*value.downcast_ref::<bool>().unwrap(), true);

        let err = registry().convert(TypeTag::of::<bool>(), "yes").unwrap_err();
        assert!(matches!(err, RegistryError::MalformedValue { .. }));
    }

    #[test]
    fn test_char_requires_single_character() {
        let value = registry().convert(TypeTag::of::<char>(), "x").unwrap();
        assert_eq!(*value.downcast_ref::<char>().unwrap(), 'x');

        for raw in ["", "xy"] {
            let err = registry().convert(TypeTag::of::<char>(), raw).unwrap_err();
            assert!(matches!(err, RegistryError::MalformedValue { .. }));
        }
    }

    #[test]
    fn test_numeric_conversion() {
        let value = registry().convert(TypeTag::of::<i64>(), "-42").unwrap();
        assert_eq!(*value.downcast_ref::<i64>().unwrap(), -42);

        let value = registry().convert(TypeTag::of::<f64>(), "2.5").unwrap();
        assert_eq!(*value.downcast_ref::<f64>().unwrap(), 2.5);

        let err = registry()
            .convert(TypeTag::of::<i32>(), "notanumber")
            .unwrap_err();
        assert!(matches!(err, RegistryError::MalformedValue { .. }));

        // Unsigned targets reject negative input
        let err = registry().convert(TypeTag::of::<u16>(), "-1").unwrap_err();
        assert!(matches!(err, RegistryError::MalformedValue { .. }));
    }

    #[test]
    fn test_string_is_identity() {
        let value = registry()
            .convert(TypeTag::of::<String>(), "localhost")
            .unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "localhost");
    }

    #[test]
    fn test_key_conversion_delegates_to_key_parsing() {
        let value = registry().convert(TypeTag::of::<Key>(), "/db/host").unwrap();
        assert_eq!(
            *value.downcast_ref::<Key>().unwrap(),
            Key::parse("/db/host").unwrap()
        );

        let err = registry()
            .convert(TypeTag::of::<Key>(), "db/host")
            .unwrap_err();
        assert!(matches!(err, RegistryError::MalformedValue { .. }));
    }

    #[test]
    fn test_option_tokens() {
        let value = registry()
            .convert(TypeTag::of::<Option<String>>(), "None")
            .unwrap();
        assert_eq!(*value.downcast_ref::<Option<String>>().unwrap(), None);

        let value = registry()
            .convert(TypeTag::of::<Option<String>>(), "Some(hello)")
            .unwrap();
        assert_eq!(
            *value.downcast_ref::<Option<String>>().unwrap(),
            Some("hello".to_string())
        );

        let err = registry()
            .convert(TypeTag::of::<Option<String>>(), "hello")
            .unwrap_err();
        assert!(matches!(err, RegistryError::MalformedValue { .. }));
    }
}
