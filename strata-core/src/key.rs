//! Hierarchical configuration keys
//!
//! A [`Key`] is a validated, slash-delimited identifier of the form
//! `/piece(/piece)*` where each piece consists of lowercase letters and
//! digits. Keys are immutable value objects compared by their canonical
//! string form.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// Validated hierarchical identifier for a configuration entry
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// Canonical `/`-joined form, leading slash included
    normalized: String,
}

impl Key {
    /// Parse a key from its canonical string form.
    ///
    /// The string must match `/piece(/piece)*` exactly: leading slash,
    /// no trailing slash, no empty pieces, pieces restricted to `[a-z0-9]`.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(CoreError::invalid_key(raw, "must start with '/'"));
        };
        if rest.is_empty() {
            return Err(CoreError::invalid_key(raw, "must contain at least one piece"));
        }
        for piece in rest.split('/') {
            validate_piece(piece).map_err(|reason| CoreError::invalid_key(raw, reason))?;
        }

        Ok(Self {
            normalized: raw.to_string(),
        })
    }

    /// Build a key from individual pieces, without slashes.
    pub fn from_pieces<I, S>(pieces: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = String::new();
        for piece in pieces {
            let piece = piece.as_ref();
            validate_piece(piece).map_err(|reason| CoreError::invalid_key(piece, reason))?;
            normalized.push('/');
            normalized.push_str(piece);
        }
        if normalized.is_empty() {
            return Err(CoreError::invalid_key("", "must contain at least one piece"));
        }

        Ok(Self { normalized })
    }

    /// The canonical `/`-joined string form.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Iterate over the key's pieces, in order.
    pub fn pieces(&self) -> impl Iterator<Item = &str> {
        self.normalized[1..].split('/')
    }
}

fn validate_piece(piece: &str) -> Result<(), &'static str> {
    if piece.is_empty() {
        return Err("pieces must not be empty");
    }
    if !piece
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return Err("pieces may only contain lowercase letters and digits");
    }
    Ok(())
}

impl FromStr for Key {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.normalized)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a '/'-delimited configuration key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                Key::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}
