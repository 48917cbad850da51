//! Key types accepted by the tables.
//!
//! Keys are either strings or signed integers. [`Key`] is the owned form
//! stored inside a table; [`KeyRef`] is the borrowed form used for lookups
//! so that `table.retrieve("name")` does not allocate.
//!
//! Keys coming from dynamically-typed input (for example a JSON document)
//! go through `TryFrom<&serde_json::Value>`, which rejects anything that is
//! not a string or an integer with [`TableError::InvalidKeyType`] before the
//! key ever reaches the hash function.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// An owned table key.
///
/// String and integer keys never compare equal to each other:
/// `Key::Str("1")` and `Key::Int(1)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Character-sequence key.
    Str(String),
    /// Integer key.
    Int(i64),
}

/// A borrowed view of a key, used by lookup and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRef<'a> {
    /// Borrowed string key.
    Str(&'a str),
    /// Integer key.
    Int(i64),
}

impl Key {
    /// Borrow this key as a [`KeyRef`].
    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Key::Str(s) => KeyRef::Str(s),
            Key::Int(i) => KeyRef::Int(*i),
        }
    }

    /// Returns the string if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    /// Returns the integer if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Check whether this key equals the borrowed key.
    pub fn matches(&self, other: KeyRef<'_>) -> bool {
        self.as_key_ref() == other
    }
}

impl KeyRef<'_> {
    /// Convert into an owned [`Key`].
    pub fn to_key(self) -> Key {
        match self {
            KeyRef::Str(s) => Key::Str(s.to_string()),
            KeyRef::Int(i) => Key::Int(i),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_key_ref().fmt(f)
    }
}

impl fmt::Display for KeyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Str(s) => write!(f, "{:?}", s),
            KeyRef::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<KeyRef<'_>> for Key {
    fn from(key: KeyRef<'_>) -> Self {
        key.to_key()
    }
}

impl<'a> From<&'a str> for KeyRef<'a> {
    fn from(s: &'a str) -> Self {
        KeyRef::Str(s)
    }
}

impl<'a> From<&'a String> for KeyRef<'a> {
    fn from(s: &'a String) -> Self {
        KeyRef::Str(s)
    }
}

impl<'a> From<&'a Key> for KeyRef<'a> {
    fn from(key: &'a Key) -> Self {
        key.as_key_ref()
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    Key::Int(i64::from(i))
                }
            }

            impl From<$t> for KeyRef<'_> {
                fn from(i: $t) -> Self {
                    KeyRef::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<&serde_json::Value> for Key {
    type Error = TableError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        let found = match value {
            Value::String(s) => return Ok(Key::Str(s.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => return Ok(Key::Int(i)),
                None if n.is_u64() => "integer out of i64 range",
                None => "float",
            },
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Err(TableError::InvalidKeyType {
            found: found.to_string(),
        })
    }
}

impl TryFrom<serde_json::Value> for Key {
    type Error = TableError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Key::try_from(&value)
    }
}
