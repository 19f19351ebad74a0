//! The container abstraction.
//!
//! A container is a homogeneous, ordered (optionally keyed) group of
//! values. Two flavors exist, forming a closed enumeration:
//!
//! ```text
//! Container             ← element type, size, keyed iteration, same-type test
//!     │
//! ├── KeyedCollection   ← duck-typed: type inferred from its elements
//! └── TypedCollection   ← strict: declared type, checked on every insert
//! ```
//!
//! Handlers decide whether they can operate on a value by asking
//! [`CollectionFlavor::matches`], never by inspecting a concrete type.

use crate::error::KernelError;
use crate::type_tag::TypeTag;
use crate::value::{Key, Value};
use std::fmt;

pub use crate::keyed::KeyedCollection;
pub use crate::typed::TypedCollection;

/// Which container variant a value is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CollectionFlavor {
    /// Homogeneous by convention; keys may be names or indices.
    Keyed,

    /// Element type is an explicit tag checked on insert; index-keyed.
    Typed,
}

impl CollectionFlavor {
    pub const ALL: [CollectionFlavor; 2] = [CollectionFlavor::Keyed, CollectionFlavor::Typed];

    /// The capability predicate: is `value` a container of this flavor?
    pub fn matches(self, value: &Value) -> bool {
        match value {
            Value::Collection(collection) => collection.flavor() == self,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyed => "keyed",
            Self::Typed => "typed",
        }
    }
}

impl fmt::Display for CollectionFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CollectionFlavor {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyed" => Ok(Self::Keyed),
            "typed" => Ok(Self::Typed),
            _ => Err(KernelError::UnknownFlavor(s.to_string())),
        }
    }
}

/// The contract every container flavor provides.
pub trait Container {
    /// Which variant this container is.
    fn flavor(&self) -> CollectionFlavor;

    /// The declared (typed flavor) or inferred (keyed flavor) element type.
    ///
    /// `None` means no type is known: an empty keyed collection.
    fn element_type(&self) -> Option<TypeTag>;

    /// Element count.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fresh forward iterator over `(key, value)` pairs in native order.
    fn iter(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_>;

    /// Elements without their keys, in native order.
    fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.iter().map(|(_, value)| value))
    }

    /// Whether `other` holds elements of the same type as `self`.
    fn is_equal_type(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.element_type() == other.element_type()
    }
}

/// A container value of one of the supported flavors.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Keyed(KeyedCollection),
    Typed(TypedCollection),
}

impl Collection {
    pub fn as_keyed(&self) -> Option<&KeyedCollection> {
        match self {
            Self::Keyed(collection) => Some(collection),
            Self::Typed(_) => None,
        }
    }

    pub fn as_typed(&self) -> Option<&TypedCollection> {
        match self {
            Self::Typed(collection) => Some(collection),
            Self::Keyed(_) => None,
        }
    }

    /// Elements without keys, cloned into a plain list.
    pub fn to_values(&self) -> Vec<Value> {
        self.values().cloned().collect()
    }

    /// Consume the collection, keeping only its elements in order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Keyed(collection) => collection.into_values(),
            Self::Typed(collection) => collection.into_values(),
        }
    }
}

impl Container for Collection {
    fn flavor(&self) -> CollectionFlavor {
        match self {
            Self::Keyed(_) => CollectionFlavor::Keyed,
            Self::Typed(_) => CollectionFlavor::Typed,
        }
    }

    fn element_type(&self) -> Option<TypeTag> {
        match self {
            Self::Keyed(collection) => collection.element_type(),
            Self::Typed(collection) => collection.element_type(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Keyed(collection) => collection.len(),
            Self::Typed(collection) => collection.len(),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        match self {
            Self::Keyed(collection) => collection.iter(),
            Self::Typed(collection) => collection.iter(),
        }
    }

    fn is_equal_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Keyed(a), Self::Keyed(b)) => a.is_equal_type(b),
            (Self::Typed(a), Self::Typed(b)) => a.is_equal_type(b),
            _ => false,
        }
    }
}

impl From<KeyedCollection> for Collection {
    fn from(collection: KeyedCollection) -> Self {
        Self::Keyed(collection)
    }
}

impl From<TypedCollection> for Collection {
    fn from(collection: TypedCollection) -> Self {
        Self::Typed(collection)
    }
}
