//! The duck-typed container flavor.
//!
//! An ordered list of `(key, value)` entries with no declared element type.
//! Homogeneity is a convention of the producer; the element type is
//! inferred from the elements themselves when somebody asks.

use crate::collection::{CollectionFlavor, Container};
use crate::type_tag::{TypeTag, classify};
use crate::value::{Key, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct KeyedCollection {
    entries: Vec<(Key, Value)>,
    /// Slot of every key in `entries`.
    positions: HashMap<Key, usize>,
    /// One past the largest index key ever stored.
    next_index: usize,
}

impl KeyedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from values, assigning index keys `0..n`.
    pub fn from_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let entries: Vec<(Key, Value)> = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (Key::Index(index), value.into()))
            .collect();
        let positions = (0..entries.len()).map(|index| (Key::Index(index), index)).collect();
        Self {
            next_index: entries.len(),
            entries,
            positions,
        }
    }

    /// Build from caller-keyed entries, keeping their keys and order.
    ///
    /// A repeated key overwrites the earlier value in its original slot.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let mut collection = Self::new();
        for (key, value) in entries {
            collection.insert(key, value);
        }
        collection
    }

    /// Append under the next free index key.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.insert(Key::Index(self.next_index), value);
    }

    /// Insert under `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(&slot) = self.positions.get(&key) {
            self.entries[slot].1 = value;
            return;
        }
        if let Key::Index(index) = key {
            self.next_index = self.next_index.max(index + 1);
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.positions.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn entries(&self) -> &[(Key, Value)] {
        &self.entries
    }

    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl PartialEq for KeyedCollection {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Container for KeyedCollection {
    fn flavor(&self) -> CollectionFlavor {
        CollectionFlavor::Keyed
    }

    /// Inferred from the first element; `None` when empty.
    fn element_type(&self) -> Option<TypeTag> {
        self.entries.first().map(|(_, value)| classify(value))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(self.entries.iter().map(|(key, value)| (key.clone(), value)))
    }
}
