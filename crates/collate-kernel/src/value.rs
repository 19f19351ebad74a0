//! Dynamic values walked by a resolution engine.
//!
//! A `Value` is whatever the engine found while traversing input data:
//! scalars, plain arrays (ordered lists or string-keyed maps), records
//! carrying a class identity, and collections. Only `Value::Collection`
//! counts as a container; plain arrays never do.

use crate::collection::{Collection, Container, KeyedCollection, TypedCollection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an object-shaped value.
///
/// Two records are of the same type iff their class names are identical.
/// No structural comparison of fields takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassName(pub String);

impl ClassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Position of an element inside a container.
///
/// Typed collections are always index-keyed; keyed collections may carry
/// caller-supplied names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// An object-shaped value: a class identity plus ordered named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: ClassName,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(class: impl Into<ClassName>) -> Self {
        Self {
            class: class.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, replacing an existing one in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// An ordered plain array.
    List(Vec<Value>),
    /// A string-keyed plain array; member order is significant.
    Map(Vec<(String, Value)>),
    Record(Record),
    Collection(Collection),
}

impl Value {
    /// Build a `Map` from ordered name/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Look up a named field on a record or map.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Self::Record(record) => record.get(field),
            Self::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Number of direct members for arrays and collections.
    pub fn member_count(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            Self::Collection(collection) => Some(collection.len()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

impl From<KeyedCollection> for Value {
    fn from(collection: KeyedCollection) -> Self {
        Self::Collection(Collection::Keyed(collection))
    }
}

impl From<TypedCollection> for Value {
    fn from(collection: TypedCollection) -> Self {
        Self::Collection(Collection::Typed(collection))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_set_replaces_in_place() {
        let mut record = Record::new("Person")
            .with_field("first_name", "John")
            .with_field("age", 32);
        record.set("first_name", "Jane");

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first_name", "age"]);
        assert_eq!(record.get("first_name"), Some(&Value::from("Jane")));
    }

    #[test]
    fn get_reads_records_and_maps_only() {
        let record = Value::from(Record::new("Person").with_field("name", "value1"));
        let map = Value::map([("name", "value2")]);

        assert_eq!(record.get("name"), Some(&Value::from("value1")));
        assert_eq!(map.get("name"), Some(&Value::from("value2")));
        assert_eq!(map.get("missing"), None);
        assert_eq!(Value::from("name").get("name"), None);
        assert_eq!(Value::List(vec![]).get("name"), None);
    }

    #[test]
    fn key_display() {
        assert_eq!(Key::from(3).to_string(), "3");
        assert_eq!(Key::from("key1").to_string(), "key1");
    }
}
