//! Interop between `Value` and `serde_json::Value`.
//!
//! Plain JSON maps onto scalars, lists and maps. Two reserved object
//! shapes carry what JSON cannot express natively:
//!
//! ```text
//! {"$class": "Address", "city": "Potter"}                        → Record
//! {"$collection": "keyed", "entries": {"k1": 1} | [1, 2]}        → KeyedCollection
//! {"$collection": "typed", "type": "string", "elements": ["a"]}  → TypedCollection
//! ```
//!
//! `to_json` emits the same shapes, so values survive a round trip. Keyed
//! entry names that look like an index, or start with `\`, are written
//! with a leading `\` so they never collide with index keys.

use crate::collection::{Collection, CollectionFlavor, KeyedCollection, TypedCollection};
use crate::error::KernelError;
use crate::type_tag::TypeTag;
use crate::value::{Key, Record, Value};
use serde_json::{Map, Number, Value as Json, json};

pub const CLASS_FIELD: &str = "$class";
pub const COLLECTION_FIELD: &str = "$collection";

/// Convert parsed JSON into a `Value`.
pub fn from_json(json: &Json) -> Result<Value, KernelError> {
    let value = match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(from_json).collect::<Result<_, _>>()?),
        Json::Object(members) => {
            if let Some(flavor) = members.get(COLLECTION_FIELD) {
                Value::Collection(collection_from_json(flavor, members)?)
            } else if let Some(class) = members.get(CLASS_FIELD) {
                Value::Record(record_from_json(class, members)?)
            } else {
                Value::Map(
                    members
                        .iter()
                        .map(|(name, member)| Ok((name.clone(), from_json(member)?)))
                        .collect::<Result<_, KernelError>>()?,
                )
            }
        }
    };
    Ok(value)
}

/// Convert a `Value` into JSON.
///
/// Non-finite floats have no JSON representation and become `null`.
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Map(entries) => Json::Object(
            entries
                .iter()
                .map(|(name, member)| (name.clone(), to_json(member)))
                .collect(),
        ),
        Value::Record(record) => {
            let mut members = Map::new();
            members.insert(CLASS_FIELD.to_string(), json!(record.class().as_str()));
            for (name, member) in record.fields() {
                members.insert(name.to_string(), to_json(member));
            }
            Json::Object(members)
        }
        Value::Collection(Collection::Keyed(collection)) => json!({
            COLLECTION_FIELD: CollectionFlavor::Keyed.as_str(),
            "entries": keyed_entries_to_json(collection),
        }),
        Value::Collection(Collection::Typed(collection)) => json!({
            COLLECTION_FIELD: CollectionFlavor::Typed.as_str(),
            "type": collection.declared_type().to_string(),
            "elements": collection.as_slice().iter().map(to_json).collect::<Vec<_>>(),
        }),
    }
}

impl TryFrom<&Json> for Value {
    type Error = KernelError;

    fn try_from(json: &Json) -> Result<Self, Self::Error> {
        from_json(json)
    }
}

impl From<&Value> for Json {
    fn from(value: &Value) -> Self {
        to_json(value)
    }
}

fn record_from_json(class: &Json, members: &Map<String, Json>) -> Result<Record, KernelError> {
    let class = class
        .as_str()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| KernelError::Json(format!("`{CLASS_FIELD}` must be a non-empty string")))?;
    let mut record = Record::new(class);
    for (name, member) in members.iter().filter(|(name, _)| *name != CLASS_FIELD) {
        record.set(name.clone(), from_json(member)?);
    }
    Ok(record)
}

fn collection_from_json(
    flavor: &Json,
    members: &Map<String, Json>,
) -> Result<Collection, KernelError> {
    let flavor: CollectionFlavor = flavor
        .as_str()
        .ok_or_else(|| KernelError::Json(format!("`{COLLECTION_FIELD}` must be a string")))?
        .parse()?;

    match flavor {
        CollectionFlavor::Keyed => {
            let collection = match members.get("entries") {
                None | Some(Json::Null) => KeyedCollection::new(),
                Some(Json::Array(items)) => KeyedCollection::from_values(
                    items.iter().map(from_json).collect::<Result<Vec<_>, _>>()?,
                ),
                Some(Json::Object(entries)) => {
                    let mut collection = KeyedCollection::new();
                    for (name, member) in entries {
                        collection.insert(parse_key(name), from_json(member)?);
                    }
                    collection
                }
                Some(_) => {
                    return Err(KernelError::Json(
                        "keyed collection `entries` must be an array or object".to_string(),
                    ));
                }
            };
            Ok(Collection::Keyed(collection))
        }
        CollectionFlavor::Typed => {
            let element_type: TypeTag = members
                .get("type")
                .and_then(Json::as_str)
                .ok_or_else(|| {
                    KernelError::Json("typed collection requires a string `type`".to_string())
                })?
                .parse()?;
            let elements = match members.get("elements") {
                None | Some(Json::Null) => Vec::new(),
                Some(Json::Array(items)) => {
                    items.iter().map(from_json).collect::<Result<Vec<_>, _>>()?
                }
                Some(_) => {
                    return Err(KernelError::Json(
                        "typed collection `elements` must be an array".to_string(),
                    ));
                }
            };
            Ok(Collection::Typed(TypedCollection::new(element_type, elements)?))
        }
    }
}

const KEY_ESCAPE: char = '\\';

fn parse_key(name: &str) -> Key {
    if let Some(escaped) = name.strip_prefix(KEY_ESCAPE) {
        return Key::Name(escaped.to_string());
    }
    match canonical_index(name) {
        Some(index) => Key::Index(index),
        None => Key::Name(name.to_string()),
    }
}

/// Object member name for `key`; names that would read back as an index
/// or start with the escape character get escaped.
fn key_to_json(key: &Key) -> String {
    match key {
        Key::Index(index) => index.to_string(),
        Key::Name(name) if name.starts_with(KEY_ESCAPE) || canonical_index(name).is_some() => {
            format!("{KEY_ESCAPE}{name}")
        }
        Key::Name(name) => name.clone(),
    }
}

fn canonical_index(name: &str) -> Option<usize> {
    name.parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == name)
}

fn keyed_entries_to_json(collection: &KeyedCollection) -> Json {
    let sequential = collection
        .keys()
        .enumerate()
        .all(|(position, key)| *key == Key::Index(position));
    if sequential {
        Json::Array(
            collection
                .entries()
                .iter()
                .map(|(_, member)| to_json(member))
                .collect(),
        )
    } else {
        Json::Object(
            collection
                .entries()
                .iter()
                .map(|(key, member)| (key_to_json(key), to_json(member)))
                .collect(),
        )
    }
}
