//! Canonical type identity and the type classifier.
//!
//! Homogeneity is decided by comparing `TypeTag`s: two values are of the
//! same type iff their tags are identical. Plain lists and maps share the
//! `Array` tag; records are tagged by class name; containers by flavor.

use crate::collection::{CollectionFlavor, Container};
use crate::error::KernelError;
use crate::value::{ClassName, Value};
use std::fmt;

/// The type identity used to decide homogeneity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TypeTag {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Collection(CollectionFlavor),
    Class(ClassName),
}

impl TypeTag {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(ClassName::new(name))
    }
}

/// Classify a runtime value.
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Integer(_) => TypeTag::Integer,
        Value::Float(_) => TypeTag::Float,
        Value::String(_) => TypeTag::String,
        Value::List(_) | Value::Map(_) => TypeTag::Array,
        Value::Record(record) => TypeTag::Class(record.class().clone()),
        Value::Collection(collection) => TypeTag::Collection(collection.flavor()),
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Collection(flavor) => write!(f, "collection<{flavor}>"),
            Self::Class(name) => write!(f, "{name}"),
        }
    }
}

impl std::str::FromStr for TypeTag {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KernelError::InvalidTypeTag("empty type name".to_string()));
        }
        let tag = match trimmed {
            "null" => Self::Null,
            "bool" | "boolean" => Self::Boolean,
            "int" | "integer" => Self::Integer,
            "float" | "double" => Self::Float,
            "string" => Self::String,
            "array" => Self::Array,
            other => match other
                .strip_prefix("collection<")
                .and_then(|rest| rest.strip_suffix('>'))
            {
                Some(flavor) => Self::Collection(flavor.parse()?),
                None => Self::class(other),
            },
        };
        Ok(tag)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for TypeTag {
    type Error = KernelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{KeyedCollection, TypedCollection};
    use crate::value::Record;

    #[test]
    fn classify_scalars_and_arrays() {
        assert_eq!(classify(&Value::Null), TypeTag::Null);
        assert_eq!(classify(&Value::from(true)), TypeTag::Boolean);
        assert_eq!(classify(&Value::from(12)), TypeTag::Integer);
        assert_eq!(classify(&Value::from(1.5)), TypeTag::Float);
        assert_eq!(classify(&Value::from("text")), TypeTag::String);
        assert_eq!(classify(&Value::List(vec![])), TypeTag::Array);
        assert_eq!(classify(&Value::map([("a", 1)])), TypeTag::Array);
    }

    #[test]
    fn classify_objects_by_identity() {
        let a = Value::from(Record::new("Address").with_field("city", "Potter"));
        let b = Value::from(Record::new("Address"));
        let c = Value::from(Record::new("Person"));

        assert_eq!(classify(&a), classify(&b));
        assert_ne!(classify(&a), classify(&c));
        assert_eq!(classify(&a), TypeTag::class("Address"));
    }

    #[test]
    fn classify_collections_by_flavor() {
        let keyed = Value::from(KeyedCollection::new());
        let typed = Value::from(TypedCollection::empty(TypeTag::String));

        assert_eq!(classify(&keyed), TypeTag::Collection(CollectionFlavor::Keyed));
        assert_eq!(classify(&typed), TypeTag::Collection(CollectionFlavor::Typed));
    }

    #[test]
    fn parse_aliases_and_classes() {
        assert_eq!("int".parse::<TypeTag>().unwrap(), TypeTag::Integer);
        assert_eq!("boolean".parse::<TypeTag>().unwrap(), TypeTag::Boolean);
        assert_eq!("double".parse::<TypeTag>().unwrap(), TypeTag::Float);
        assert_eq!(
            "collection<typed>".parse::<TypeTag>().unwrap(),
            TypeTag::Collection(CollectionFlavor::Typed)
        );
        assert_eq!(
            "Address".parse::<TypeTag>().unwrap(),
            TypeTag::class("Address")
        );
        assert!("  ".parse::<TypeTag>().is_err());
        assert!("collection<set>".parse::<TypeTag>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for tag in [
            TypeTag::Null,
            TypeTag::Boolean,
            TypeTag::Integer,
            TypeTag::Float,
            TypeTag::String,
            TypeTag::Array,
            TypeTag::Collection(CollectionFlavor::Keyed),
            TypeTag::class("Address"),
        ] {
            assert_eq!(tag.to_string().parse::<TypeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn serializes_as_display_string() {
        insta::assert_json_snapshot!(
            vec![TypeTag::Integer, TypeTag::class("Address")],
            @r###"
        [
          "integer",
          "Address"
        ]
        "###
        );
    }
}
