//! The flatten accumulator.
//!
//! Each source element is mapped through a transform; every result is
//! normalized to a list of items and appended to one output list. Along the
//! way the accumulator fixes the result element type:
//!
//! - `Discard` contributes nothing and leaves the type untouched.
//! - A `Container` is unwrapped into its elements; its own element type is
//!   the candidate when it contributes no items.
//! - For a non-empty contribution the candidate is the type of its **last**
//!   item.
//!
//! The first contribution that yields a candidate fixes the result type;
//! later contributions never change it. Validation of the items against the
//! fixed type is left to whoever builds the output container.

use collate_kernel::{Collection, Container, TypeTag, Value, classify};

/// What a transform returned for one source element.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResult {
    /// Nothing to contribute.
    Discard,
    /// A single item.
    Scalar(Value),
    /// Each item becomes one output element. Nested lists stay whole.
    List(Vec<Value>),
    /// Unwrapped into its elements, in the container's own order.
    Container(Collection),
}

impl From<Value> for TransformResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Discard,
            Value::List(items) => Self::List(items),
            Value::Map(entries) => Self::List(entries.into_iter().map(|(_, item)| item).collect()),
            Value::Collection(collection) => Self::Container(collection),
            other => Self::Scalar(other),
        }
    }
}

impl From<Option<Value>> for TransformResult {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Discard, Self::from)
    }
}

#[derive(Debug, Default)]
pub struct FlattenAccumulator {
    elements: Vec<Value>,
    result_type: Option<TypeTag>,
}

impl FlattenAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one source element's contribution.
    pub fn absorb(&mut self, result: TransformResult) {
        let (items, container_type) = match result {
            TransformResult::Discard => return,
            TransformResult::Scalar(item) => (vec![item], None),
            TransformResult::List(items) => (items, None),
            TransformResult::Container(collection) => {
                let element_type = collection.element_type();
                (collection.into_values(), element_type)
            }
        };

        if self.result_type.is_none() {
            self.result_type = items.last().map(classify).or(container_type);
        }
        self.elements.extend(items);
    }

    /// The result type fixed so far, if any.
    pub fn result_type(&self) -> Option<&TypeTag> {
        self.result_type.as_ref()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The accumulated elements in append order, and the fixed type.
    pub fn finish(self) -> (Vec<Value>, Option<TypeTag>) {
        (self.elements, self.result_type)
    }
}
