//! The strictly-typed container flavor.
//!
//! Carries an explicit element type and rejects any element whose
//! classified type differs. Elements are index-keyed.

use crate::collection::{CollectionFlavor, Container};
use crate::error::KernelError;
use crate::type_tag::{TypeTag, classify};
use crate::value::{Key, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct TypedCollection {
    element_type: TypeTag,
    elements: Vec<Value>,
}

impl TypedCollection {
    /// Create a collection, validating every element against
    /// `element_type`. Fails on the first element that does not match.
    pub fn new(
        element_type: TypeTag,
        elements: impl IntoIterator<Item = Value>,
    ) -> Result<Self, KernelError> {
        let mut collection = Self::empty(element_type);
        for element in elements {
            collection.push(element)?;
        }
        Ok(collection)
    }

    pub fn empty(element_type: TypeTag) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
        }
    }

    /// Build one collection from the elements of many, in order.
    pub fn concat<'a>(
        element_type: TypeTag,
        collections: impl IntoIterator<Item = &'a TypedCollection>,
    ) -> Result<Self, KernelError> {
        Self::new(
            element_type,
            collections
                .into_iter()
                .flat_map(|collection| collection.elements.iter().cloned()),
        )
    }

    /// Append an element after checking its type.
    pub fn push(&mut self, element: Value) -> Result<(), KernelError> {
        let actual = classify(&element);
        if actual != self.element_type {
            return Err(KernelError::TypeMismatch {
                expected: self.element_type.clone(),
                actual,
            });
        }
        self.elements.push(element);
        Ok(())
    }

    /// The declared element type.
    pub fn declared_type(&self) -> &TypeTag {
        &self.element_type
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    pub fn into_values(self) -> Vec<Value> {
        self.elements
    }
}

impl Container for TypedCollection {
    fn flavor(&self) -> CollectionFlavor {
        CollectionFlavor::Typed
    }

    fn element_type(&self) -> Option<TypeTag> {
        Some(self.element_type.clone())
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        Box::new(
            self.elements
                .iter()
                .enumerate()
                .map(|(index, value)| (Key::Index(index), value)),
        )
    }
}
