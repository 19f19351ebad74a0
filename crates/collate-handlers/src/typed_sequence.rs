//! Sequence operations over typed collections.
//!
//! Filtering keeps the source's element type and re-indexes the survivors.
//! Flattening derives the result type from the transform output (see
//! [`FlattenAccumulator`]) and validates every element once all transforms
//! have run. When nothing fixes a type, the source's declared type is used.

use crate::error::{HandlerError, Method};
use crate::flatten::FlattenAccumulator;
use crate::sequence::{Predicate, SequenceHandler, Transform, select, unsupported};
use collate_kernel::{Collection, CollectionFlavor, Container, TypedCollection};

#[derive(Debug, Default, Clone, Copy)]
pub struct TypedSequenceHandler;

impl TypedSequenceHandler {
    pub fn new() -> Self {
        Self
    }
}

impl SequenceHandler for TypedSequenceHandler {
    fn name(&self) -> &'static str {
        "TypedSequenceHandler"
    }

    fn supported_flavor(&self) -> CollectionFlavor {
        CollectionFlavor::Typed
    }

    fn perform_filter(
        &self,
        collection: &Collection,
        predicate: &mut Predicate<'_>,
    ) -> Result<Collection, HandlerError> {
        let typed = collection
            .as_typed()
            .ok_or_else(|| unsupported(self, Method::Filter))?;
        let kept = select(collection, predicate)?;
        let filtered = TypedCollection::new(
            typed.declared_type().clone(),
            kept.into_iter().map(|(_, value)| value.clone()),
        )?;
        Ok(filtered.into())
    }

    fn perform_flatten(
        &self,
        collection: &Collection,
        transform: &mut Transform<'_>,
    ) -> Result<Collection, HandlerError> {
        let typed = collection
            .as_typed()
            .ok_or_else(|| unsupported(self, Method::Flatten))?;

        let mut acc = FlattenAccumulator::new();
        for (key, value) in typed.iter() {
            acc.absorb(transform(value, &key)?);
        }

        let (elements, inferred) = acc.finish();
        let element_type = inferred.unwrap_or_else(|| typed.declared_type().clone());
        tracing::trace!(
            source = typed.len(),
            flattened = elements.len(),
            element_type = %element_type,
            "typed flatten complete"
        );
        Ok(TypedCollection::new(element_type, elements)?.into())
    }
}
