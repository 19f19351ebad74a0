//! Sequence operations over keyed collections.
//!
//! Filtering keeps the surviving entries under their original keys.
//! Flattening produces an index-keyed collection and enforces no element
//! type: a keyed collection may end up holding mixed values.

use crate::error::HandlerError;
use crate::flatten::FlattenAccumulator;
use crate::sequence::{Predicate, SequenceHandler, Transform, select};
use collate_kernel::{Collection, CollectionFlavor, Container, KeyedCollection};

#[derive(Debug, Default, Clone, Copy)]
pub struct KeyedSequenceHandler;

impl KeyedSequenceHandler {
    pub fn new() -> Self {
        Self
    }
}

impl SequenceHandler for KeyedSequenceHandler {
    fn name(&self) -> &'static str {
        "KeyedSequenceHandler"
    }

    fn supported_flavor(&self) -> CollectionFlavor {
        CollectionFlavor::Keyed
    }

    fn perform_filter(
        &self,
        collection: &Collection,
        predicate: &mut Predicate<'_>,
    ) -> Result<Collection, HandlerError> {
        let kept = select(collection, predicate)?;
        let filtered =
            KeyedCollection::from_entries(kept.into_iter().map(|(key, value)| (key, value.clone())));
        Ok(filtered.into())
    }

    fn perform_flatten(
        &self,
        collection: &Collection,
        transform: &mut Transform<'_>,
    ) -> Result<Collection, HandlerError> {
        let mut acc = FlattenAccumulator::new();
        for (key, value) in collection.iter() {
            acc.absorb(transform(value, &key)?);
        }
        tracing::trace!(
            source = collection.len(),
            flattened = acc.len(),
            "keyed flatten complete"
        );
        let (elements, _) = acc.finish();
        Ok(KeyedCollection::from_values(elements).into())
    }
}
