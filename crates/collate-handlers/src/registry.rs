//! Explicit handler registration.
//!
//! A resolution engine is handed one `HandlerRegistry` at construction time.
//! Sequence handlers are consulted in registration order; the first whose
//! capability guard accepts a value serves it. Merging goes through a
//! single decorator chain.

use crate::error::HandlerError;
use crate::keyed_merge::KeyedMergeHandler;
use crate::keyed_sequence::KeyedSequenceHandler;
use crate::merge::{CandidateSet, DefaultMergeHandler, MergeHandler};
use crate::sequence::SequenceHandler;
use crate::typed_merge::TypedMergeHandler;
use crate::typed_sequence::TypedSequenceHandler;
use collate_kernel::{CollectionFlavor, Value};

pub struct HandlerRegistry {
    sequence_handlers: Vec<Box<dyn SequenceHandler>>,
    merge_handler: Box<dyn MergeHandler>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// The first registered handler that supports `data`.
    pub fn sequence_handler_for(&self, data: &Value) -> Option<&dyn SequenceHandler> {
        let handler = self
            .sequence_handlers
            .iter()
            .find(|handler| handler.supports(data))
            .map(|handler| &**handler);
        match handler {
            Some(handler) => tracing::trace!(handler = handler.name(), "sequence handler selected"),
            None => tracing::trace!("no sequence handler supports the value"),
        }
        handler
    }

    pub fn sequence_handlers(&self) -> impl Iterator<Item = &dyn SequenceHandler> {
        self.sequence_handlers.iter().map(|handler| -> &dyn SequenceHandler { &**handler })
    }

    /// Run `candidates` through the merge chain.
    pub fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        self.merge_handler.merge(candidates)
    }
}

impl Default for HandlerRegistry {
    /// Keyed then typed sequence handlers; merge chain keyed, typed, default.
    fn default() -> Self {
        Self::builder()
            .register_sequence_handler(KeyedSequenceHandler::new())
            .register_sequence_handler(TypedSequenceHandler::new())
            .merge_handler(merge_chain(&[CollectionFlavor::Keyed, CollectionFlavor::Typed]))
            .build()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sequence_handlers().map(|handler| handler.name()).collect();
        f.debug_struct("HandlerRegistry")
            .field("sequence_handlers", &names)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct HandlerRegistryBuilder {
    sequence_handlers: Vec<Box<dyn SequenceHandler>>,
    merge_handler: Option<Box<dyn MergeHandler>>,
}

impl HandlerRegistryBuilder {
    pub fn register_sequence_handler(mut self, handler: impl SequenceHandler + 'static) -> Self {
        self.sequence_handlers.push(Box::new(handler));
        self
    }

    /// The outermost handler of the merge chain. Without one, merging goes
    /// straight to [`DefaultMergeHandler`].
    pub fn merge_handler(mut self, handler: impl MergeHandler + 'static) -> Self {
        self.merge_handler = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            sequence_handlers: self.sequence_handlers,
            merge_handler: self
                .merge_handler
                .unwrap_or_else(|| Box::new(DefaultMergeHandler)),
        }
    }
}

/// The sequence handler serving `flavor`.
pub fn sequence_handler(flavor: CollectionFlavor) -> Box<dyn SequenceHandler> {
    match flavor {
        CollectionFlavor::Keyed => Box::new(KeyedSequenceHandler::new()),
        CollectionFlavor::Typed => Box::new(TypedSequenceHandler::new()),
    }
}

/// Decorators for `flavors`, outermost first, around a terminal
/// [`DefaultMergeHandler`].
pub fn merge_chain(flavors: &[CollectionFlavor]) -> Box<dyn MergeHandler> {
    flavors.iter().rev().fold(
        Box::new(DefaultMergeHandler) as Box<dyn MergeHandler>,
        |next, flavor| -> Box<dyn MergeHandler> {
            match flavor {
                CollectionFlavor::Keyed => Box::new(KeyedMergeHandler::new(next)),
                CollectionFlavor::Typed => Box::new(TypedMergeHandler::new(next)),
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use collate_kernel::{KeyedCollection, TypeTag, TypedCollection};

    #[test]
    fn default_registry_dispatches_by_flavor() {
        let registry = HandlerRegistry::default();

        let keyed = Value::from(KeyedCollection::from_values([1]));
        let typed = Value::from(TypedCollection::empty(TypeTag::String));

        assert_eq!(
            registry.sequence_handler_for(&keyed).map(|h| h.name()),
            Some("KeyedSequenceHandler")
        );
        assert_eq!(
            registry.sequence_handler_for(&typed).map(|h| h.name()),
            Some("TypedSequenceHandler")
        );
        assert!(registry.sequence_handler_for(&Value::from("plain")).is_none());
    }

    #[test]
    fn registration_order_is_kept() {
        let registry = HandlerRegistry::builder()
            .register_sequence_handler(TypedSequenceHandler::new())
            .register_sequence_handler(KeyedSequenceHandler::new())
            .build();
        let names: Vec<&str> = registry.sequence_handlers().map(|h| h.name()).collect();
        assert_eq!(names, vec!["TypedSequenceHandler", "KeyedSequenceHandler"]);
    }

    #[test]
    fn builder_without_merge_handler_uses_the_default() {
        let registry = HandlerRegistry::builder().build();
        let merged = registry
            .merge(CandidateSet::from_values([
                KeyedCollection::from_values(["a"]),
                KeyedCollection::from_values(["b"]),
            ]))
            .unwrap();
        assert_eq!(
            merged,
            Value::List(vec![
                KeyedCollection::from_values(["a"]).into(),
                KeyedCollection::from_values(["b"]).into(),
            ])
        );
    }

    #[test]
    fn default_chain_merges_either_flavor() {
        let registry = HandlerRegistry::default();

        let keyed = registry
            .merge(CandidateSet::from_values([
                KeyedCollection::from_values(["a"]),
                KeyedCollection::from_values(["b"]),
            ]))
            .unwrap();
        assert_eq!(keyed, Value::from(KeyedCollection::from_values(["a", "b"])));

        let typed = registry
            .merge(CandidateSet::from_values([
                TypedCollection::new(TypeTag::Integer, [Value::from(1)]).unwrap(),
                TypedCollection::new(TypeTag::Integer, [Value::from(2)]).unwrap(),
            ]))
            .unwrap();
        let expected = TypedCollection::new(TypeTag::Integer, [Value::from(1), Value::from(2)]);
        assert_eq!(typed, Value::from(expected.unwrap()));
    }

    #[test]
    fn mixed_flavors_fall_through_to_the_default() {
        let registry = HandlerRegistry::default();
        let merged = registry
            .merge(CandidateSet::from_values([
                Value::from(KeyedCollection::from_values(["a"])),
                Value::from(TypedCollection::empty(TypeTag::String)),
            ]))
            .unwrap();
        assert!(matches!(merged, Value::List(items) if items.len() == 2));
    }

    #[test]
    fn sequence_handler_per_flavor() {
        for flavor in CollectionFlavor::ALL {
            assert_eq!(sequence_handler(flavor).supported_flavor(), flavor);
        }
    }
}
