//! Merge decorator for typed collections.

use crate::error::HandlerError;
use crate::merge::{CandidateSet, MergeHandler};
use collate_kernel::{Collection, Container, TypeTag, TypedCollection, Value};

/// Concatenates typed collections that all declare the first candidate's
/// element type. Anything else is handed to `next` untouched.
pub struct TypedMergeHandler {
    next: Box<dyn MergeHandler>,
}

impl TypedMergeHandler {
    pub fn new(next: impl MergeHandler + 'static) -> Self {
        Self {
            next: Box::new(next),
        }
    }
}

impl std::fmt::Debug for TypedMergeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedMergeHandler").finish_non_exhaustive()
    }
}

impl MergeHandler for TypedMergeHandler {
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        let Some(element_type) = shared_element_type(&candidates) else {
            tracing::debug!(candidates = candidates.len(), "typed merge delegated");
            return self.next.merge(candidates);
        };

        let collections = candidates
            .values()
            .filter_map(|value| value.as_collection().and_then(Collection::as_typed));
        let merged = TypedCollection::concat(element_type, collections)?;
        tracing::debug!(
            elements = merged.len(),
            element_type = %merged.declared_type(),
            "typed merge produced a collection"
        );
        Ok(merged.into())
    }
}

/// The first candidate's element type, provided every candidate is a typed
/// collection of that same type.
fn shared_element_type(candidates: &CandidateSet) -> Option<TypeTag> {
    let mut first: Option<&TypedCollection> = None;
    for value in candidates.values() {
        let Some(Collection::Typed(collection)) = value.as_collection() else {
            return None;
        };
        match first {
            None => first = Some(collection),
            Some(first) if !first.is_equal_type(collection) => return None,
            Some(_) => {}
        }
    }
    first.map(|collection| collection.declared_type().clone())
}
