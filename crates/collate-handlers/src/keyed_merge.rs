//! Merge decorator for keyed collections.

use crate::error::HandlerError;
use crate::merge::{CandidateSet, MergeHandler};
use collate_kernel::{Collection, Container, KeyedCollection, TypeTag, Value, classify};

/// Concatenates keyed collections whose elements all share one type.
///
/// Keyed collections declare no element type, so homogeneity is checked by
/// scanning every element of every candidate against the type of the first
/// element seen. Anything else is handed to `next` untouched.
pub struct KeyedMergeHandler {
    next: Box<dyn MergeHandler>,
}

impl KeyedMergeHandler {
    pub fn new(next: impl MergeHandler + 'static) -> Self {
        Self {
            next: Box::new(next),
        }
    }
}

impl std::fmt::Debug for KeyedMergeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedMergeHandler").finish_non_exhaustive()
    }
}

impl MergeHandler for KeyedMergeHandler {
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        if let Err(reason) = homogeneous(&candidates) {
            tracing::debug!(candidates = candidates.len(), %reason, "keyed merge delegated");
            return self.next.merge(candidates);
        }

        let elements = candidates
            .into_entries()
            .into_iter()
            .flat_map(|(_, value)| match value {
                Value::Collection(Collection::Keyed(collection)) => collection.into_values(),
                _ => Vec::new(),
            });
        let merged = KeyedCollection::from_values(elements);
        tracing::debug!(elements = merged.len(), "keyed merge produced a collection");
        Ok(merged.into())
    }
}

#[derive(Debug, thiserror::Error)]
enum Ineligible {
    #[error("no candidates")]
    Empty,
    #[error("candidate `{0}` is not a keyed collection")]
    NotKeyed(String),
    #[error("element type `{found}` differs from `{reference}`")]
    Mixed { reference: TypeTag, found: TypeTag },
}

fn homogeneous(candidates: &CandidateSet) -> Result<(), Ineligible> {
    if candidates.is_empty() {
        return Err(Ineligible::Empty);
    }

    let mut reference: Option<TypeTag> = None;
    for (key, value) in candidates.iter() {
        let Some(Collection::Keyed(collection)) = value.as_collection() else {
            return Err(Ineligible::NotKeyed(key.to_string()));
        };
        for element in collection.values() {
            let found = classify(element);
            match &reference {
                None => reference = Some(found),
                Some(expected) if *expected != found => {
                    return Err(Ineligible::Mixed {
                        reference: expected.clone(),
                        found,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
