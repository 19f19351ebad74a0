//! The merge reducer.
//!
//! During traversal a resolution engine may find several sibling values for
//! one path. A `MergeHandler` combines them into a single value. Flavor
//! specific handlers are decorators: each holds the next handler in the
//! chain and delegates to it, with the candidate set untouched, whenever
//! its own all-or-nothing gate does not pass. `DefaultMergeHandler`
//! terminates the chain.

use crate::error::HandlerError;
use collate_kernel::{Key, Value};
use std::sync::Arc;

/// Ordered sibling values, each under the key it was found at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: Vec<(Key, Value)>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates under caller-chosen keys, in the given order.
    pub fn from_named<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Candidates under index keys `0..n`.
    pub fn from_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::from_named(values.into_iter().enumerate())
    }

    pub fn push(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(Key, Value)> {
        self.entries
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_named(iter)
    }
}

pub trait MergeHandler: Send + Sync {
    /// Combine `candidates` into one value.
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError>;
}

impl<H: MergeHandler + ?Sized> MergeHandler for Box<H> {
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        (**self).merge(candidates)
    }
}

impl<H: MergeHandler + ?Sized> MergeHandler for Arc<H> {
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        (**self).merge(candidates)
    }
}

/// Terminal handler of every merge chain.
///
/// - no candidates: `Null`
/// - one candidate: that value, as is
/// - otherwise a `List`; list and map candidates are spread into it, every
///   other candidate is appended as one item
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMergeHandler;

impl DefaultMergeHandler {
    pub fn new() -> Self {
        Self
    }
}

impl MergeHandler for DefaultMergeHandler {
    fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
        let mut entries = candidates.into_entries();
        if entries.len() <= 1 {
            return Ok(entries.pop().map_or(Value::Null, |(_, value)| value));
        }

        let mut merged = Vec::new();
        for (_, value) in entries {
            match value {
                Value::List(items) => merged.extend(items),
                Value::Map(members) => merged.extend(members.into_iter().map(|(_, item)| item)),
                other => merged.push(other),
            }
        }
        tracing::debug!(items = merged.len(), "default merge produced a list");
        Ok(Value::List(merged))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Fallback double: records every candidate set and answers with a
    /// fixed value.
    #[derive(Debug)]
    pub struct RecordingFallback {
        answer: Value,
        calls: Mutex<Vec<CandidateSet>>,
    }

    impl RecordingFallback {
        pub fn new(answer: impl Into<Value>) -> Self {
            Self {
                answer: answer.into(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<CandidateSet> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MergeHandler for RecordingFallback {
        fn merge(&self, candidates: CandidateSet) -> Result<Value, HandlerError> {
            self.calls.lock().unwrap().push(candidates);
            Ok(self.answer.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collate_kernel::{KeyedCollection, Record};

    #[test]
    fn candidate_set_keeps_order_and_keys() {
        let set = CandidateSet::from_named([("b", 1), ("a", 2)]);
        let keys: Vec<&Key> = set.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![&Key::from("b"), &Key::from("a")]);
        assert_eq!(set.len(), 2);

        let indexed = CandidateSet::from_values(["x", "y"]);
        assert_eq!(
            indexed.into_entries(),
            vec![
                (Key::Index(0), Value::from("x")),
                (Key::Index(1), Value::from("y")),
            ]
        );
    }

    #[test]
    fn default_merge_of_nothing_is_null() {
        let merged = DefaultMergeHandler.merge(CandidateSet::new()).unwrap();
        assert_eq!(merged, Value::Null);
    }

    #[test]
    fn default_merge_of_one_candidate_is_that_candidate() {
        let collection = Value::from(KeyedCollection::from_values(["a"]));
        let merged = DefaultMergeHandler
            .merge(CandidateSet::from_values([collection.clone()]))
            .unwrap();
        assert_eq!(merged, collection);
    }

    #[test]
    fn default_merge_spreads_lists_and_maps() {
        let record = Value::from(Record::new("Address").with_field("city", "Potter"));
        let merged = DefaultMergeHandler
            .merge(CandidateSet::from_values([
                Value::List(vec![Value::from(1), Value::from(2)]),
                Value::map([("k", 3)]),
                record.clone(),
            ]))
            .unwrap();
        assert_eq!(
            merged,
            Value::List(vec![Value::from(1), Value::from(2), Value::from(3), record])
        );
    }
}
