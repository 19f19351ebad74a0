//! The sequence operation engine.
//!
//! A `SequenceHandler` serves one collection flavor. Every operation runs
//! the capability guard first: a value that is not a container of the
//! handler's flavor is rejected with `UnsupportedOperand` before any of it
//! is read. Callers are expected to ask `supports` before invoking.
//!
//! Results of `filter` and `flatten` are always new containers; the source
//! is never modified. Callbacks run synchronously, once per element, in the
//! source's iteration order.

use crate::error::{CallbackError, HandlerError, Method};
use crate::flatten::TransformResult;
use collate_kernel::{Collection, CollectionFlavor, Container, Key, Value};

/// Lazy, single-pass iterator over `(key, value)` pairs.
pub type Entries<'a> = Box<dyn Iterator<Item = (Key, &'a Value)> + 'a>;

/// Decides whether an element is kept by `filter`.
pub type Predicate<'f> = dyn FnMut(&Value, &Key) -> Result<bool, CallbackError> + 'f;

/// Maps an element to its flatten contribution.
pub type Transform<'f> = dyn FnMut(&Value, &Key) -> Result<TransformResult, CallbackError> + 'f;

pub trait SequenceHandler: Send + Sync {
    /// Handler name used in diagnostics.
    fn name(&self) -> &'static str;

    /// The container flavor this handler operates on.
    fn supported_flavor(&self) -> CollectionFlavor;

    /// Whether `data` passes the capability guard.
    fn supports(&self, data: &Value) -> bool {
        self.supported_flavor().matches(data)
    }

    /// A fresh iterator positioned at the first element.
    fn get_iterator<'a>(&self, data: &'a Value) -> Result<Entries<'a>, HandlerError> {
        let collection = guard(self, data, Method::GetIterator)?;
        Ok(collection.iter())
    }

    /// Element count.
    fn count(&self, data: &Value) -> Result<usize, HandlerError> {
        let collection = guard(self, data, Method::Count)?;
        Ok(collection.len())
    }

    /// A new container of the same flavor and element type holding the
    /// elements for which `predicate` returned true.
    fn filter(&self, data: &Value, predicate: &mut Predicate<'_>) -> Result<Value, HandlerError> {
        let collection = guard(self, data, Method::Filter)?;
        self.perform_filter(collection, predicate).map(Value::Collection)
    }

    /// A new container holding every transform contribution, unwrapped and
    /// concatenated in order.
    fn flatten(&self, data: &Value, transform: &mut Transform<'_>) -> Result<Value, HandlerError> {
        let collection = guard(self, data, Method::Flatten)?;
        self.perform_flatten(collection, transform)
            .map(Value::Collection)
    }

    /// Filter a collection that already passed the guard.
    fn perform_filter(
        &self,
        collection: &Collection,
        predicate: &mut Predicate<'_>,
    ) -> Result<Collection, HandlerError>;

    /// Flatten a collection that already passed the guard.
    fn perform_flatten(
        &self,
        collection: &Collection,
        transform: &mut Transform<'_>,
    ) -> Result<Collection, HandlerError>;
}

impl<H: SequenceHandler + ?Sized> SequenceHandler for Box<H> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supported_flavor(&self) -> CollectionFlavor {
        (**self).supported_flavor()
    }

    fn supports(&self, data: &Value) -> bool {
        (**self).supports(data)
    }

    fn get_iterator<'a>(&self, data: &'a Value) -> Result<Entries<'a>, HandlerError> {
        (**self).get_iterator(data)
    }

    fn count(&self, data: &Value) -> Result<usize, HandlerError> {
        (**self).count(data)
    }

    fn filter(&self, data: &Value, predicate: &mut Predicate<'_>) -> Result<Value, HandlerError> {
        (**self).filter(data, predicate)
    }

    fn flatten(&self, data: &Value, transform: &mut Transform<'_>) -> Result<Value, HandlerError> {
        (**self).flatten(data, transform)
    }

    fn perform_filter(
        &self,
        collection: &Collection,
        predicate: &mut Predicate<'_>,
    ) -> Result<Collection, HandlerError> {
        (**self).perform_filter(collection, predicate)
    }

    fn perform_flatten(
        &self,
        collection: &Collection,
        transform: &mut Transform<'_>,
    ) -> Result<Collection, HandlerError> {
        (**self).perform_flatten(collection, transform)
    }
}

/// The capability guard shared by every operation.
pub fn guard<'a, H>(handler: &H, data: &'a Value, method: Method) -> Result<&'a Collection, HandlerError>
where
    H: SequenceHandler + ?Sized,
{
    match data {
        Value::Collection(collection) if handler.supports(data) => Ok(collection),
        _ => Err(unsupported(handler, method)),
    }
}

pub(crate) fn unsupported<H>(handler: &H, method: Method) -> HandlerError
where
    H: SequenceHandler + ?Sized,
{
    HandlerError::UnsupportedOperand {
        handler: handler.name(),
        expected: handler.supported_flavor(),
        method,
    }
}

/// Run `predicate` over every element, keeping the passing entries.
pub(crate) fn select<'a>(
    collection: &'a Collection,
    predicate: &mut Predicate<'_>,
) -> Result<Vec<(Key, &'a Value)>, HandlerError> {
    let mut kept = Vec::new();
    for (key, value) in collection.iter() {
        if predicate(value, &key)? {
            kept.push((key, value));
        }
    }
    Ok(kept)
}
