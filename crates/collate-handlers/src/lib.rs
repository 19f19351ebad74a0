//! # Collate Handlers
//!
//! Sequence and merge handlers over the containers of `collate-kernel`.
//!
//! A data-resolution engine walks nested data and, whenever it meets a
//! container, asks a [`SequenceHandler`] to iterate, count, filter or
//! flatten it. When one path yields several sibling values, a
//! [`MergeHandler`] chain decides whether they combine into one container.
//!
//! ## Architecture
//!
//! ```text
//! HandlerRegistry
//!     ├── SequenceHandler (first whose guard accepts the value)
//!     │       ├── KeyedSequenceHandler
//!     │       └── TypedSequenceHandler
//!     └── MergeHandler chain
//!             KeyedMergeHandler → TypedMergeHandler → DefaultMergeHandler
//! ```
//!
//! Every operation is synchronous and allocates its result; inputs are
//! never mutated.

pub mod config;
pub mod error;
pub mod flatten;
pub mod keyed_merge;
pub mod keyed_sequence;
pub mod merge;
pub mod registry;
pub mod sequence;
pub mod typed_merge;
pub mod typed_sequence;

pub use config::{ConfigError, HandlersConfig};
pub use error::{CallbackError, HandlerError, Method};
pub use flatten::{FlattenAccumulator, TransformResult};
pub use keyed_merge::KeyedMergeHandler;
pub use keyed_sequence::KeyedSequenceHandler;
pub use merge::{CandidateSet, DefaultMergeHandler, MergeHandler};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder, merge_chain, sequence_handler};
pub use sequence::{Entries, Predicate, SequenceHandler, Transform};
pub use typed_merge::TypedMergeHandler;
pub use typed_sequence::TypedSequenceHandler;
