//! # Collate Kernel
//!
//! Leaf contracts shared by the sequence and merge handlers: what a value
//! is, how its type is classified, and what a homogeneous container must
//! provide.
//!
//! This crate is **library-agnostic**: containers are plain values handed
//! in from outside. It only prescribes how their element type is declared,
//! inferred and compared.
//!
//! ## Architecture
//!
//! ```text
//! Value                 ← scalars, plain arrays, records, collections
//!     │
//! TypeTag / classify    ← canonical type identity of any value
//!     │
//! Container             ← element type, size, keyed iteration, same-type test
//!     │
//! Collection            ← closed set of flavors: Keyed | Typed
//! ```

pub mod collection;
pub mod error;
pub mod json;
pub mod keyed;
pub mod type_tag;
pub mod typed;
pub mod value;

pub use collection::{Collection, CollectionFlavor, Container};
pub use error::KernelError;
pub use json::{from_json, to_json};
pub use keyed::KeyedCollection;
pub use type_tag::{TypeTag, classify};
pub use typed::TypedCollection;
pub use value::{ClassName, Key, Record, Value};
