//! Error types for kernel operations.

use crate::type_tag::TypeTag;

/// Errors raised at the container boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// An element does not match the declared element type of a typed
    /// collection.
    #[error("data is not of expected type `{expected}`, but of type `{actual}`")]
    TypeMismatch { expected: TypeTag, actual: TypeTag },

    /// A type tag could not be parsed.
    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// A collection flavor name is not one of the supported variants.
    #[error("unknown collection flavor: {0}")]
    UnknownFlavor(String),

    /// A reserved JSON shape (`$class`, `$collection`) is malformed.
    #[error("invalid json value: {0}")]
    Json(String),
}
