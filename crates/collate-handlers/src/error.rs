//! Error types for handler operations.

use collate_kernel::{CollectionFlavor, KernelError, TypeTag};
use std::fmt;

/// Error returned by a caller-supplied predicate or transform.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// The sequence operations guarded by the capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetIterator,
    Filter,
    Flatten,
    Count,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetIterator => write!(f, "get_iterator"),
            Self::Filter => write!(f, "filter"),
            Self::Flatten => write!(f, "flatten"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// Errors surfaced by sequence and merge handlers.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The value is not a container of the handler's flavor. Raised before
    /// any iteration takes place.
    #[error(
        "the `{handler}` can only handle {expected} collections; illegal invocation of method \
         `{method}`, invoke `supports` first"
    )]
    UnsupportedOperand {
        handler: &'static str,
        expected: CollectionFlavor,
        method: Method,
    },

    /// An element disagrees with the established element type.
    #[error("data is not of expected type `{expected}`, but of type `{actual}`")]
    TypeMismatch { expected: TypeTag, actual: TypeTag },

    /// Any other container-boundary failure.
    #[error(transparent)]
    Kernel(KernelError),

    /// A predicate or transform failed; its error is passed through as is.
    #[error(transparent)]
    Callback(CallbackError),
}

impl HandlerError {
    /// Recover the callback's own error, if that is what this is.
    pub fn into_callback_error(self) -> Option<CallbackError> {
        match self {
            Self::Callback(err) => Some(err),
            _ => None,
        }
    }
}

impl From<KernelError> for HandlerError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::TypeMismatch { expected, actual } => Self::TypeMismatch { expected, actual },
            other => Self::Kernel(other),
        }
    }
}

impl From<CallbackError> for HandlerError {
    fn from(err: CallbackError) -> Self {
        Self::Callback(err)
    }
}
