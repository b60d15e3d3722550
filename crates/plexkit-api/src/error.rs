use plexkit_models::{AttributeError, UnknownKind};
use thiserror::Error;

use crate::resolve::Selector;

/// Failure reported by a [`NetworkCaller`](crate::transport::NetworkCaller).
///
/// `code` is the HTTP status when one was received, `0` for failures below
/// HTTP (connect, timeout, decode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error ({code}): {message}")]
pub struct TransportError {
    pub code: u16,
    pub message: String,
}

impl TransportError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unknown entity kind: {0:?}")]
    UnknownEntityKind(String),

    #[error("malformed attribute '{field}': {value:?}")]
    MalformedAttribute { field: String, value: String },

    #[error("{kind} not found: {selector}")]
    ResourceNotFound { kind: String, selector: Selector },

    #[error("no {kind} to choose from")]
    EmptyCollection { kind: String },

    #[error("{kind} has no rating key")]
    MissingKey { kind: String },
}

impl From<AttributeError> for LibraryError {
    fn from(err: AttributeError) -> Self {
        match err {
            AttributeError::Malformed { field, value } => LibraryError::MalformedAttribute { field, value },
        }
    }
}

impl From<UnknownKind> for LibraryError {
    fn from(err: UnknownKind) -> Self {
        LibraryError::UnknownEntityKind(err.0)
    }
}

impl LibraryError {
    pub(crate) fn not_found(kind: impl Into<String>, selector: Selector) -> Self {
        LibraryError::ResourceNotFound {
            kind: kind.into(),
            selector,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::ResourceNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
