use thiserror::Error;

/// A value was present in a raw record but could not be coerced to the
/// field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("malformed attribute '{field}': {value:?}")]
    Malformed { field: String, value: String },
}

impl AttributeError {
    pub fn field(&self) -> &str {
        match self {
            AttributeError::Malformed { field, .. } => field,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            AttributeError::Malformed { value, .. } => value,
        }
    }
}

/// A type discriminator outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind: {0:?}")]
pub struct UnknownKind(pub String);
