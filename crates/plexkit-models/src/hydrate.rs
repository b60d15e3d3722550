use crate::error::AttributeError;
use crate::record::RawRecord;

/// Copies the attributes present in a raw record onto `self`.
///
/// Fields the record does not mention keep their current value, so hydrating
/// twice with disjoint records accumulates both, and hydrating twice with the
/// same record is a no-op the second time. Composite types hydrate their
/// upper-tier parts first and then layer their own fields on top.
pub trait Hydrate {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError>;

    /// Builds a default value and hydrates it from `record`.
    fn from_record(record: &RawRecord) -> Result<Self, AttributeError>
    where
        Self: Default,
    {
        let mut value = Self::default();
        value.hydrate(record)?;
        Ok(value)
    }
}
