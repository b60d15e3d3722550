//! Key-or-title lookup over a fetched collection.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::server::Server;

/// How a caller identifies one entity among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Exact match on the numeric key (`ratingKey` for items, `key` for sections).
    ByKey(u64),
    /// Exact, case-sensitive match on the full title.
    ByTitle(String),
}

impl Selector {
    pub fn matches<E: Entity + ?Sized>(&self, entity: &E) -> bool {
        match self {
            Selector::ByKey(key) => entity.key() == Some(*key),
            Selector::ByTitle(title) => entity.title() == Some(title.as_str()),
        }
    }

    /// Reads command-line input: all digits means a key, anything else a title.
    pub fn parse_lenient(input: &str) -> Self {
        match input.parse::<u64>() {
            Ok(key) => Selector::ByKey(key),
            Err(_) => Selector::ByTitle(input.to_string()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::ByKey(key) => write!(f, "key {}", key),
            Selector::ByTitle(title) => write!(f, "title {:?}", title),
        }
    }
}

impl From<u64> for Selector {
    fn from(key: u64) -> Self {
        Selector::ByKey(key)
    }
}

impl From<&str> for Selector {
    fn from(title: &str) -> Self {
        Selector::ByTitle(title.to_string())
    }
}

impl From<String> for Selector {
    fn from(title: String) -> Self {
        Selector::ByTitle(title)
    }
}

/// Anything the resolver can pick out of a collection.
pub trait Entity {
    fn key(&self) -> Option<u64>;
    fn title(&self) -> Option<&str>;
    /// Kind name used in error messages.
    fn kind(&self) -> &'static str;
    fn server(&self) -> &Arc<Server>;
}

/// Fetches the full collection once and returns the first entity matching
/// `selector`, in source order.
pub fn resolve<T, F>(kind: &str, source: F, selector: &Selector) -> Result<T>
where
    T: Entity,
    F: FnOnce() -> Result<Vec<T>>,
{
    let candidates = source()?;
    debug!("resolving {} by {} among {} candidate(s)", kind, selector, candidates.len());
    candidates
        .into_iter()
        .find(|candidate| selector.matches(candidate))
        .ok_or_else(|| LibraryError::not_found(kind, selector.clone()))
}
