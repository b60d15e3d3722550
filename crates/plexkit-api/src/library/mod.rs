//! Library root and the shared list fetch.

use std::sync::Arc;

use plexkit_models::RawRecord;
use tracing::debug;

use crate::endpoint::{self, ON_DECK, RECENTLY_ADDED, SECTIONS};
use crate::error::{LibraryError, Result};
use crate::factory;
use crate::item::Item;
use crate::resolve::{resolve, Selector};
use crate::section::Section;
use crate::server::Server;

/// One round trip to `library/{endpoint}`, hydrating every typed record.
///
/// Records without a `type` are rows the server injects for display (the
/// "All episodes" entry of a season list) and are skipped.
pub fn get_items(server: &Arc<Server>, endpoint: &str) -> Result<Vec<Item>> {
    let records = server.library_records(endpoint)?;
    let mut items = Vec::with_capacity(records.len());
    for record in &records {
        if let Some(item) = factory::item_from_record(server, record)? {
            items.push(item);
        }
    }
    debug!("{} item(s) from {}", items.len(), endpoint);
    Ok(items)
}

/// Records behind `library/{endpoint}` without hydration.
pub fn get_records(server: &Server, endpoint: &str) -> Result<Vec<RawRecord>> {
    server.library_records(endpoint)
}

#[derive(Debug, Clone)]
pub struct Library {
    server: Arc<Server>,
}

impl Library {
    pub fn new(server: Arc<Server>) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }

    pub fn sections(&self) -> Result<Vec<Section>> {
        let records = self.server.library_records(SECTIONS)?;
        let mut sections = Vec::with_capacity(records.len());
        for record in &records {
            if let Some(section) = factory::section_from_record(&self.server, record)? {
                sections.push(section);
            }
        }
        Ok(sections)
    }

    pub fn section(&self, selector: impl Into<Selector>) -> Result<Section> {
        resolve("section", || self.sections(), &selector.into())
    }

    pub fn recently_added_items(&self) -> Result<Vec<Item>> {
        get_items(&self.server, RECENTLY_ADDED)
    }

    pub fn on_deck_items(&self) -> Result<Vec<Item>> {
        get_items(&self.server, ON_DECK)
    }

    /// Single item by rating key.
    pub fn metadata_item(&self, rating_key: u64) -> Result<Item> {
        get_items(&self.server, &endpoint::metadata_endpoint(rating_key))?
            .into_iter()
            .next()
            .ok_or_else(|| LibraryError::not_found("item", Selector::ByKey(rating_key)))
    }
}

#[cfg(test)]
mod tests;
