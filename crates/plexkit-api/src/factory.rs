//! Maps type discriminators to typed entities.

use std::sync::Arc;

use plexkit_models::{ItemType, RawRecord, SectionType};
use serde_json::Value;
use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::item::Item;
use crate::section::Section;
use crate::server::Server;

/// Name fragments of query methods and the item kind they fetch.
///
/// Checked in order; the first fragment contained in the name wins.
const QUERY_KINDS: [(&str, ItemType); 8] = [
    ("movie", ItemType::Movie),
    ("artist", ItemType::Artist),
    ("album", ItemType::Album),
    ("track", ItemType::Track),
    ("photo", ItemType::Photo),
    ("show", ItemType::Show),
    ("season", ItemType::Season),
    ("episode", ItemType::Episode),
];

/// Empty item of `kind`. Unknown kinds fail with the offending string.
pub fn create_item(kind: &str, server: &Arc<Server>) -> Result<Item> {
    let item_type: ItemType = kind.parse()?;
    Ok(Item::new(Arc::clone(server), item_type))
}

/// Empty section of `kind`.
pub fn create_section(kind: &str, server: &Arc<Server>) -> Result<Section> {
    let section_type: SectionType = kind.parse()?;
    Ok(Section::new(Arc::clone(server), section_type))
}

/// Reads the `type` discriminator. `None` when the record has none.
fn discriminator(record: &RawRecord) -> Result<Option<&str>> {
    match record.get("type") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(kind)) => Ok(Some(kind)),
        Some(other) => Err(LibraryError::UnknownEntityKind(other.to_string())),
    }
}

/// Typed, hydrated item for `record`; `None` for rows without a discriminator.
pub fn item_from_record(server: &Arc<Server>, record: &RawRecord) -> Result<Option<Item>> {
    let Some(kind) = discriminator(record)? else {
        let title = record.get("title").and_then(|title| title.as_str());
        debug!("skipping record without type: {:?}", title);
        return Ok(None);
    };
    let mut item = create_item(kind, server)?;
    item.hydrate(record)?;
    Ok(Some(item))
}

/// Typed, hydrated section for `record`; `None` for rows without a discriminator.
pub fn section_from_record(server: &Arc<Server>, record: &RawRecord) -> Result<Option<Section>> {
    let Some(kind) = discriminator(record)? else {
        debug!("skipping section record without type");
        return Ok(None);
    };
    let mut section = create_section(kind, server)?;
    section.hydrate(record)?;
    Ok(Some(section))
}

/// Item kind implied by a query name such as `all_albums` or `getOnDeckEpisodes`.
pub fn infer_kind_from_query(name: &str) -> Option<ItemType> {
    let name = name.to_ascii_lowercase();
    QUERY_KINDS
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, kind)| *kind)
}
