//! Library sections and their query surface.
//!
//! Every query builds a segment under `sections/{key}/`, makes one round
//! trip, and either hydrates the result into items or hands back the raw
//! records (for lookup lists such as genres, whose entries only feed the
//! category queries).

mod artist;
mod movie;
mod photo;
mod show;

use std::ops::Deref;
use std::sync::Arc;

use plexkit_models::{Hydrate, ItemType, RawRecord, SectionAttributes, SectionType};
use serde::{Serialize, Serializer};

use crate::endpoint::{
    self, ALL, COLLECTION, DECADE, FIRST_CHARACTER, GENRE, NEWEST, ON_DECK, RECENTLY_ADDED,
    RECENTLY_VIEWED, UNWATCHED, YEAR,
};
use crate::error::{LibraryError, Result};
use crate::item::Item;
use crate::library;
use crate::resolve::{resolve, Entity, Selector};
use crate::server::Server;

pub use artist::ArtistSection;
pub use movie::MovieSection;
pub use photo::PhotoSection;
pub use show::ShowSection;

/// State and queries shared by every section type.
#[derive(Debug, Clone)]
pub struct SectionBase {
    server: Arc<Server>,
    section_type: SectionType,
    attributes: SectionAttributes,
}

impl SectionBase {
    fn new(server: Arc<Server>, section_type: SectionType) -> Self {
        Self {
            server,
            section_type,
            attributes: SectionAttributes::default(),
        }
    }

    pub fn attributes(&self) -> &SectionAttributes {
        &self.attributes
    }

    pub fn section_type(&self) -> SectionType {
        self.section_type
    }

    /// `sections/{key}/{segment}`.
    pub fn build_endpoint(&self, segment: &str) -> Result<String> {
        let key = self.key().ok_or_else(|| LibraryError::MissingKey {
            kind: "section".to_string(),
        })?;
        Ok(endpoint::section_endpoint(key, segment))
    }

    pub fn build_search_endpoint(&self, item_type: ItemType, query: &str) -> Result<String> {
        self.build_endpoint(&endpoint::search_segment(item_type.search_type(), query))
    }

    pub fn build_filter_endpoint(&self, filters: &[(&str, String)]) -> Result<String> {
        self.build_endpoint(&endpoint::filter_segment(filters))
    }

    /// Hydrated items behind `segment`.
    pub fn items(&self, segment: &str) -> Result<Vec<Item>> {
        library::get_items(&self.server, &self.build_endpoint(segment)?)
    }

    /// Raw records behind `segment`.
    pub fn records(&self, segment: &str) -> Result<Vec<RawRecord>> {
        library::get_records(&self.server, &self.build_endpoint(segment)?)
    }

    pub fn all_items(&self) -> Result<Vec<Item>> {
        self.items(ALL)
    }

    pub fn unwatched_items(&self) -> Result<Vec<Item>> {
        self.items(UNWATCHED)
    }

    /// Sorted by release date, newest first.
    pub fn newest_items(&self) -> Result<Vec<Item>> {
        self.items(NEWEST)
    }

    pub fn recently_added_items(&self) -> Result<Vec<Item>> {
        self.items(RECENTLY_ADDED)
    }

    pub fn recently_viewed_items(&self) -> Result<Vec<Item>> {
        self.items(RECENTLY_VIEWED)
    }

    pub fn on_deck_items(&self) -> Result<Vec<Item>> {
        self.items(ON_DECK)
    }

    pub fn items_by_collection(&self, collection: u64) -> Result<Vec<Item>> {
        self.items(&format!("{}/{}", COLLECTION, collection))
    }

    pub fn items_by_genre(&self, genre: u64) -> Result<Vec<Item>> {
        self.items(&format!("{}/{}", GENRE, genre))
    }

    pub fn items_by_year(&self, year: i32) -> Result<Vec<Item>> {
        self.items(&format!("{}/{}", YEAR, year))
    }

    /// `decade` is the decade's first year, e.g. `1980`.
    pub fn items_by_decade(&self, decade: i32) -> Result<Vec<Item>> {
        self.items(&format!("{}/{}", DECADE, decade))
    }

    /// `#` selects titles starting with a non-letter.
    pub fn items_by_first_character(&self, character: &str) -> Result<Vec<Item>> {
        self.items(&endpoint::category_segment(FIRST_CHARACTER, character))
    }

    /// `all?{filters}`, pairs sent in the given order.
    pub fn filtered_items(&self, filters: &[(&str, String)]) -> Result<Vec<Item>> {
        library::get_items(&self.server, &self.build_filter_endpoint(filters)?)
    }

    /// Every item of `item_type` in the section (`all?type={code}`).
    pub fn items_of_type(&self, item_type: ItemType) -> Result<Vec<Item>> {
        self.filtered_items(&[("type", item_type.search_type().to_string())])
    }

    pub fn search(&self, item_type: ItemType, query: &str) -> Result<Vec<Item>> {
        library::get_items(&self.server, &self.build_search_endpoint(item_type, query)?)
    }

    pub fn collections(&self) -> Result<Vec<RawRecord>> {
        self.records(COLLECTION)
    }

    pub fn genres(&self) -> Result<Vec<RawRecord>> {
        self.records(GENRE)
    }

    pub fn years(&self) -> Result<Vec<RawRecord>> {
        self.records(YEAR)
    }

    pub fn decades(&self) -> Result<Vec<RawRecord>> {
        self.records(DECADE)
    }

    pub fn first_characters(&self) -> Result<Vec<RawRecord>> {
        self.records(FIRST_CHARACTER)
    }

    /// Resolves one item of `item_type`, keeping only the tier `pick` accepts.
    pub(crate) fn resolve_item<T, F>(&self, item_type: ItemType, selector: Selector, pick: F) -> Result<T>
    where
        T: Entity,
        F: Fn(Item) -> Option<T>,
    {
        resolve(
            item_type.as_str(),
            || Ok(self.items_of_type(item_type)?.into_iter().filter_map(&pick).collect()),
            &selector,
        )
    }
}

impl Entity for SectionBase {
    fn key(&self) -> Option<u64> {
        self.attributes.key
    }

    fn title(&self) -> Option<&str> {
        self.attributes.title.as_deref()
    }

    fn kind(&self) -> &'static str {
        "section"
    }

    fn server(&self) -> &Arc<Server> {
        &self.server
    }
}

/// A library section, tagged by content type.
#[derive(Debug, Clone)]
pub enum Section {
    Movie(MovieSection),
    Show(ShowSection),
    Artist(ArtistSection),
    Photo(PhotoSection),
}

impl Section {
    pub fn new(server: Arc<Server>, section_type: SectionType) -> Self {
        let base = SectionBase::new(server, section_type);
        match section_type {
            SectionType::Movie => Section::Movie(MovieSection { base }),
            SectionType::Show => Section::Show(ShowSection { base }),
            SectionType::Artist => Section::Artist(ArtistSection { base }),
            SectionType::Photo => Section::Photo(PhotoSection { base }),
        }
    }

    pub fn hydrate(&mut self, record: &RawRecord) -> Result<()> {
        self.base_mut().attributes.hydrate(record)?;
        Ok(())
    }

    pub fn base(&self) -> &SectionBase {
        match self {
            Section::Movie(section) => &section.base,
            Section::Show(section) => &section.base,
            Section::Artist(section) => &section.base,
            Section::Photo(section) => &section.base,
        }
    }

    fn base_mut(&mut self) -> &mut SectionBase {
        match self {
            Section::Movie(section) => &mut section.base,
            Section::Show(section) => &mut section.base,
            Section::Artist(section) => &mut section.base,
            Section::Photo(section) => &mut section.base,
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.base().section_type
    }

    pub fn as_movie(&self) -> Option<&MovieSection> {
        match self {
            Section::Movie(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_show(&self) -> Option<&ShowSection> {
        match self {
            Section::Show(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_artist(&self) -> Option<&ArtistSection> {
        match self {
            Section::Artist(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_photo(&self) -> Option<&PhotoSection> {
        match self {
            Section::Photo(section) => Some(section),
            _ => None,
        }
    }

    /// Resolves an item of the section's top-level type.
    pub fn item(&self, selector: impl Into<Selector>) -> Result<Item> {
        let base = self.base();
        base.resolve_item(base.section_type.root_item_type(), selector.into(), Some)
    }
}

impl Deref for Section {
    type Target = SectionBase;

    fn deref(&self) -> &SectionBase {
        self.base()
    }
}

impl Entity for Section {
    fn key(&self) -> Option<u64> {
        self.base().key()
    }

    fn title(&self) -> Option<&str> {
        self.base().title()
    }

    fn kind(&self) -> &'static str {
        "section"
    }

    fn server(&self) -> &Arc<Server> {
        self.base().server()
    }
}

#[derive(Serialize)]
struct SectionView<'a> {
    #[serde(rename = "type")]
    section_type: SectionType,
    #[serde(flatten)]
    attributes: &'a SectionAttributes,
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SectionView {
            section_type: self.section_type(),
            attributes: &self.base().attributes,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests;
