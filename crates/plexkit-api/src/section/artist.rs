use std::ops::Deref;

use plexkit_models::ItemType;

use super::SectionBase;
use crate::endpoint::ALBUMS;
use crate::error::Result;
use crate::item::{Child, Grandparent, Item, Parent};
use crate::resolve::Selector;

#[derive(Debug, Clone)]
pub struct ArtistSection {
    pub(super) base: SectionBase,
}

impl ArtistSection {
    pub fn all_artists(&self) -> Result<Vec<Item>> {
        self.base.all_items()
    }

    pub fn all_albums(&self) -> Result<Vec<Item>> {
        self.base.items(ALBUMS)
    }

    pub fn artists_by_genre(&self, genre: u64) -> Result<Vec<Item>> {
        self.base.items_by_genre(genre)
    }

    pub fn artists_by_collection(&self, collection: u64) -> Result<Vec<Item>> {
        self.base.items_by_collection(collection)
    }

    pub fn albums_by_year(&self, year: i32) -> Result<Vec<Item>> {
        self.base.items_by_year(year)
    }

    pub fn albums_by_decade(&self, decade: i32) -> Result<Vec<Item>> {
        self.base.items_by_decade(decade)
    }

    pub fn recently_added_albums(&self) -> Result<Vec<Item>> {
        self.base.recently_added_items()
    }

    pub fn search_artists(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Artist, query)
    }

    pub fn search_albums(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Album, query)
    }

    pub fn search_tracks(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Track, query)
    }

    pub fn artist(&self, selector: impl Into<Selector>) -> Result<Grandparent> {
        self.base
            .resolve_item(ItemType::Artist, selector.into(), Item::into_grandparent)
    }

    pub fn album(&self, selector: impl Into<Selector>) -> Result<Parent> {
        self.base
            .resolve_item(ItemType::Album, selector.into(), Item::into_parent)
    }

    pub fn track(&self, selector: impl Into<Selector>) -> Result<Child> {
        self.base
            .resolve_item(ItemType::Track, selector.into(), Item::into_child)
    }
}

impl Deref for ArtistSection {
    type Target = SectionBase;

    fn deref(&self) -> &SectionBase {
        &self.base
    }
}
