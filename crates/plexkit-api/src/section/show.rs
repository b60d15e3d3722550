use std::ops::Deref;

use plexkit_models::{ItemType, RawRecord};

use super::SectionBase;
use crate::endpoint::{self, CONTENT_RATING};
use crate::error::Result;
use crate::item::{Grandparent, Item};
use crate::resolve::Selector;

#[derive(Debug, Clone)]
pub struct ShowSection {
    pub(super) base: SectionBase,
}

impl ShowSection {
    pub fn all_shows(&self) -> Result<Vec<Item>> {
        self.base.all_items()
    }

    pub fn unwatched_shows(&self) -> Result<Vec<Item>> {
        self.base.unwatched_items()
    }

    pub fn recently_aired_episodes(&self) -> Result<Vec<Item>> {
        self.base.newest_items()
    }

    /// The server reports recently added TV content as seasons.
    pub fn recently_added_seasons(&self) -> Result<Vec<Item>> {
        self.base.recently_added_items()
    }

    pub fn recently_viewed_episodes(&self) -> Result<Vec<Item>> {
        self.base.recently_viewed_items()
    }

    pub fn on_deck_episodes(&self) -> Result<Vec<Item>> {
        self.base.on_deck_items()
    }

    pub fn shows_by_collection(&self, collection: u64) -> Result<Vec<Item>> {
        self.base.items_by_collection(collection)
    }

    pub fn shows_by_genre(&self, genre: u64) -> Result<Vec<Item>> {
        self.base.items_by_genre(genre)
    }

    pub fn shows_by_year(&self, year: i32) -> Result<Vec<Item>> {
        self.base.items_by_year(year)
    }

    pub fn shows_by_decade(&self, decade: i32) -> Result<Vec<Item>> {
        self.base.items_by_decade(decade)
    }

    pub fn shows_by_content_rating(&self, rating: &str) -> Result<Vec<Item>> {
        self.base.items(&endpoint::category_segment(CONTENT_RATING, rating))
    }

    pub fn shows_by_first_character(&self, character: &str) -> Result<Vec<Item>> {
        self.base.items_by_first_character(character)
    }

    pub fn content_ratings(&self) -> Result<Vec<RawRecord>> {
        self.base.records(CONTENT_RATING)
    }

    pub fn search_shows(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Show, query)
    }

    pub fn search_episodes(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Episode, query)
    }

    pub fn show(&self, selector: impl Into<Selector>) -> Result<Grandparent> {
        self.base
            .resolve_item(ItemType::Show, selector.into(), Item::into_grandparent)
    }
}

impl Deref for ShowSection {
    type Target = SectionBase;

    fn deref(&self) -> &SectionBase {
        &self.base
    }
}
