use std::ops::Deref;

use plexkit_models::{ItemType, RawRecord};

use super::SectionBase;
use crate::endpoint::{self, ACTOR, CONTENT_RATING, DIRECTOR, RESOLUTION};
use crate::error::Result;
use crate::item::{Child, Item};
use crate::resolve::Selector;

#[derive(Debug, Clone)]
pub struct MovieSection {
    pub(super) base: SectionBase,
}

impl MovieSection {
    pub fn all_movies(&self) -> Result<Vec<Item>> {
        self.base.all_items()
    }

    pub fn unwatched_movies(&self) -> Result<Vec<Item>> {
        self.base.unwatched_items()
    }

    pub fn recently_released_movies(&self) -> Result<Vec<Item>> {
        self.base.newest_items()
    }

    pub fn recently_added_movies(&self) -> Result<Vec<Item>> {
        self.base.recently_added_items()
    }

    pub fn recently_viewed_movies(&self) -> Result<Vec<Item>> {
        self.base.recently_viewed_items()
    }

    /// Movies watched in the last `days` days, most recent first.
    pub fn movies_viewed_within_days(&self, days: u32) -> Result<Vec<Item>> {
        self.base.filtered_items(&[
            ("type", ItemType::Movie.search_type().to_string()),
            ("lastViewedAt>>", format!("-{}d", days)),
            ("sort", "lastViewedAt:desc".to_string()),
        ])
    }

    pub fn on_deck_movies(&self) -> Result<Vec<Item>> {
        self.base.on_deck_items()
    }

    pub fn movies_by_collection(&self, collection: u64) -> Result<Vec<Item>> {
        self.base.items_by_collection(collection)
    }

    pub fn movies_by_genre(&self, genre: u64) -> Result<Vec<Item>> {
        self.base.items_by_genre(genre)
    }

    pub fn movies_by_year(&self, year: i32) -> Result<Vec<Item>> {
        self.base.items_by_year(year)
    }

    pub fn movies_by_decade(&self, decade: i32) -> Result<Vec<Item>> {
        self.base.items_by_decade(decade)
    }

    pub fn movies_by_first_character(&self, character: &str) -> Result<Vec<Item>> {
        self.base.items_by_first_character(character)
    }

    pub fn movies_by_director(&self, director: u64) -> Result<Vec<Item>> {
        self.base.items(&format!("{}/{}", DIRECTOR, director))
    }

    pub fn movies_by_actor(&self, actor: u64) -> Result<Vec<Item>> {
        self.base.items(&format!("{}/{}", ACTOR, actor))
    }

    pub fn movies_by_content_rating(&self, rating: &str) -> Result<Vec<Item>> {
        self.base.items(&endpoint::category_segment(CONTENT_RATING, rating))
    }

    /// `resolution` as listed by [`resolutions`](Self::resolutions): `1080`, `720`, `sd`, ...
    pub fn movies_by_resolution(&self, resolution: &str) -> Result<Vec<Item>> {
        self.base.items(&endpoint::category_segment(RESOLUTION, resolution))
    }

    pub fn directors(&self) -> Result<Vec<RawRecord>> {
        self.base.records(DIRECTOR)
    }

    pub fn actors(&self) -> Result<Vec<RawRecord>> {
        self.base.records(ACTOR)
    }

    pub fn content_ratings(&self) -> Result<Vec<RawRecord>> {
        self.base.records(CONTENT_RATING)
    }

    pub fn resolutions(&self) -> Result<Vec<RawRecord>> {
        self.base.records(RESOLUTION)
    }

    pub fn search_movies(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Movie, query)
    }

    pub fn movie(&self, selector: impl Into<Selector>) -> Result<Child> {
        self.base
            .resolve_item(ItemType::Movie, selector.into(), Item::into_child)
    }
}

impl Deref for MovieSection {
    type Target = SectionBase;

    fn deref(&self) -> &SectionBase {
        &self.base
    }
}
