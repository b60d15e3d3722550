use std::ops::Deref;

use plexkit_models::ItemType;

use super::SectionBase;
use crate::error::Result;
use crate::item::{Child, Item};
use crate::resolve::Selector;

#[derive(Debug, Clone)]
pub struct PhotoSection {
    pub(super) base: SectionBase,
}

impl PhotoSection {
    pub fn all_photos(&self) -> Result<Vec<Item>> {
        self.base.all_items()
    }

    pub fn photos_by_year(&self, year: i32) -> Result<Vec<Item>> {
        self.base.items_by_year(year)
    }

    pub fn search_photos(&self, query: &str) -> Result<Vec<Item>> {
        self.base.search(ItemType::Photo, query)
    }

    pub fn photo(&self, selector: impl Into<Selector>) -> Result<Child> {
        self.base
            .resolve_item(ItemType::Photo, selector.into(), Item::into_child)
    }
}

impl Deref for PhotoSection {
    type Target = SectionBase;

    fn deref(&self) -> &SectionBase {
        &self.base
    }
}
