//! Library item payloads.
//!
//! Attribute sets accumulate down the hierarchy: every item carries
//! [`CommonAttributes`] and [`GrandparentAttributes`], parent and child items
//! add [`ParentAttributes`], and only child items carry
//! [`ChildAttributes`]. A grandparent has no parent-tier fields at all, so a
//! stray `parentTitle` in a show record is simply never read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::hydrate::Hydrate;
use crate::kind::{ItemType, Tier};
use crate::media::Media;
use crate::record::{
    assign, datetime_field, float_field, int_field, key_field, records_field, string_field, RawRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonAttributes {
    pub rating_key: Option<u64>,
    pub key: Option<String>,
    pub guid: Option<String>,
    pub title: Option<String>,
    pub title_sort: Option<String>,
    pub summary: Option<String>,
    pub index: Option<i64>,
    pub thumb: Option<String>,
    pub added_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Hydrate for CommonAttributes {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.rating_key, key_field(record, "ratingKey")?);
        assign(&mut self.key, string_field(record, "key")?);
        assign(&mut self.guid, string_field(record, "guid")?);
        assign(&mut self.title, string_field(record, "title")?);
        assign(&mut self.title_sort, string_field(record, "titleSort")?);
        assign(&mut self.summary, string_field(record, "summary")?);
        assign(&mut self.index, int_field(record, "index")?);
        assign(&mut self.thumb, string_field(record, "thumb")?);
        assign(&mut self.added_at, datetime_field(record, "addedAt")?);
        assign(&mut self.updated_at, datetime_field(record, "updatedAt")?);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandparentAttributes {
    pub art: Option<String>,
    /// Number of leaves below the item (episodes of a show, tracks of an album).
    pub leaf_count: Option<i64>,
    pub viewed_leaf_count: Option<i64>,
    pub child_count: Option<i64>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub content_rating: Option<String>,
    pub studio: Option<String>,
}

impl Hydrate for GrandparentAttributes {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.art, string_field(record, "art")?);
        assign(&mut self.leaf_count, int_field(record, "leafCount")?);
        assign(&mut self.viewed_leaf_count, int_field(record, "viewedLeafCount")?);
        assign(&mut self.child_count, int_field(record, "childCount")?);
        assign(&mut self.year, int_field(record, "year")?);
        assign(&mut self.rating, float_field(record, "rating")?);
        assign(&mut self.content_rating, string_field(record, "contentRating")?);
        assign(&mut self.studio, string_field(record, "studio")?);
        Ok(())
    }
}

/// Ancestor fields the server denormalizes onto mid-tier and leaf items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentAttributes {
    pub parent_rating_key: Option<u64>,
    pub parent_key: Option<String>,
    pub parent_title: Option<String>,
    pub parent_index: Option<i64>,
    pub parent_thumb: Option<String>,
    pub originally_available_at: Option<DateTime<Utc>>,
}

impl Hydrate for ParentAttributes {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.parent_rating_key, key_field(record, "parentRatingKey")?);
        assign(&mut self.parent_key, string_field(record, "parentKey")?);
        assign(&mut self.parent_title, string_field(record, "parentTitle")?);
        assign(&mut self.parent_index, int_field(record, "parentIndex")?);
        assign(&mut self.parent_thumb, string_field(record, "parentThumb")?);
        assign(
            &mut self.originally_available_at,
            datetime_field(record, "originallyAvailableAt")?,
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAttributes {
    pub grandparent_rating_key: Option<u64>,
    pub grandparent_key: Option<String>,
    pub grandparent_title: Option<String>,
    pub grandparent_thumb: Option<String>,
    /// Milliseconds.
    pub duration: Option<i64>,
    pub view_count: Option<i64>,
    /// Resume position in milliseconds.
    pub view_offset: Option<i64>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    /// Movies only.
    pub tagline: Option<String>,
    /// Tracks only: the performing artist when it differs from the album artist.
    pub original_title: Option<String>,
    pub media: Vec<Media>,
}

impl Hydrate for ChildAttributes {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.grandparent_rating_key, key_field(record, "grandparentRatingKey")?);
        assign(&mut self.grandparent_key, string_field(record, "grandparentKey")?);
        assign(&mut self.grandparent_title, string_field(record, "grandparentTitle")?);
        assign(&mut self.grandparent_thumb, string_field(record, "grandparentThumb")?);
        assign(&mut self.duration, int_field(record, "duration")?);
        assign(&mut self.view_count, int_field(record, "viewCount")?);
        assign(&mut self.view_offset, int_field(record, "viewOffset")?);
        assign(&mut self.last_viewed_at, datetime_field(record, "lastViewedAt")?);

        if let Some(media) = records_field(record, "Media")? {
            self.media = media
                .into_iter()
                .map(Media::from_record)
                .collect::<Result<Vec<_>, _>>()?;
        }
        Ok(())
    }
}

/// Show or artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrandparentItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(flatten)]
    pub common: CommonAttributes,
    #[serde(flatten)]
    pub grandparent: GrandparentAttributes,
}

impl GrandparentItem {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            common: CommonAttributes::default(),
            grandparent: GrandparentAttributes::default(),
        }
    }
}

impl Hydrate for GrandparentItem {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        self.common.hydrate(record)?;
        self.grandparent.hydrate(record)
    }
}

/// Season or album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(flatten)]
    pub common: CommonAttributes,
    #[serde(flatten)]
    pub grandparent: GrandparentAttributes,
    #[serde(flatten)]
    pub parent: ParentAttributes,
}

impl ParentItem {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            common: CommonAttributes::default(),
            grandparent: GrandparentAttributes::default(),
            parent: ParentAttributes::default(),
        }
    }
}

impl Hydrate for ParentItem {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        self.common.hydrate(record)?;
        self.grandparent.hydrate(record)?;
        self.parent.hydrate(record)
    }
}

/// Movie, episode, track or photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(flatten)]
    pub common: CommonAttributes,
    #[serde(flatten)]
    pub grandparent: GrandparentAttributes,
    #[serde(flatten)]
    pub parent: ParentAttributes,
    #[serde(flatten)]
    pub child: ChildAttributes,
}

impl ChildItem {
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            common: CommonAttributes::default(),
            grandparent: GrandparentAttributes::default(),
            parent: ParentAttributes::default(),
            child: ChildAttributes::default(),
        }
    }
}

impl Hydrate for ChildItem {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        self.common.hydrate(record)?;
        self.grandparent.hydrate(record)?;
        self.parent.hydrate(record)?;
        self.child.hydrate(record)?;

        match self.item_type {
            ItemType::Movie => assign(&mut self.child.tagline, string_field(record, "tagline")?),
            ItemType::Track => assign(&mut self.child.original_title, string_field(record, "originalTitle")?),
            _ => {}
        }
        Ok(())
    }
}

/// Tier-tagged item payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemData {
    Grandparent(GrandparentItem),
    Parent(ParentItem),
    Child(ChildItem),
}

impl ItemData {
    /// Empty payload of the tier `item_type` belongs to.
    pub fn new(item_type: ItemType) -> Self {
        match item_type.tier() {
            Tier::Grandparent => ItemData::Grandparent(GrandparentItem::new(item_type)),
            Tier::Parent => ItemData::Parent(ParentItem::new(item_type)),
            Tier::Child => ItemData::Child(ChildItem::new(item_type)),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            ItemData::Grandparent(item) => item.item_type,
            ItemData::Parent(item) => item.item_type,
            ItemData::Child(item) => item.item_type,
        }
    }

    pub fn tier(&self) -> Tier {
        self.item_type().tier()
    }

    pub fn common(&self) -> &CommonAttributes {
        match self {
            ItemData::Grandparent(item) => &item.common,
            ItemData::Parent(item) => &item.common,
            ItemData::Child(item) => &item.common,
        }
    }

    pub fn grandparent(&self) -> &GrandparentAttributes {
        match self {
            ItemData::Grandparent(item) => &item.grandparent,
            ItemData::Parent(item) => &item.grandparent,
            ItemData::Child(item) => &item.grandparent,
        }
    }

    /// Parent-tier fields, absent on grandparents.
    pub fn parent(&self) -> Option<&ParentAttributes> {
        match self {
            ItemData::Grandparent(_) => None,
            ItemData::Parent(item) => Some(&item.parent),
            ItemData::Child(item) => Some(&item.parent),
        }
    }

    pub fn child(&self) -> Option<&ChildAttributes> {
        match self {
            ItemData::Child(item) => Some(&item.child),
            _ => None,
        }
    }
}

impl Hydrate for ItemData {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        match self {
            ItemData::Grandparent(item) => item.hydrate(record),
            ItemData::Parent(item) => item.hydrate(record),
            ItemData::Child(item) => item.hydrate(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn episode_record() -> RawRecord {
        record(json!({
            "type": "episode",
            "ratingKey": "1203",
            "key": "/library/metadata/1203",
            "title": "Pilot",
            "index": 1,
            "parentRatingKey": 1202,
            "parentTitle": "Season 1",
            "parentIndex": "1",
            "grandparentRatingKey": 1201,
            "grandparentTitle": "The Show",
            "duration": 2_700_000,
            "viewCount": 2,
            "originallyAvailableAt": "2008-01-20",
            "Media": [
                {"id": 5, "container": "mp4", "Part": [{"id": 6, "file": "/tv/pilot.mp4"}]},
                {"id": 7, "container": "mkv"}
            ]
        }))
    }

    #[test]
    fn test_child_hydration_reads_every_tier() {
        let mut episode = ChildItem::new(ItemType::Episode);
        episode.hydrate(&episode_record()).unwrap();

        assert_eq!(episode.common.rating_key, Some(1203));
        assert_eq!(episode.common.title.as_deref(), Some("Pilot"));
        assert_eq!(episode.parent.parent_rating_key, Some(1202));
        assert_eq!(episode.parent.parent_index, Some(1));
        assert_eq!(episode.child.grandparent_title.as_deref(), Some("The Show"));
        assert_eq!(episode.child.view_count, Some(2));
        assert!(episode.parent.originally_available_at.is_some());
        assert_eq!(episode.child.media.len(), 2);
        assert_eq!(episode.child.media[0].files.len(), 1);
        assert!(episode.child.media[1].files.is_empty());
    }

    #[test]
    fn test_hydration_is_idempotent() {
        let raw = episode_record();
        let mut once = ChildItem::new(ItemType::Episode);
        once.hydrate(&raw).unwrap();
        let mut twice = once.clone();
        twice.hydrate(&raw).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.child.media.len(), 2);
    }

    #[test]
    fn test_partial_hydration_accumulates() {
        let mut track = ChildItem::new(ItemType::Track);
        track.hydrate(&record(json!({"title": "A"}))).unwrap();
        track.hydrate(&record(json!({"originalTitle": "B"}))).unwrap();

        assert_eq!(track.common.title.as_deref(), Some("A"));
        assert_eq!(track.child.original_title.as_deref(), Some("B"));
    }

    #[test]
    fn test_type_specific_fields_are_gated() {
        let raw = record(json!({"tagline": "In space...", "originalTitle": "Someone"}));

        let mut movie = ChildItem::new(ItemType::Movie);
        movie.hydrate(&raw).unwrap();
        assert_eq!(movie.child.tagline.as_deref(), Some("In space..."));
        assert_eq!(movie.child.original_title, None);

        let mut episode = ChildItem::new(ItemType::Episode);
        episode.hydrate(&raw).unwrap();
        assert_eq!(episode.child.tagline, None);
    }

    #[test]
    fn test_grandparent_ignores_parent_fields() {
        let mut show = GrandparentItem::new(ItemType::Show);
        show.hydrate(&record(json!({
            "title": "The Show",
            "leafCount": "24",
            "viewedLeafCount": 3,
            "year": 2008,
            "rating": "8.9",
            "contentRating": "TV-14",
            "parentKey": "/library/metadata/1",
            "parentTitle": "nope"
        })))
        .unwrap();

        assert_eq!(show.grandparent.leaf_count, Some(24));
        assert_eq!(show.grandparent.rating, Some(8.9));

        let data = ItemData::Grandparent(show);
        assert!(data.parent().is_none());
        assert!(data.child().is_none());
    }

    #[test]
    fn test_malformed_value_names_field() {
        let mut season = ParentItem::new(ItemType::Season);
        let err = season
            .hydrate(&record(json!({"parentIndex": "first"})))
            .unwrap_err();
        assert_eq!(
            err,
            AttributeError::Malformed {
                field: "parentIndex".to_string(),
                value: "first".to_string(),
            }
        );
    }

    #[test]
    fn test_item_data_new_picks_tier() {
        assert_eq!(ItemData::new(ItemType::Album).tier(), Tier::Parent);
        assert_eq!(ItemData::new(ItemType::Artist).tier(), Tier::Grandparent);
        assert_eq!(ItemData::new(ItemType::Photo).tier(), Tier::Child);
    }

    #[test]
    fn test_media_absent_keeps_previous_media() {
        let mut movie = ChildItem::new(ItemType::Movie);
        movie.hydrate(&record(json!({"Media": [{"id": 1}]}))).unwrap();
        movie.hydrate(&record(json!({"title": "Later"}))).unwrap();
        assert_eq!(movie.child.media.len(), 1);
    }
}
