use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKind;

/// Position of an item type in the library hierarchy.
///
/// Shows and artists sit at the top, seasons and albums in the middle, and
/// everything that can actually be played (episodes, tracks, movies, photos)
/// is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Grandparent,
    Parent,
    Child,
}

/// Item type discriminator as reported in the `type` field of a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Movie,
    Show,
    Season,
    Episode,
    Artist,
    Album,
    Track,
    Photo,
}

impl ItemType {
    pub const ALL: [ItemType; 8] = [
        ItemType::Movie,
        ItemType::Show,
        ItemType::Season,
        ItemType::Episode,
        ItemType::Artist,
        ItemType::Album,
        ItemType::Track,
        ItemType::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Movie => "movie",
            ItemType::Show => "show",
            ItemType::Season => "season",
            ItemType::Episode => "episode",
            ItemType::Artist => "artist",
            ItemType::Album => "album",
            ItemType::Track => "track",
            ItemType::Photo => "photo",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            ItemType::Show | ItemType::Artist => Tier::Grandparent,
            ItemType::Season | ItemType::Album => Tier::Parent,
            ItemType::Movie | ItemType::Episode | ItemType::Track | ItemType::Photo => Tier::Child,
        }
    }

    /// Type of the direct children (`show` -> `season`, `album` -> `track`).
    pub fn child_type(&self) -> Option<ItemType> {
        match self {
            ItemType::Show => Some(ItemType::Season),
            ItemType::Season => Some(ItemType::Episode),
            ItemType::Artist => Some(ItemType::Album),
            ItemType::Album => Some(ItemType::Track),
            _ => None,
        }
    }

    /// Type of the leaves reached through `allLeaves`.
    pub fn leaf_type(&self) -> Option<ItemType> {
        match self {
            ItemType::Show => Some(ItemType::Episode),
            ItemType::Artist => Some(ItemType::Track),
            _ => None,
        }
    }

    /// Numeric type code used by the section `search` and filtered `all` endpoints.
    pub fn search_type(&self) -> u8 {
        match self {
            ItemType::Movie => 1,
            ItemType::Show => 2,
            ItemType::Season => 3,
            ItemType::Episode => 4,
            ItemType::Artist => 8,
            ItemType::Album => 9,
            ItemType::Track => 10,
            ItemType::Photo => 13,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ItemType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Content type a library section is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Movie,
    Show,
    Artist,
    Photo,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::Movie,
        SectionType::Show,
        SectionType::Artist,
        SectionType::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Movie => "movie",
            SectionType::Show => "show",
            SectionType::Artist => "artist",
            SectionType::Photo => "photo",
        }
    }

    /// Item type returned by the section's `all` listing.
    pub fn root_item_type(&self) -> ItemType {
        match self {
            SectionType::Movie => ItemType::Movie,
            SectionType::Show => ItemType::Show,
            SectionType::Artist => ItemType::Artist,
            SectionType::Photo => ItemType::Photo,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        SectionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parse_is_case_insensitive() {
        assert_eq!("Episode".parse::<ItemType>().unwrap(), ItemType::Episode);
        assert_eq!(" TRACK ".parse::<ItemType>().unwrap(), ItemType::Track);
    }

    #[test]
    fn test_item_type_parse_unknown() {
        let err = "podcast".parse::<ItemType>().unwrap_err();
        assert_eq!(err, UnknownKind("podcast".to_string()));
    }

    #[test]
    fn test_every_item_type_has_exactly_one_tier() {
        let grandparents: Vec<_> = ItemType::ALL.iter().filter(|t| t.tier() == Tier::Grandparent).collect();
        let parents: Vec<_> = ItemType::ALL.iter().filter(|t| t.tier() == Tier::Parent).collect();
        let children: Vec<_> = ItemType::ALL.iter().filter(|t| t.tier() == Tier::Child).collect();
        assert_eq!(grandparents, vec![&ItemType::Show, &ItemType::Artist]);
        assert_eq!(parents, vec![&ItemType::Season, &ItemType::Album]);
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn test_hierarchy_types() {
        assert_eq!(ItemType::Show.child_type(), Some(ItemType::Season));
        assert_eq!(ItemType::Album.child_type(), Some(ItemType::Track));
        assert_eq!(ItemType::Movie.child_type(), None);
        assert_eq!(ItemType::Artist.leaf_type(), Some(ItemType::Track));
        assert_eq!(ItemType::Season.leaf_type(), None);
    }

    #[test]
    fn test_section_type_parse() {
        assert_eq!("artist".parse::<SectionType>().unwrap(), SectionType::Artist);
        assert!("clip".parse::<SectionType>().is_err());
        assert_eq!(SectionType::Show.root_item_type(), ItemType::Show);
    }
}
