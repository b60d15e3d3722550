//! Typed items bound to the server they were fetched from.
//!
//! Navigation only exists where the hierarchy has something below:
//! grandparents list children and leaves, parents list children, and
//! children have no navigation at all.

use std::sync::Arc;

use plexkit_models::{
    ChildItem, CommonAttributes, GrandparentItem, Hydrate, ItemData, ItemType, ParentItem, RawRecord, Tier,
};
use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::endpoint;
use crate::error::{LibraryError, Result};
use crate::library;
use crate::resolve::{resolve, Entity, Selector};
use crate::server::Server;

/// Any library item.
#[derive(Debug, Clone)]
pub enum Item {
    Grandparent(Grandparent),
    Parent(Parent),
    Child(Child),
}

impl Item {
    /// Empty item of the tier `item_type` belongs to.
    pub fn new(server: Arc<Server>, item_type: ItemType) -> Self {
        Self::from_data(server, ItemData::new(item_type))
    }

    pub fn from_data(server: Arc<Server>, data: ItemData) -> Self {
        match data {
            ItemData::Grandparent(data) => Item::Grandparent(Grandparent { server, data }),
            ItemData::Parent(data) => Item::Parent(Parent { server, data }),
            ItemData::Child(data) => Item::Child(Child { server, data }),
        }
    }

    pub fn hydrate(&mut self, record: &RawRecord) -> Result<()> {
        match self {
            Item::Grandparent(item) => item.data.hydrate(record)?,
            Item::Parent(item) => item.data.hydrate(record)?,
            Item::Child(item) => item.data.hydrate(record)?,
        }
        Ok(())
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Grandparent(item) => item.data.item_type,
            Item::Parent(item) => item.data.item_type,
            Item::Child(item) => item.data.item_type,
        }
    }

    pub fn tier(&self) -> Tier {
        self.item_type().tier()
    }

    pub fn common(&self) -> &CommonAttributes {
        match self {
            Item::Grandparent(item) => &item.data.common,
            Item::Parent(item) => &item.data.common,
            Item::Child(item) => &item.data.common,
        }
    }

    pub fn rating_key(&self) -> Option<u64> {
        self.common().rating_key
    }

    /// Copy of the payload, detached from the server.
    pub fn to_data(&self) -> ItemData {
        match self {
            Item::Grandparent(item) => ItemData::Grandparent(item.data.clone()),
            Item::Parent(item) => ItemData::Parent(item.data.clone()),
            Item::Child(item) => ItemData::Child(item.data.clone()),
        }
    }

    /// `/library/metadata/{ratingKey}`.
    pub fn metadata_path(&self) -> Result<String> {
        Ok(endpoint::metadata_path(required_key(self)?))
    }

    pub fn into_grandparent(self) -> Option<Grandparent> {
        match self {
            Item::Grandparent(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_parent(self) -> Option<Parent> {
        match self {
            Item::Parent(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_child(self) -> Option<Child> {
        match self {
            Item::Child(item) => Some(item),
            _ => None,
        }
    }
}

impl Entity for Item {
    fn key(&self) -> Option<u64> {
        self.rating_key()
    }

    fn title(&self) -> Option<&str> {
        self.common().title.as_deref()
    }

    fn kind(&self) -> &'static str {
        self.item_type().as_str()
    }

    fn server(&self) -> &Arc<Server> {
        match self {
            Item::Grandparent(item) => &item.server,
            Item::Parent(item) => &item.server,
            Item::Child(item) => &item.server,
        }
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Item::Grandparent(item) => item.data.serialize(serializer),
            Item::Parent(item) => item.data.serialize(serializer),
            Item::Child(item) => item.data.serialize(serializer),
        }
    }
}

fn required_key<E: Entity + ?Sized>(entity: &E) -> Result<u64> {
    entity.key().ok_or_else(|| LibraryError::MissingKey {
        kind: entity.kind().to_string(),
    })
}

/// Name of the kind one level down, or the item's own kind when there is none.
fn below(item_type: ItemType, next: Option<ItemType>) -> &'static str {
    next.map(|t| t.as_str()).unwrap_or(item_type.as_str())
}

/// Show or artist.
#[derive(Debug, Clone)]
pub struct Grandparent {
    server: Arc<Server>,
    data: GrandparentItem,
}

impl Grandparent {
    pub fn data(&self) -> &GrandparentItem {
        &self.data
    }

    pub fn into_data(self) -> GrandparentItem {
        self.data
    }

    pub fn item_type(&self) -> ItemType {
        self.data.item_type
    }

    pub fn children_endpoint(&self) -> Result<String> {
        Ok(endpoint::children_endpoint(required_key(self)?))
    }

    pub fn all_leaves_endpoint(&self) -> Result<String> {
        Ok(endpoint::all_leaves_endpoint(required_key(self)?))
    }

    /// Seasons of a show, albums of an artist.
    pub fn children(&self) -> Result<Vec<Item>> {
        library::get_items(&self.server, &self.children_endpoint()?)
    }

    pub fn child(&self, selector: impl Into<Selector>) -> Result<Item> {
        let kind = below(self.item_type(), self.item_type().child_type());
        resolve(kind, || self.children(), &selector.into())
    }

    /// Every episode of a show, every track of an artist.
    pub fn all_leaves(&self) -> Result<Vec<Child>> {
        let items = library::get_items(&self.server, &self.all_leaves_endpoint()?)?;
        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Item::Child(child) => Some(child),
                other => {
                    warn!("skipping non-leaf {} in allLeaves of {:?}", other.item_type(), self.key());
                    None
                }
            })
            .collect())
    }

    pub fn leaf(&self, selector: impl Into<Selector>) -> Result<Child> {
        let kind = below(self.item_type(), self.item_type().leaf_type());
        resolve(kind, || self.all_leaves(), &selector.into())
    }

    /// Uniformly random leaf.
    pub fn random_leaf(&self) -> Result<Child> {
        let mut leaves = self.all_leaves()?;
        if leaves.is_empty() {
            let kind = below(self.item_type(), self.item_type().leaf_type());
            return Err(LibraryError::EmptyCollection { kind: kind.to_string() });
        }
        let index = rand::thread_rng().gen_range(0..leaves.len());
        debug!("picked leaf {} of {}", index, leaves.len());
        Ok(leaves.swap_remove(index))
    }
}

impl Entity for Grandparent {
    fn key(&self) -> Option<u64> {
        self.data.common.rating_key
    }

    fn title(&self) -> Option<&str> {
        self.data.common.title.as_deref()
    }

    fn kind(&self) -> &'static str {
        self.data.item_type.as_str()
    }

    fn server(&self) -> &Arc<Server> {
        &self.server
    }
}

/// Season or album.
#[derive(Debug, Clone)]
pub struct Parent {
    server: Arc<Server>,
    data: ParentItem,
}

impl Parent {
    pub fn data(&self) -> &ParentItem {
        &self.data
    }

    pub fn into_data(self) -> ParentItem {
        self.data
    }

    pub fn item_type(&self) -> ItemType {
        self.data.item_type
    }

    pub fn children_endpoint(&self) -> Result<String> {
        Ok(endpoint::children_endpoint(required_key(self)?))
    }

    /// Episodes of a season, tracks of an album.
    pub fn children(&self) -> Result<Vec<Item>> {
        library::get_items(&self.server, &self.children_endpoint()?)
    }

    pub fn child(&self, selector: impl Into<Selector>) -> Result<Item> {
        let kind = below(self.item_type(), self.item_type().child_type());
        resolve(kind, || self.children(), &selector.into())
    }
}

impl Entity for Parent {
    fn key(&self) -> Option<u64> {
        self.data.common.rating_key
    }

    fn title(&self) -> Option<&str> {
        self.data.common.title.as_deref()
    }

    fn kind(&self) -> &'static str {
        self.data.item_type.as_str()
    }

    fn server(&self) -> &Arc<Server> {
        &self.server
    }
}

/// Movie, episode, track or photo.
#[derive(Debug, Clone)]
pub struct Child {
    server: Arc<Server>,
    data: ChildItem,
}

impl Child {
    pub fn data(&self) -> &ChildItem {
        &self.data
    }

    pub fn into_data(self) -> ChildItem {
        self.data
    }

    pub fn item_type(&self) -> ItemType {
        self.data.item_type
    }
}

impl Entity for Child {
    fn key(&self) -> Option<u64> {
        self.data.common.rating_key
    }

    fn title(&self) -> Option<&str> {
        self.data.common.title.as_deref()
    }

    fn kind(&self) -> &'static str {
        self.data.item_type.as_str()
    }

    fn server(&self) -> &Arc<Server> {
        &self.server
    }
}

impl From<Child> for Item {
    fn from(child: Child) -> Self {
        Item::Child(child)
    }
}

impl Serialize for Child {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}
