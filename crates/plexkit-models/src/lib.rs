pub mod error;
pub mod hydrate;
pub mod item;
pub mod kind;
pub mod media;
pub mod record;
pub mod section;

pub use error::{AttributeError, UnknownKind};
pub use hydrate::Hydrate;
pub use item::{
    ChildAttributes, ChildItem, CommonAttributes, GrandparentAttributes, GrandparentItem, ItemData,
    ParentAttributes, ParentItem,
};
pub use kind::{ItemType, SectionType, Tier};
pub use media::{Media, MediaFile};
pub use record::RawRecord;
pub use section::SectionAttributes;
