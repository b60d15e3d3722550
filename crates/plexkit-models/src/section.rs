use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::hydrate::Hydrate;
use crate::record::{assign, bool_field, datetime_field, key_field, string_field, RawRecord};

/// Attributes of a library section as listed under `library/sections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAttributes {
    pub key: Option<u64>,
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub art: Option<String>,
    pub thumb: Option<String>,
    pub composite: Option<String>,
    pub agent: Option<String>,
    pub scanner: Option<String>,
    pub language: Option<String>,
    pub refreshing: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub scanned_at: Option<DateTime<Utc>>,
}

impl Hydrate for SectionAttributes {
    fn hydrate(&mut self, record: &RawRecord) -> Result<(), AttributeError> {
        assign(&mut self.key, key_field(record, "key")?);
        assign(&mut self.uuid, string_field(record, "uuid")?);
        assign(&mut self.title, string_field(record, "title")?);
        assign(&mut self.art, string_field(record, "art")?);
        assign(&mut self.thumb, string_field(record, "thumb")?);
        assign(&mut self.composite, string_field(record, "composite")?);
        assign(&mut self.agent, string_field(record, "agent")?);
        assign(&mut self.scanner, string_field(record, "scanner")?);
        assign(&mut self.language, string_field(record, "language")?);
        assign(&mut self.refreshing, bool_field(record, "refreshing")?);
        assign(&mut self.created_at, datetime_field(record, "createdAt")?);
        assign(&mut self.updated_at, datetime_field(record, "updatedAt")?);
        assign(&mut self.scanned_at, datetime_field(record, "scannedAt")?);
        Ok(())
    }
}
