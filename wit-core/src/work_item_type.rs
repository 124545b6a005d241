//! Work item type domain model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::FieldDefinition;

/// A schema describing the fields of a kind of work item.
///
/// Field names are the keys of `fields`, so they are unique within a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemType {
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub version: i32,
    /// Id of the type whose fields this type inherits
    pub extended_type_name: Option<Uuid>,
    pub fields: BTreeMap<String, FieldDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkItemType {
    /// A validator that changes whenever the stored representation changes
    pub fn cache_validator(&self) -> String {
        format!("{}:{}:{}", self.id, self.version, self.updated_at.timestamp_micros())
    }
}
