//! Space domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level container owning work item types and applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Identity allowed to define work item types in this space
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Space {
    pub fn new(id: Uuid, name: impl Into<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_owned_by(&self, identity: Uuid) -> bool {
        self.owner_id == identity
    }
}
