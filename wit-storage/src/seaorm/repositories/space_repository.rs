//! Space repository implementation using SeaORM

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, Set};
use uuid::Uuid;
use wit_core::Space;
use wit_interfaces::{DatabaseError, SpaceRepository};

use super::db_error;
use crate::seaorm::entities::{spaces, Spaces};

#[derive(Clone)]
pub struct SeaOrmSpaceRepository {
    txn: Arc<DatabaseTransaction>,
}

impl SeaOrmSpaceRepository {
    pub fn new(txn: Arc<DatabaseTransaction>) -> Self {
        Self { txn }
    }

    fn to_domain(model: spaces::Model) -> Space {
        Space {
            id: model.id,
            name: model.name,
            description: model.description,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl SpaceRepository for SeaOrmSpaceRepository {
    async fn load(&self, id: Uuid) -> Result<Space, DatabaseError> {
        Spaces::find_by_id(id)
            .one(self.txn.as_ref())
            .await
            .map_err(|e| db_error("load space", e))?
            .map(Self::to_domain)
            .ok_or_else(|| DatabaseError::not_found("space", id))
    }

    async fn create(&self, space: Space) -> Result<Space, DatabaseError> {
        let active_model = spaces::ActiveModel {
            id: Set(space.id),
            name: Set(space.name),
            description: Set(space.description),
            owner_id: Set(space.owner_id),
            created_at: Set(space.created_at),
            updated_at: Set(space.updated_at),
        };

        let inserted = active_model
            .insert(self.txn.as_ref())
            .await
            .map_err(|e| db_error("create space", e))?;

        Ok(Self::to_domain(inserted))
    }
}
