//! Work item type repository implementation using SeaORM

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::debug;
use uuid::Uuid;
use wit_core::{FieldDefinition, WorkItemType};
use wit_interfaces::{CreateWorkItemType, DatabaseError, WorkItemTypeRepository};

use super::db_error;
use crate::extension::inherit_fields;
use crate::seaorm::entities::{work_item_types, WorkItemTypes};

#[derive(Clone)]
pub struct SeaOrmWorkItemTypeRepository {
    txn: Arc<DatabaseTransaction>,
}

impl SeaOrmWorkItemTypeRepository {
    pub fn new(txn: Arc<DatabaseTransaction>) -> Self {
        Self { txn }
    }

    fn to_domain(model: work_item_types::Model) -> Result<WorkItemType, DatabaseError> {
        let fields: BTreeMap<String, FieldDefinition> =
            serde_json::from_value(model.fields).map_err(|e| DatabaseError::Internal {
                message: format!("Stored fields of work item type {} are invalid: {}", model.id, e),
            })?;

        Ok(WorkItemType {
            id: model.id,
            space_id: model.space_id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            version: model.version,
            extended_type_name: model.extended_type_name,
            fields,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<work_item_types::Model>, DatabaseError> {
        WorkItemTypes::find_by_id(id)
            .one(self.txn.as_ref())
            .await
            .map_err(|e| db_error("find work item type", e))
    }
}

#[async_trait]
impl WorkItemTypeRepository for SeaOrmWorkItemTypeRepository {
    async fn load(&self, space_id: Uuid, id: Uuid) -> Result<WorkItemType, DatabaseError> {
        let model = WorkItemTypes::find_by_id(id)
            .filter(work_item_types::Column::SpaceId.eq(space_id))
            .one(self.txn.as_ref())
            .await
            .map_err(|e| db_error("load work item type", e))?
            .ok_or_else(|| DatabaseError::not_found("work item type", id))?;

        Self::to_domain(model)
    }

    async fn create(&self, request: CreateWorkItemType) -> Result<WorkItemType, DatabaseError> {
        let id = request.id.unwrap_or_else(Uuid::new_v4);
        if self.find(id).await?.is_some() {
            return Err(DatabaseError::Constraint {
                message: format!("work item type {} already exists", id),
            });
        }

        let mut fields = request.fields;
        if let Some(base_id) = request.extended_type_name {
            let base = self.find(base_id).await?.ok_or_else(|| DatabaseError::Validation {
                message: format!("extended type {} does not exist", base_id),
            })?;
            inherit_fields(&mut fields, base_id, Self::to_domain(base)?.fields)?;
        }

        let fields = serde_json::to_value(&fields).map_err(|e| DatabaseError::Internal {
            message: format!("Failed to serialize fields: {}", e),
        })?;

        let now = Utc::now();
        let active_model = work_item_types::ActiveModel {
            id: Set(id),
            space_id: Set(request.space_id),
            name: Set(request.name),
            description: Set(request.description),
            icon: Set(request.icon),
            version: Set(0),
            extended_type_name: Set(request.extended_type_name),
            fields: Set(fields),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = active_model
            .insert(self.txn.as_ref())
            .await
            .map_err(|e| db_error("create work item type", e))?;

        debug!(work_item_type_id = %inserted.id, space_id = %inserted.space_id, "Created work item type");
        Self::to_domain(inserted)
    }

    async fn list(
        &self,
        space_id: Uuid,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<WorkItemType>, DatabaseError> {
        let models = WorkItemTypes::find()
            .filter(work_item_types::Column::SpaceId.eq(space_id))
            .order_by_asc(work_item_types::Column::CreatedAt)
            .order_by_asc(work_item_types::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.txn.as_ref())
            .await
            .map_err(|e| db_error("list work item types", e))?;

        models.into_iter().map(Self::to_domain).collect()
    }
}
