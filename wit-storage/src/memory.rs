//! Process-local storage backend
//!
//! Transactions are serialized: `begin` takes the store lock and works on a
//! private copy of the state, which `commit` writes back and `rollback`
//! discards.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;
use wit_core::{Space, WorkItemType};
use wit_interfaces::{
    Application, CreateWorkItemType, DatabaseError, SpaceRepository, Transaction, TransactionManager,
    WorkItemTypeRepository,
};

use crate::extension::inherit_fields;

#[derive(Debug, Clone, Default)]
struct State {
    spaces: BTreeMap<Uuid, Space>,
    work_item_types: BTreeMap<Uuid, WorkItemType>,
}

#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<AsyncMutex<State>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionManager for InMemoryDatabase {
    async fn begin(&self) -> Result<Box<dyn Transaction>, DatabaseError> {
        let committed = self.state.clone().lock_owned().await;
        let working = Mutex::new(committed.clone());
        Ok(Box::new(InMemoryTransaction { committed, working }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub struct InMemoryTransaction {
    committed: OwnedMutexGuard<State>,
    working: Mutex<State>,
}

impl InMemoryTransaction {
    fn state(&self) -> Result<MutexGuard<'_, State>, DatabaseError> {
        self.working.lock().map_err(|_| DatabaseError::Transaction {
            message: "in-memory transaction state is poisoned".to_string(),
        })
    }
}

impl Application for InMemoryTransaction {
    fn work_item_types(&self) -> &dyn WorkItemTypeRepository {
        self
    }

    fn spaces(&self) -> &dyn SpaceRepository {
        self
    }
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    fn application(&self) -> &dyn Application {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        let InMemoryTransaction { mut committed, working } = *self;
        *committed = working.into_inner().map_err(|_| DatabaseError::Transaction {
            message: "in-memory transaction state is poisoned".to_string(),
        })?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl WorkItemTypeRepository for InMemoryTransaction {
    async fn load(&self, space_id: Uuid, id: Uuid) -> Result<WorkItemType, DatabaseError> {
        self.state()?
            .work_item_types
            .get(&id)
            .filter(|wit| wit.space_id == space_id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found("work item type", id))
    }

    async fn create(&self, request: CreateWorkItemType) -> Result<WorkItemType, DatabaseError> {
        let mut state = self.state()?;

        let id = request.id.unwrap_or_else(Uuid::new_v4);
        if state.work_item_types.contains_key(&id) {
            return Err(DatabaseError::Constraint {
                message: format!("work item type {} already exists", id),
            });
        }
        if !state.spaces.contains_key(&request.space_id) {
            return Err(DatabaseError::Constraint {
                message: format!("space {} does not exist", request.space_id),
            });
        }

        let mut fields = request.fields;
        if let Some(base_id) = request.extended_type_name {
            let base = state.work_item_types.get(&base_id).ok_or_else(|| DatabaseError::Validation {
                message: format!("extended type {} does not exist", base_id),
            })?;
            inherit_fields(&mut fields, base_id, base.fields.clone())?;
        }

        let now = Utc::now();
        let created = WorkItemType {
            id,
            space_id: request.space_id,
            name: request.name,
            description: request.description,
            icon: request.icon,
            version: 0,
            extended_type_name: request.extended_type_name,
            fields,
            created_at: now,
            updated_at: now,
        };
        state.work_item_types.insert(id, created.clone());
        Ok(created)
    }

    async fn list(
        &self,
        space_id: Uuid,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<WorkItemType>, DatabaseError> {
        let state = self.state()?;
        let mut types: Vec<WorkItemType> = state
            .work_item_types
            .values()
            .filter(|wit| wit.space_id == space_id)
            .cloned()
            .collect();
        types.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(types.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait]
impl SpaceRepository for InMemoryTransaction {
    async fn load(&self, id: Uuid) -> Result<Space, DatabaseError> {
        self.state()?
            .spaces
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found("space", id))
    }

    async fn create(&self, space: Space) -> Result<Space, DatabaseError> {
        let mut state = self.state()?;
        if state.spaces.contains_key(&space.id) {
            return Err(DatabaseError::Constraint {
                message: format!("space {} already exists", space.id),
            });
        }
        state.spaces.insert(space.id, space.clone());
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wit_interfaces::transactional;

    fn request(space_id: Uuid, name: &str) -> CreateWorkItemType {
        CreateWorkItemType {
            space_id,
            id: None,
            extended_type_name: None,
            name: name.to_string(),
            description: None,
            icon: String::new(),
            fields: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let db = InMemoryDatabase::new();
        let space = Space::new(Uuid::new_v4(), "demo", Uuid::new_v4());
        let space_id = space.id;

        let tx = db.begin().await.unwrap();
        tx.application().spaces().create(space).await.unwrap();
        tx.application().work_item_types().create(request(space_id, "Story")).await.unwrap();
        tx.commit().await.unwrap();

        let tx = db.begin().await.unwrap();
        let listed = tx.application().work_item_types().list(space_id, None, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Story");
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = InMemoryDatabase::new();
        let space_id = Uuid::new_v4();

        let failed: Result<(), DatabaseError> = transactional(&db, |app| {
            Box::pin(async move {
                app.spaces().create(Space::new(space_id, "demo", Uuid::nil())).await?;
                Err::<(), _>(DatabaseError::Validation {
                    message: "abort".to_string(),
                })
            })
        })
        .await;
        assert!(failed.is_err());

        let tx = db.begin().await.unwrap();
        assert!(tx.application().spaces().load(space_id).await.is_err());
    }

    #[tokio::test]
    async fn test_load_requires_matching_space() {
        let db = InMemoryDatabase::new();
        let space = Space::new(Uuid::new_v4(), "demo", Uuid::nil());
        let space_id = space.id;

        let tx = db.begin().await.unwrap();
        tx.application().spaces().create(space).await.unwrap();
        let created = tx.application().work_item_types().create(request(space_id, "Story")).await.unwrap();

        let repo = tx.application().work_item_types();
        assert!(repo.load(space_id, created.id).await.is_ok());
        let err = repo.load(Uuid::new_v4(), created.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_pages_in_creation_order() {
        let db = InMemoryDatabase::new();
        let space = Space::new(Uuid::new_v4(), "demo", Uuid::nil());
        let space_id = space.id;

        let tx = db.begin().await.unwrap();
        tx.application().spaces().create(space).await.unwrap();
        for name in ["a", "b", "c"] {
            tx.application().work_item_types().create(request(space_id, name)).await.unwrap();
        }

        let repo = tx.application().work_item_types();
        let all = repo.list(space_id, None, None).await.unwrap();
        let page = repo.list(space_id, Some(1), Some(1)).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, all[1].id);
    }
}
