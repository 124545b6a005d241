//! Database repository interfaces
//!
//! Every request runs inside one unit of work: a [`Transaction`] opened by a
//! [`TransactionManager`], exposing the repositories through [`Application`],
//! committed when the work succeeds and rolled back when it fails. The
//! [`transactional`] helper encodes that contract so handlers never commit or
//! roll back by hand.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;
use wit_core::{FieldDefinition, Space, WorkItemType};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Transaction error: {message}")]
    Transaction { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Everything needed to persist a new work item type
#[derive(Debug, Clone)]
pub struct CreateWorkItemType {
    pub space_id: Uuid,
    /// Client supplied id; a fresh one is generated when absent
    pub id: Option<Uuid>,
    pub extended_type_name: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub fields: BTreeMap<String, FieldDefinition>,
}

#[async_trait]
pub trait WorkItemTypeRepository: Send + Sync {
    /// Load a type by its composite key
    async fn load(&self, space_id: Uuid, id: Uuid) -> Result<WorkItemType, DatabaseError>;

    /// Persist a new type.
    ///
    /// When `extended_type_name` is set, the base type's fields are merged in;
    /// a field defined by both is a validation error.
    async fn create(&self, request: CreateWorkItemType) -> Result<WorkItemType, DatabaseError>;

    /// Types of a space ordered by creation time
    async fn list(
        &self,
        space_id: Uuid,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<WorkItemType>, DatabaseError>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Space, DatabaseError>;

    async fn create(&self, space: Space) -> Result<Space, DatabaseError>;
}

/// Repositories bound to one unit of work
pub trait Application: Send + Sync {
    fn work_item_types(&self) -> &dyn WorkItemTypeRepository;

    fn spaces(&self) -> &dyn SpaceRepository;
}

/// An open unit of work
#[async_trait]
pub trait Transaction: Send + Sync {
    fn application(&self) -> &dyn Application;

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError>;

    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError>;
}

/// Transaction manager for atomic operations across repositories
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Begin a new transaction
    async fn begin(&self) -> Result<Box<dyn Transaction>, DatabaseError>;

    /// Check the backing store can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Run `work` inside a fresh transaction.
///
/// Commits when `work` returns `Ok`, rolls back when it returns `Err`. A failed
/// rollback is logged and the original error is returned.
pub async fn transactional<T, E, F>(db: &dyn TransactionManager, work: F) -> Result<T, E>
where
    F: for<'a> FnOnce(&'a dyn Application) -> BoxFuture<'a, Result<T, E>>,
    E: From<DatabaseError>,
{
    let tx = db.begin().await?;
    let result = work(tx.application()).await;

    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
