//! Request-scoped SeaORM transactions

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;
use wit_interfaces::{
    Application, DatabaseError, SpaceRepository, Transaction, TransactionManager, WorkItemTypeRepository,
};

use super::connection::DatabaseConnection;
use super::repositories::{SeaOrmSpaceRepository, SeaOrmWorkItemTypeRepository};

/// [`TransactionManager`] over a SeaORM connection pool
#[derive(Clone)]
pub struct SeaOrmDatabase {
    db: DatabaseConnection,
}

impl SeaOrmDatabase {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionManager for SeaOrmDatabase {
    async fn begin(&self) -> Result<Box<dyn Transaction>, DatabaseError> {
        let txn = self
            .db
            .get_connection()
            .begin()
            .await
            .map_err(|e| DatabaseError::Transaction {
                message: format!("Failed to begin transaction: {}", e),
            })?;
        Ok(Box::new(SeaOrmTransaction::new(txn)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.ping().await.map_err(DatabaseError::from)
    }
}

/// Repositories sharing one open database transaction
pub struct SeaOrmTransaction {
    txn: Arc<DatabaseTransaction>,
    work_item_types: SeaOrmWorkItemTypeRepository,
    spaces: SeaOrmSpaceRepository,
}

impl SeaOrmTransaction {
    fn new(txn: DatabaseTransaction) -> Self {
        let txn = Arc::new(txn);
        Self {
            work_item_types: SeaOrmWorkItemTypeRepository::new(txn.clone()),
            spaces: SeaOrmSpaceRepository::new(txn.clone()),
            txn,
        }
    }

    /// Release the repositories and take back sole ownership of the transaction
    fn into_inner(self) -> Result<DatabaseTransaction, DatabaseError> {
        let SeaOrmTransaction {
            txn,
            work_item_types,
            spaces,
        } = self;
        drop(work_item_types);
        drop(spaces);

        Arc::try_unwrap(txn).map_err(|_| DatabaseError::Transaction {
            message: "transaction is still referenced by a repository".to_string(),
        })
    }
}

impl Application for SeaOrmTransaction {
    fn work_item_types(&self) -> &dyn WorkItemTypeRepository {
        &self.work_item_types
    }

    fn spaces(&self) -> &dyn SpaceRepository {
        &self.spaces
    }
}

#[async_trait]
impl Transaction for SeaOrmTransaction {
    fn application(&self) -> &dyn Application {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), DatabaseError> {
        (*self).into_inner()?.commit().await.map_err(|e| DatabaseError::Transaction {
            message: format!("Failed to commit transaction: {}", e),
        })?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError> {
        (*self).into_inner()?.rollback().await.map_err(|e| DatabaseError::Transaction {
            message: format!("Failed to roll back transaction: {}", e),
        })?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
