//! Long-lived services shared by all requests

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use wit_config::{DatabaseBackend, WitConfig};
use wit_interfaces::{DeploymentsService, TransactionManager, UnavailableDeployments};
use wit_storage::{ensure_system_types, InMemoryDatabase, SeaOrmDatabase};
use wit_web::JwtManager;

pub struct ServiceContainer {
    pub database: Arc<dyn TransactionManager>,
    pub deployments: Arc<dyn DeploymentsService>,
    pub jwt: Arc<JwtManager>,
}

impl ServiceContainer {
    /// Open the configured store and seed the system types
    pub async fn new(config: &WitConfig) -> Result<Self> {
        let database = open_database(config).await?;
        ensure_system_types(database.as_ref())
            .await
            .context("Failed to seed system work item types")?;

        Ok(Self {
            database,
            deployments: Arc::new(UnavailableDeployments),
            jwt: Arc::new(JwtManager::new(config.auth.clone())),
        })
    }
}

async fn open_database(config: &WitConfig) -> Result<Arc<dyn TransactionManager>> {
    match config.database.backend {
        DatabaseBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(InMemoryDatabase::new()))
        }
        DatabaseBackend::Sqlite => {
            let storage_config = wit_storage::DatabaseConfig {
                url: config.database.url.clone(),
                max_connections: config.database.max_connections,
                connection_timeout: config.database.connection_timeout,
            };
            let connection = wit_storage::DatabaseConnection::new(storage_config)
                .await
                .context("Failed to connect to database")?;
            connection.migrate().await.context("Failed to run database migrations")?;
            Ok(Arc::new(SeaOrmDatabase::new(connection)))
        }
    }
}
