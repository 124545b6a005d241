use super::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection as SeaConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wit_interfaces::DatabaseError;

/// Database connection wrapper with configuration
#[derive(Clone)]
pub struct DatabaseConnection {
    connection: SeaConnection,
    config: DatabaseConfig,
}

/// Errors raised while opening or migrating the store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DbError(#[from] DbErr),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for DatabaseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DbError(e) => DatabaseError::Connection { message: e.to_string() },
            other => DatabaseError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl DatabaseConnection {
    /// Create a new database connection with configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, StorageError> {
        info!("Connecting to database: {}", config.url);

        Self::ensure_sqlite_file_exists(&config.url)?;

        let max_connections = if config.is_in_memory() { 1 } else { config.max_connections };

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(config.connection_timeout)
            .acquire_timeout(config.connection_timeout)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        // an in-memory database lives only as long as its single connection
        if config.is_in_memory() {
            let year = Duration::from_secs(60 * 60 * 24 * 365);
            opts.idle_timeout(year).max_lifetime(year);
        } else {
            opts.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(3600));
        }

        let connection = Database::connect(opts).await?;

        debug!("Database connection established with {} max connections", max_connections);

        Ok(Self { connection, config })
    }

    /// Ensure the parent directory of a file-based SQLite database exists
    fn ensure_sqlite_file_exists(database_url: &str) -> Result<(), StorageError> {
        if !database_url.starts_with("sqlite:") {
            debug!("Non-SQLite database detected, skipping file creation logic");
            return Ok(());
        }
        if database_url.contains(":memory:") {
            debug!("Using in-memory SQLite database");
            return Ok(());
        }

        let file_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .ok_or_else(|| StorageError::ConfigError(format!("Invalid SQLite URL format: {}", database_url)))?;
        // query parameters such as ?mode=rwc are not part of the path
        let file_path = file_path.split('?').next().unwrap_or(file_path);

        let path = Path::new(file_path);
        if let Some(parent_dir) = path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                info!("Creating database directory: {:?}", parent_dir);
                std::fs::create_dir_all(parent_dir).map_err(|e| {
                    StorageError::ConfigError(format!("Failed to create database directory {:?}: {}", parent_dir, e))
                })?;
            }
        }

        if path.exists() {
            debug!("Using existing database file: {:?}", path);
        } else {
            info!("Database file will be created by SQLite: {:?}", path);
        }

        Ok(())
    }

    /// Get the underlying Sea-ORM connection
    pub fn get_connection(&self) -> &SeaConnection {
        &self.connection
    }

    /// Get database configuration
    pub fn get_config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");

        super::migrations::Migrator::up(&self.connection, None)
            .await
            .map_err(|e| StorageError::MigrationError(e.to_string()))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.connection.ping().await.map_err(|e| {
            debug!("Database ping failed: {}", e);
            StorageError::DbError(e)
        })
    }

    /// Close the database connection
    pub async fn close(self) -> Result<(), StorageError> {
        info!("Closing database connection");
        self.connection.close().await?;
        Ok(())
    }
}
