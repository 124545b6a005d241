//! SeaORM implementation of the storage layer
//!
//! This module provides the SQLite backend: entities, migrations,
//! repositories bound to a database transaction, and connection management.

pub mod config;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod transaction;

pub use config::DatabaseConfig;
pub use connection::{DatabaseConnection, StorageError};
pub use transaction::{SeaOrmDatabase, SeaOrmTransaction};
