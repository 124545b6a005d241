//! Storage backends for spaces and work item types
//!
//! Two interchangeable implementations of the repository and transaction
//! interfaces are provided:
//!
//! - [`seaorm`]: SQLite through SeaORM, used by the server
//! - [`memory`]: a process-local store with snapshot transactions, used for
//!   tests and throwaway instances
//!
//! [`seed::ensure_system_types`] populates either backend with the built-in
//! system space and work item types.

pub mod extension;
pub mod memory;
pub mod seaorm;
pub mod seed;

pub use memory::InMemoryDatabase;
pub use seaorm::{DatabaseConfig, DatabaseConnection, SeaOrmDatabase, StorageError};
pub use seed::ensure_system_types;
