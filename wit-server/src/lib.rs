//! Work item type service
//!
//! Wires configuration, logging, storage and the REST router into a runnable
//! server.

pub mod services;
pub mod startup;

pub use services::ServiceContainer;
pub use startup::Server;
