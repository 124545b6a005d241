//! # Interfaces
//!
//! Contracts shared between the storage backends, the REST handlers and the
//! server wiring. Handlers only ever see these traits, which keeps them
//! testable against the in-memory backend or mocks.
//!
//! ## Main Interfaces
//!
//! - [`TransactionManager`] - opens request-scoped units of work
//! - [`Application`] - the repositories reachable inside a unit of work
//! - [`DeploymentsService`] - the deployment platform behind the apps facade

pub mod database;
pub mod deployments;

pub use database::{
    transactional, Application, BoxFuture, CreateWorkItemType, DatabaseError, SpaceRepository, Transaction,
    TransactionManager, WorkItemTypeRepository,
};
pub use deployments::{DeploymentsError, DeploymentsService, StatSeriesQuery, UnavailableDeployments};
