//! # REST API
//!
//! JSON:API endpoints for work item types, plus the `apps` facade over the
//! deployment platform.
//!
//! Handlers receive their collaborators through context structs
//! ([`WorkItemTypesContext`], [`AppsContext`]) so they can be exercised
//! against the in-memory store or mocks.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wit_rest_api::{create_rest_app, AppConfig, AppContext};
//! # fn build(ctx: AppContext, jwt: Arc<wit_web::JwtManager>) {
//! let app = create_rest_app(ctx, jwt, AppConfig::default());
//! # let _ = app;
//! # }
//! ```

pub mod app;
pub mod context;
pub mod convert;
pub mod errors;
pub mod handlers;
pub mod schema;

pub use app::{create_rest_app, AppConfig, AppContext};
pub use context::{AppsContext, CacheControlPolicy, WorkItemTypesContext};
pub use errors::{RestError, RestResult};
pub use schema::{AppsAction, ParamType, RouteSpec, APPS_BASE_PATH, APPS_ROUTES};
