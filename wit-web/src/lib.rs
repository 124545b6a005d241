//! # Web Utilities
//!
//! Shared HTTP plumbing for the work item type API, built on Axum.
//!
//! - **Errors**: [`WebError`] renders the JSON:API error document
//! - **Middleware**: bearer token authentication, request ids, CORS
//! - **Extractors**: [`Identity`], [`Page`], [`ConditionalRequest`]
//! - **Utilities**: absolute link building

pub mod conditional;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod utils;

pub use conditional::{ConditionalRequest, Validators};
pub use errors::WebError;
pub use extractors::{Identity, Page, DEFAULT_PAGE_LIMIT};
pub use middleware::{
    auth_middleware, cors_layer, handle_not_found, request_id_middleware, require_authenticated, AuthContext,
    JwtClaims, JwtManager, RequestId, REQUEST_ID_HEADER,
};
pub use utils::{absolute_url, JSONAPI_CONTENT_TYPE};
