pub mod auth;
pub mod cors;
pub mod error_handler;
pub mod request_id;

pub use auth::{auth_middleware, require_authenticated, AuthContext, JwtClaims, JwtManager};
pub use cors::cors_layer;
pub use error_handler::handle_not_found;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
