//! HTTP handlers

pub mod apps;
pub mod health;
pub mod work_item_types;

pub use health::{health_check, readiness_check};
pub use work_item_types::{create_work_item_type, list_work_item_types, show_work_item_type};

use uuid::Uuid;

use crate::errors::{RestError, RestResult};

/// Parse a path segment as a UUID, naming the parameter on failure
pub(crate) fn parse_id(name: &str, raw: &str) -> RestResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| RestError::bad_parameter(format!("{} must be a UUID, got '{}'", name, raw)))
}
