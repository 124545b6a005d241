//! `Cache-Control` values sent with work item type responses

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheControlConfig {
    /// Single work item type
    pub work_item_type: String,

    /// Work item type lists
    pub work_item_types: String,
}

impl Default for CacheControlConfig {
    fn default() -> Self {
        Self {
            work_item_type: "max-age=300".to_string(),
            work_item_types: "max-age=300".to_string(),
        }
    }
}

impl Validatable for CacheControlConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.work_item_type, "work_item_type", self.domain_name())?;
        validate_required_string(&self.work_item_types, "work_item_types", self.domain_name())?;
        for value in [&self.work_item_type, &self.work_item_types] {
            if value.chars().any(|c| c.is_control()) {
                return Err(self.validation_error(format!("'{}' is not a valid header value", value)));
            }
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "cache_control"
    }
}
