//! Bearer token authentication

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::Validatable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled every request is anonymous
    #[serde(default = "crate::domains::utils::default_true")]
    pub enabled: bool,

    /// HS256 signing secret
    pub jwt_secret: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt_secret: String::new(),
            issuer: None,
            audience: None,
        }
    }
}

impl Validatable for AuthConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(self.validation_error("jwt_secret is required when authentication is enabled"));
        }
        if self.jwt_secret.len() < 16 {
            log::warn!("auth.jwt_secret is shorter than 16 bytes");
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "auth"
    }
}
