//! Configuration domains

pub mod auth;
pub mod cache_control;
pub mod database;
pub mod logging;
pub mod server;
pub mod utils;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WitConfig {
    pub server: server::ServerConfig,

    pub database: database::DatabaseConfig,

    pub auth: auth::AuthConfig,

    pub cache_control: cache_control::CacheControlConfig,

    pub logging: logging::LoggingConfig,
}

impl WitConfig {
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.cache_control.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
