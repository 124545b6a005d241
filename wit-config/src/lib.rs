//! Configuration for the work item type service
//!
//! Settings are grouped by domain (server, database, auth, cache control,
//! logging). Each domain has defaults, can be overridden through `WIT_*`
//! environment variables and is validated before use.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

pub use domains::{
    auth::AuthConfig,
    cache_control::CacheControlConfig,
    database::{DatabaseBackend, DatabaseConfig},
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::{CorsConfig, ServerConfig},
    WitConfig,
};
pub use domains::utils::serde_duration;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
