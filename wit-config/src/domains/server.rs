//! HTTP server configuration

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::validation::{validate_path_prefix, validate_positive, validate_required_string, Validatable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    /// Path prefix the work item type routes are mounted under
    pub api_prefix: String,

    /// Per-request timeout
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub request_timeout: Duration,

    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            api_prefix: "/api".to_string(),
            request_timeout: Duration::from_secs(30),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Resolve the listen address
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("Invalid bind address: {}", e)))
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_positive(self.port, "port", self.domain_name())?;
        validate_path_prefix(&self.api_prefix, "api_prefix", self.domain_name())?;
        if self.request_timeout.is_zero() {
            return Err(self.validation_error("request_timeout must be greater than 0"));
        }
        self.socket_addr().map(|_| ())?;
        self.cors.validate()
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin
    pub allowed_origins: Vec<String>,

    pub allowed_methods: Vec<String>,

    pub allowed_headers: Vec<String>,

    #[serde(with = "crate::domains::utils::serde_duration")]
    pub max_age: Duration,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "OPTIONS"].iter().map(|m| m.to_string()).collect(),
            allowed_headers: ["Content-Type", "Authorization", "If-None-Match", "If-Modified-Since"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            max_age: Duration::from_secs(3600),
        }
    }
}

impl Validatable for CorsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.allowed_origins.is_empty() {
            return Err(self.validation_error("At least one allowed origin must be configured"));
        }
        for origin in &self.allowed_origins {
            validate_required_string(origin, "allowed_origins", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.cors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = ServerConfig {
            bind_address: "not-an-ip".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
