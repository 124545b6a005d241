//! Configuration loading and environment variable handling

use std::path::Path;
use std::str::FromStr;

use crate::domains::WitConfig;
use crate::error::{ConfigError, ConfigResult};

/// Loads [`WitConfig`] from YAML and `{PREFIX}_*` environment variables
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: "WIT".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<WitConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: WitConfig = if content.trim().is_empty() {
            WitConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from defaults and environment variables only
    pub fn from_env(&self) -> ConfigResult<WitConfig> {
        let mut config = WitConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<WitConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut WitConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_database_overrides(&mut config.database)?;
        self.apply_auth_overrides(&mut config.auth)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }
        if let Some(port) = self.parse_env_var("SERVER_PORT")? {
            config.port = port;
        }
        if let Ok(prefix) = self.get_env_var("API_PREFIX") {
            config.api_prefix = prefix;
        }
        Ok(())
    }

    fn apply_database_overrides(&self, config: &mut crate::domains::database::DatabaseConfig) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("DATABASE_URL") {
            config.url = url;
        }
        if let Ok(backend) = self.get_env_var("DATABASE_BACKEND") {
            config.backend = match backend.to_lowercase().as_str() {
                "sqlite" => crate::DatabaseBackend::Sqlite,
                "memory" => crate::DatabaseBackend::Memory,
                other => {
                    return Err(ConfigError::EnvError(format!("Invalid DATABASE_BACKEND: {}", other)));
                }
            };
        }
        if let Some(max) = self.parse_env_var("DATABASE_MAX_CONNECTIONS")? {
            config.max_connections = max;
        }
        Ok(())
    }

    fn apply_auth_overrides(&self, config: &mut crate::domains::auth::AuthConfig) -> ConfigResult<()> {
        if let Ok(secret) = self.get_env_var("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(enabled) = self.parse_env_var("AUTH_ENABLED")? {
            config.enabled = enabled;
        }
        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.level = level.parse().map_err(ConfigError::EnvError)?;
        }
        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = format.parse().map_err(ConfigError::EnvError)?;
        }
        Ok(())
    }

    /// Read and parse `{PREFIX}_{name}`; `None` when unset
    fn parse_env_var<T>(&self, name: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_env_var(name) {
            Ok(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e))),
            Err(_) => Ok(None),
        }
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DatabaseBackend, LogFormat, LogLevel};
    use std::io::Write;

    // each test uses its own prefix so parallel tests never share variables

    #[test]
    fn test_from_file_with_defaults_for_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\nauth:\n  jwt_secret: a-very-long-test-secret\nlogging:\n  format: json\n"
        )
        .unwrap();

        let config = ConfigLoader::with_prefix("WIT_TEST_FILE").from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.cache_control.work_item_type, "max-age=300");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "auth:\n  jwt_secret: a-very-long-test-secret\n").unwrap();

        std::env::set_var("WIT_TEST_ENV_SERVER_PORT", "7070");
        std::env::set_var("WIT_TEST_ENV_DATABASE_BACKEND", "memory");
        std::env::set_var("WIT_TEST_ENV_LOG_LEVEL", "debug");

        let config = ConfigLoader::with_prefix("WIT_TEST_ENV").from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_env_value() {
        std::env::set_var("WIT_TEST_BAD_SERVER_PORT", "eighty");
        std::env::set_var("WIT_TEST_BAD_JWT_SECRET", "a-very-long-test-secret");

        let err = ConfigLoader::with_prefix("WIT_TEST_BAD").from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let err = ConfigLoader::with_prefix("WIT_TEST_NOSECRET").from_env().unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { ref domain, .. } if domain == "auth"));
    }

    #[test]
    fn test_auth_can_be_disabled() {
        std::env::set_var("WIT_TEST_NOAUTH_AUTH_ENABLED", "false");
        let config = ConfigLoader::with_prefix("WIT_TEST_NOAUTH").from_env().unwrap();
        assert!(!config.auth.enabled);
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new().load(Some("/nonexistent/wit.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError(_)));
    }
}
