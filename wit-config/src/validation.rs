//! Validation trait shared by the configuration domains

use crate::error::{ConfigError, ConfigResult};

pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Domain name used in error messages
    fn domain_name(&self) -> &'static str;

    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

pub fn validate_positive<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Check that `value` is an absolute URL
pub fn validate_url(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    validate_required_string(value, field_name, domain)?;
    url::Url::parse(value).map_err(|e| ConfigError::DomainError {
        domain: domain.to_string(),
        message: format!("{} has invalid URL format: {}", field_name, e),
    })?;
    Ok(())
}

/// Check that a path prefix starts with `/` and has no trailing slash
pub fn validate_path_prefix(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if !value.starts_with('/') || value.ends_with('/') {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must start with '/' and not end with '/', got '{}'", field_name, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1u32, "n", "test").is_ok());
        assert!(validate_positive(0u32, "n", "test").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("sqlite://wit.db", "url", "database").is_ok());
        assert!(validate_url("not a url", "url", "database").is_err());
        assert!(validate_url("", "url", "database").is_err());
    }

    #[test]
    fn test_validate_path_prefix() {
        assert!(validate_path_prefix("/api", "api_prefix", "server").is_ok());
        assert!(validate_path_prefix("/v1/api", "api_prefix", "server").is_ok());
        assert!(validate_path_prefix("/", "api_prefix", "server").is_err());
        assert!(validate_path_prefix("api", "api_prefix", "server").is_err());
        assert!(validate_path_prefix("/api/", "api_prefix", "server").is_err());
    }
}
