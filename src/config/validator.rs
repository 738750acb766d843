//! Config validation: backend requirements and route shape.

use crate::config::{AppConfig, StoreBackend};
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    validate_base_path(&config.base_path)?;
    if config.body_limit == 0 {
        return Err(ConfigError::InvalidValue {
            key: "CATREST_BODY_LIMIT",
            reason: "must be greater than zero".into(),
        });
    }
    if config.backend == StoreBackend::Postgres {
        let db = config.database.as_ref().ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if db.url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if db.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CATREST_MAX_CONNECTIONS",
                reason: "must be greater than zero".into(),
            });
        }
    }
    Ok(())
}

/// A base path is one non-empty segment of ASCII letters, digits, `-` or `_`.
pub fn validate_base_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::InvalidBasePath("empty".into()));
    }
    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidBasePath(path.to_string()));
    }
    if matches!(path, "health" | "ready" | "version") {
        return Err(ConfigError::InvalidBasePath(format!("'{}' is reserved", path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_tutorial_path() {
        assert!(validate_base_path("catREST").is_ok());
    }

    #[test]
    fn rejects_nested_and_empty_paths() {
        assert!(validate_base_path("").is_err());
        assert!(validate_base_path("a/b").is_err());
        assert!(validate_base_path(":id").is_err());
    }

    #[test]
    fn rejects_reserved_paths() {
        assert!(validate_base_path("health").is_err());
    }

    #[test]
    fn zero_connections_rejected() {
        let config = AppConfig {
            backend: StoreBackend::Postgres,
            database: Some(crate::config::DatabaseConfig {
                url: "postgres://localhost/cats".into(),
                max_connections: 0,
            }),
            ..AppConfig::default()
        };
        assert!(validate(&config).is_err());
    }
}
