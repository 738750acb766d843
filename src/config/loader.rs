//! Load config from the process environment (after `.env`) or from any key lookup.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

impl AppConfig {
    /// Read `.env` if present, then build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from a key lookup. Unset keys fall back to defaults. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("CATREST_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "CATREST_BIND",
                reason: e.to_string(),
            })?;
        let base_path = lookup("CATREST_BASE_PATH")
            .map(|p| p.trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_PATH.into());
        let backend = match lookup("CATREST_STORE") {
            Some(s) => StoreBackend::from_str(&s)?,
            None => StoreBackend::default(),
        };
        let max_connections = parse_or("CATREST_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let body_limit = parse_or("CATREST_BODY_LIMIT", &lookup, DEFAULT_BODY_LIMIT)?;
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections,
        });

        let config = AppConfig {
            bind_addr,
            base_path,
            backend,
            database,
            body_limit,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
