//! Runtime configuration: store selection, connection parameters, HTTP surface.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BASE_PATH: &str = "catREST";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Which persistence adapter backs the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            other => Err(ConfigError::InvalidValue {
                key: "CATREST_STORE",
                reason: format!("unknown store '{}' (expected memory or postgres)", other),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Single path segment the resource is mounted under, without slashes.
    pub base_path: String,
    pub backend: StoreBackend,
    /// Present whenever `DATABASE_URL` is set; required for the postgres backend.
    pub database: Option<DatabaseConfig>,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            base_path: DEFAULT_BASE_PATH.to_string(),
            backend: StoreBackend::Memory,
            database: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}
