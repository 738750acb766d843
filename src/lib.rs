//! catrest: a generic REST resource controller over swappable persistence, with `Cat` as the shipped resource.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, DatabaseConfig, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use logging::init_tracing;
pub use migration::{NoopSchemaPreparer, PgSchemaPreparer, SchemaPreparer};
pub use model::{Cat, Model, NewCat, Row, SchemaDescriptor};
pub use routes::{app, common_routes, common_routes_with_ready, resource_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, Backend, MemoryStore, PgStore, Store};
