//! Persistence adapters. Handlers depend only on the `Store` trait; the backend is picked from config.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::config::{AppConfig, StoreBackend};
use crate::error::{AppError, ConfigError, StoreError};
use crate::migration::{NoopSchemaPreparer, PgSchemaPreparer, SchemaPreparer};
use crate::model::Model;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Store<M: Model>: Send + Sync {
    /// Every stored entity, in ascending id order. Empty when nothing is stored.
    async fn list_all(&self) -> Result<Vec<M>, StoreError>;

    /// Persist a draft under a freshly assigned id and return the stored entity.
    async fn create(&self, draft: M::Draft) -> Result<M, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<M, StoreError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store and the schema preparer that belongs to it.
pub struct Backend<M: Model> {
    pub store: Arc<dyn Store<M>>,
    pub preparer: Arc<dyn SchemaPreparer>,
}

impl<M: Model> Clone for Backend<M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            preparer: Arc::clone(&self.preparer),
        }
    }
}

impl<M: Model> Backend<M> {
    /// Process-lifetime in-memory backend.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::<M>::new()),
            preparer: Arc::new(NoopSchemaPreparer),
        }
    }

    /// PostgreSQL backend over an existing pool.
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            store: Arc::new(PgStore::<M>::new(pool.clone())),
            preparer: Arc::new(PgSchemaPreparer::new(pool, M::schema())),
        }
    }

    /// Build the backend selected by `config`. For PostgreSQL this creates the database if needed and opens the pool.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory store");
                Ok(Self::memory())
            }
            StoreBackend::Postgres => {
                let db = config
                    .database
                    .as_ref()
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?;
                ensure_database_exists(&db.url).await?;
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(db.max_connections)
                    .connect(&db.url)
                    .await
                    .map_err(StoreError::Db)?;
                tracing::info!(max_connections = db.max_connections, "using postgres store");
                Ok(Self::postgres(pool))
            }
        }
    }
}
