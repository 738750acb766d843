//! Schema preparation: create or drop the backing table for an entity.
//! Runs once at process startup, before routes are mounted.

use crate::error::StoreError;
use crate::model::SchemaDescriptor;
use crate::sql::{create_table, drop_table};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait SchemaPreparer: Send + Sync {
    /// Create the backing structure if absent. Safe to call when it already exists.
    async fn prepare(&self) -> Result<(), StoreError>;

    /// Drop the backing structure entirely. Intended for test and reset workflows.
    async fn revert(&self) -> Result<(), StoreError>;
}

/// Preparer for stores with no durable structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSchemaPreparer;

#[async_trait]
impl SchemaPreparer for NoopSchemaPreparer {
    async fn prepare(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn revert(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub struct PgSchemaPreparer {
    pool: PgPool,
    schema: &'static SchemaDescriptor,
}

impl PgSchemaPreparer {
    pub fn new(pool: PgPool, schema: &'static SchemaDescriptor) -> Self {
        Self { pool, schema }
    }
}

#[async_trait]
impl SchemaPreparer for PgSchemaPreparer {
    async fn prepare(&self) -> Result<(), StoreError> {
        let ddl = create_table(self.schema);
        tracing::debug!(sql = %ddl, "prepare schema");
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(table = self.schema.table, "schema ready");
        Ok(())
    }

    async fn revert(&self) -> Result<(), StoreError> {
        let ddl = drop_table(self.schema);
        tracing::debug!(sql = %ddl, "revert schema");
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(table = self.schema.table, "schema dropped");
        Ok(())
    }
}
