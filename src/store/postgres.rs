//! PostgreSQL-backed store. Ids come from the table's BIGSERIAL primary key.

use super::Store;
use crate::error::StoreError;
use crate::model::{Model, Row};
use crate::sql::{insert, select_all, select_by_id, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{ConnectOptions, PgPool};
use std::marker::PhantomData;
use std::str::FromStr;

pub struct PgStore<M> {
    pool: PgPool,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> PgStore<M> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _model: PhantomData,
        }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(pg_row_to_row))
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(pg_row_to_row).collect())
    }
}

fn decode<M: Model>(row: &Row) -> Result<M, StoreError> {
    M::from_row(row).map_err(|e| {
        tracing::error!(table = M::schema().table, error = %e, "stored row does not match entity");
        e
    })
}

#[async_trait]
impl<M: Model> Store<M> for PgStore<M> {
    async fn list_all(&self) -> Result<Vec<M>, StoreError> {
        let rows = self.fetch_all(&select_all(M::schema())).await?;
        rows.iter().map(decode::<M>).collect()
    }

    async fn create(&self, draft: M::Draft) -> Result<M, StoreError> {
        let q = insert(M::schema(), &M::draft_to_row(&draft));
        let row = self
            .fetch_optional(&q)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))?;
        let stored = decode::<M>(&row)?;
        tracing::debug!(table = M::schema().table, id = stored.id(), "record inserted");
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<M, StoreError> {
        let row = self
            .fetch_optional(&select_by_id(M::schema(), id))
            .await?
            .ok_or(StoreError::NotFound(id))?;
        decode::<M>(&row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn pg_row_to_row(row: &PgRow) -> Row {
    use sqlx::Column;
    use sqlx::Row as _;
    let mut map = Row::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    map
}

/// Decode one cell. Schemas only use BIGSERIAL and TEXT columns; anything else reads as null
/// and is rejected by `Model::from_row`.
fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row as _;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}

/// Ensure the database named in `database_url` exists; create it if not. Connects to the
/// default `postgres` database on the same server (same credentials and TLS settings) to run
/// CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connect options for the `postgres` maintenance database plus the target database name.
/// `None` when the URL names no database or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
