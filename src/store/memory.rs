//! Ephemeral store keyed by id. State lives for the lifetime of the instance.

use super::Store;
use crate::error::StoreError;
use crate::model::{Model, Row};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tokio::sync::RwLock;

struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

pub struct MemoryStore<M> {
    inner: RwLock<Inner>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> MemoryStore<M> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
            _model: PhantomData,
        }
    }
}

impl<M: Model> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Model> Store<M> for MemoryStore<M> {
    async fn list_all(&self) -> Result<Vec<M>, StoreError> {
        let inner = self.inner.read().await;
        inner.rows.values().map(M::from_row).collect()
    }

    async fn create(&self, draft: M::Draft) -> Result<M, StoreError> {
        let mut row = M::draft_to_row(&draft);
        let pk = M::schema().primary_key;
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        row.insert(pk.to_string(), Value::Number(id.into()));
        let stored = M::from_row(&row)?;
        inner.rows.insert(id, row);
        inner.next_id += 1;
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<M, StoreError> {
        let inner = self.inner.read().await;
        let row = inner.rows.get(&id).ok_or(StoreError::NotFound(id))?;
        M::from_row(row)
    }
}
