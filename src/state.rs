//! Shared state for resource routes. The store is injected by the wiring code.

use crate::model::Model;
use crate::store::Store;
use std::sync::Arc;

pub struct AppState<M: Model> {
    pub store: Arc<dyn Store<M>>,
}

impl<M: Model> AppState<M> {
    pub fn new(store: Arc<dyn Store<M>>) -> Self {
        Self { store }
    }
}

impl<M: Model> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
