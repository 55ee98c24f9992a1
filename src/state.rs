//! Shared application state for all routes.

use crate::graphql::{build_schema, CustomerSchema};
use crate::store::{MemoryCustomerStore, SharedStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Built once over `store`; views execute their operations against it in-process.
    pub schema: CustomerSchema,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        let schema = build_schema(store.clone());
        Self { store, schema }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCustomerStore::new()))
    }
}
