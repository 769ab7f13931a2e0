use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::store::CatalogStore;

/// Shared application state. Built once in `main`, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, jwt: JwtKeys) -> Self {
        Self { store, jwt }
    }
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory store. The store handle is returned as
    /// well so tests can assert side effects directly.
    pub fn for_tests() -> (Self, Arc<crate::store::memory::MemStore>) {
        let store = Arc::new(crate::store::memory::MemStore::new());
        let state = Self {
            store: store.clone(),
            jwt: JwtKeys::new("test-secret"),
        };
        (state, store)
    }
}
