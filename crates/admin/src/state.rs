//! Shared application state for the admin panel.

use std::sync::Arc;

use belle_core::catalog::{self, Product};
use belle_core::store::SharedStore;

use crate::config::AdminConfig;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: SharedStore,
    base_catalog: Vec<Product>,
}

impl AppState {
    /// Build application state around an opened store.
    #[must_use]
    pub fn new(config: AdminConfig, store: SharedStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                base_catalog: catalog::demo_products(),
            }),
        }
    }

    /// The admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The shared snapshot store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// The base catalog shipped with the binary, before admin edits.
    #[must_use]
    pub fn base_catalog(&self) -> &[Product] {
        &self.inner.base_catalog
    }

    /// The effective catalog with admin overrides applied.
    #[must_use]
    pub fn catalog(&self) -> Vec<Product> {
        self.inner
            .store
            .read(|state| state.effective_catalog(&self.inner.base_catalog))
    }
}
