//! Application state shared across handlers.

use std::sync::Arc;

use url::Url;

use belle_core::catalog::{Product, Testimonial, demo_products, demo_testimonials};
use belle_core::store::SharedStore;

use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::services::payment::PaymentGateway;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid base_url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base_url must have a host")]
    MissingHost,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the snapshot store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: SharedStore,
    content: ContentStore,
    gateway: Arc<dyn PaymentGateway>,
    base_catalog: Vec<Product>,
    testimonials: Vec<Testimonial>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed.
    pub fn new(
        config: StorefrontConfig,
        store: SharedStore,
        content: ContentStore,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self, StateError> {
        // Fail early on an unusable public URL
        let url = Url::parse(&config.base_url)?;
        if url.host_str().is_none() {
            return Err(StateError::MissingHost);
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                content,
                gateway,
                base_catalog: demo_products(),
                testimonials: demo_testimonials(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the snapshot store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Get a reference to the markdown content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the payment gateway.
    #[must_use]
    pub fn gateway(&self) -> &dyn PaymentGateway {
        self.inner.gateway.as_ref()
    }

    /// The catalog as currently visible: built-in products with admin edits
    /// layered on top.
    #[must_use]
    pub fn catalog(&self) -> Vec<Product> {
        self.inner
            .store
            .read(|state| state.effective_catalog(&self.inner.base_catalog))
    }

    /// The built-in demo catalog, before admin edits.
    #[must_use]
    pub fn base_catalog(&self) -> &[Product] {
        &self.inner.base_catalog
    }

    /// Customer testimonials shown on the home page.
    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.inner.testimonials
    }
}
