//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{ConnectionProvider, ProductRepository, ProductStore, UserRepository, UserStore};

/// Application state shared across all handlers.
///
/// Built once at startup and passed to handlers through axum's `State`
/// extractor. Cheaply cloneable via `Arc`; nothing in it is mutated after
/// construction.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
}

impl AppState {
    /// Create application state from explicit stores.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration
    /// * `products` - Product storage
    /// * `users` - User storage
    #[must_use]
    pub fn new(
        config: AppConfig,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                users,
            }),
        }
    }

    /// Create application state backed by `PostgreSQL` repositories.
    #[must_use]
    pub fn with_postgres(config: AppConfig) -> Self {
        let provider = ConnectionProvider::new(&config.database);
        let products = Arc::new(ProductRepository::new(provider.clone()));
        let users = Arc::new(UserRepository::new(provider));

        Self::new(config, products, users)
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Get the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }
}
