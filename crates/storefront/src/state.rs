//! Application state shared across handlers.

use std::sync::Arc;

use nebula_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::services::AuthClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds only read-only
/// resources; per-visitor state (cart, login) lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    auth: AuthClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the catalog from `config.catalog.path` when set, otherwise
    /// generates it from the configured size and seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::generate(config.catalog.size, config.catalog.seed),
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already-built catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let auth = AuthClient::new(&config.auth);

        tracing::info!(
            products = catalog.len(),
            auth_url = %auth.login_url(),
            "Application state initialized"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the authentication API client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }
}
