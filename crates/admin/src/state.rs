//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::PgCatalogStore;
use crate::services::ListingCache;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    listings: ListingCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                listings: ListingCache::default(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Snapshots of the last successful panel listings.
    #[must_use]
    pub fn listings(&self) -> &ListingCache {
        &self.inner.listings
    }

    /// Product and custom-order store over the shared pool.
    #[must_use]
    pub fn catalog_store(&self) -> PgCatalogStore<'_> {
        PgCatalogStore::new(&self.inner.pool)
    }
}
