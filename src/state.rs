use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use moka::sync::Cache;
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::FilterCriteria;
use crate::config::AppConfig;
use crate::db::{DbPool, OrmConn};
use crate::models::Product;

/// Carts are keyed by the client-generated session id and live only in this
/// process; nothing is persisted across restarts.
pub type Carts = Arc<Mutex<HashMap<Uuid, Cart>>>;

pub type CatalogCache = Cache<(u64, FilterCriteria), Arc<Vec<Product>>>;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: AppConfig,
    carts: Carts,
    catalog_cache: CatalogCache,
    catalog_rev: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, config: AppConfig) -> Self {
        Self {
            pool,
            orm,
            config,
            carts: Arc::new(Mutex::new(HashMap::new())),
            catalog_cache: Cache::new(256),
            catalog_rev: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `f` against the session's cart, creating an empty cart on first
    /// touch. The lock is held only for the duration of the closure, and the
    /// closure never awaits, so cart operations are atomic per session.
    pub fn with_cart<T>(&self, session: Uuid, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut carts = self.carts.lock().unwrap_or_else(|e| e.into_inner());
        f(carts.entry(session).or_default())
    }

    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.catalog_cache
    }

    pub fn catalog_revision(&self) -> u64 {
        self.catalog_rev.load(Ordering::Acquire)
    }

    /// Every admin write bumps the revision, which retires all cached filter
    /// views for the previous catalog state.
    pub fn bump_catalog_revision(&self) {
        self.catalog_rev.fetch_add(1, Ordering::AcqRel);
    }
}
