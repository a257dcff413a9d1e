//! Bounded in-memory session store.
//!
//! Records live in a `moka` cache that drops each entry at its session
//! expiry and evicts the least useful entries once `max_capacity` is hit,
//! so cookieless visitors cannot grow memory without limit.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;

/// Expires a cached record at its own `expiry_date`.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        Duration::try_from(record.expiry_date - OffsetDateTime::now_utc()).unwrap_or(Duration::ZERO)
    }
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(&self, _id: &Id, record: &Record, _created_at: Instant) -> Option<Duration> {
        Some(Self::remaining(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }
}

/// Session store over a capacity-limited `moka` cache.
#[derive(Clone)]
pub struct BoundedMemoryStore {
    cache: Cache<Id, Record>,
}

impl BoundedMemoryStore {
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(RecordExpiry)
            .build();
        Self { cache }
    }

    /// Approximate number of live records. Call `run_pending_tasks` first
    /// for an up-to-date figure.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Apply pending evictions and expirations.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for BoundedMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedMemoryStore")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for BoundedMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.save(record).await
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(id).await;
        Ok(())
    }
}
