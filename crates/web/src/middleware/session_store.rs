//! In-memory session store with bounded size and per-session expiry.
//!
//! Records live in a `moka` cache. Each entry is evicted at its own
//! `expiry_date`, and the cache never holds more than its capacity, so
//! sessions abandoned without a logout do not accumulate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;

/// Default maximum number of live sessions.
pub const DEFAULT_SESSION_CAPACITY: u64 = 100_000;

/// Session store backed by a `moka` cache.
#[derive(Clone)]
pub struct CacheSessionStore {
    cache: Cache<Id, Record>,
}

impl CacheSessionStore {
    /// Create a store holding at most `capacity` sessions.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .expire_after(RecordExpiry)
            .build();

        Self { cache }
    }
}

impl Default for CacheSessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

impl std::fmt::Debug for CacheSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSessionStore")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        // Session ID collision
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Expires each cache entry at its record's `expiry_date`.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        let millis = (record.expiry_date - OffsetDateTime::now_utc()).whole_milliseconds();
        u64::try_from(millis).map_or(Duration::ZERO, Duration::from_millis)
    }
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(
        &self,
        _key: &Id,
        value: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(value))
    }

    // Saving refreshes the expiry date on inactivity-based sessions
    fn expire_after_update(
        &self,
        _key: &Id,
        value: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::cookie::time::Duration as TimeDuration;

    use super::*;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = CacheSessionStore::default();
        let mut rec = record(TimeDuration::hours(1));

        store.create(&mut rec).await.unwrap();
        assert_eq!(store.load(&rec.id).await.unwrap(), Some(rec.clone()));

        store.delete(&rec.id).await.unwrap();
        assert!(store.load(&rec.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_is_evicted() {
        let store = CacheSessionStore::default();
        let rec = record(TimeDuration::seconds(-5));

        store.save(&rec).await.unwrap();
        assert!(store.load(&rec.id).await.unwrap().is_none());

        store.cache.run_pending_tasks().await;
        assert_eq!(store.cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_capacity_bounds_live_sessions() {
        let store = CacheSessionStore::new(10);

        for _ in 0..100 {
            store.save(&record(TimeDuration::days(7))).await.unwrap();
        }
        store.cache.run_pending_tasks().await;

        assert!(store.cache.entry_count() <= 10);
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(
            RecordExpiry::remaining(&record(TimeDuration::minutes(-1))),
            Duration::ZERO
        );
        assert!(RecordExpiry::remaining(&record(TimeDuration::minutes(1))) > Duration::ZERO);
    }
}
