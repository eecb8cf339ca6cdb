use std::time::Duration;

use bookly_core::{storage::SnapshotSource, CoreError};
use bookly_domain::VendorSnapshot;
use moka::sync::Cache;
use tracing::debug;

/// Snapshots kept in memory at once.
pub const DEFAULT_CAPACITY: u64 = 16;

/// Time-boxed cache in front of another [`SnapshotSource`], keyed by snapshot name.
///
/// Entries older than the TTL are evicted and reloaded from the inner source
/// on the next read. A zero TTL disables caching.
pub struct CachedSnapshotSource<S> {
    inner: S,
    ttl: Duration,
    entries: Cache<String, VendorSnapshot>,
}

impl<S: SnapshotSource> CachedSnapshotSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_capacity(inner, ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: S, ttl: Duration, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .time_to_live(ttl.max(Duration::from_millis(1)))
            .max_capacity(max_capacity)
            .build();
        Self { inner, ttl, entries }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops the cached copy of `name`; returns whether one existed.
    pub fn invalidate(&self, name: &str) -> bool {
        let existed = self.entries.contains_key(name);
        self.entries.invalidate(name);
        existed
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    pub fn cached_len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    fn caching(&self) -> bool {
        !self.ttl.is_zero()
    }
}

impl<S: SnapshotSource> SnapshotSource for CachedSnapshotSource<S> {
    fn load_snapshot(&self, name: &str) -> Result<VendorSnapshot, CoreError> {
        if !self.caching() {
            return self.inner.load_snapshot(name);
        }
        if let Some(snapshot) = self.entries.get(name) {
            debug!(snapshot = name, "snapshot cache hit");
            return Ok(snapshot);
        }

        debug!(snapshot = name, "snapshot cache miss");
        let snapshot = self.inner.load_snapshot(name)?;
        self.entries.insert(name.to_string(), snapshot.clone());
        Ok(snapshot)
    }

    fn list_snapshots(&self) -> Result<Vec<String>, CoreError> {
        self.inner.list_snapshots()
    }
}
