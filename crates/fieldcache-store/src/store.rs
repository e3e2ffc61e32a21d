//! Partition-keyed aggregate store using moka
//!
//! Provides concurrent, bounded caching of merged aggregates by partition key.

use crate::error::StoreError;
use fieldcache_policy::{read_window, MergeStrategy, PartitionKey};
use fieldcache_types::{Aggregate, PageEnvelope, Record, RequestWindow};
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Statistics for store monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    /// Number of partition aggregates currently held
    pub entry_count: u64,
}

/// Partition-keyed aggregate store
///
/// Stores one merged aggregate per partition key, enabling:
/// - Partition isolation (distinct filters never share an aggregate)
/// - Automatic eviction based on LRU capacity
/// - Time-based expiration (TTL) for session-lifetime caching
///
/// Aggregates are handed out as `Arc` snapshots: a merge replaces the stored
/// value wholesale, so concurrent readers never observe a half-updated
/// aggregate.
#[derive(Debug, Clone)]
pub struct AggregateStore<R>
where
    R: Record + Send + Sync + 'static,
{
    inner: Cache<PartitionKey, Arc<Aggregate<R>>>,
}

impl<R> AggregateStore<R>
where
    R: Record + Send + Sync + 'static,
{
    /// Create new store with max partition capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create store with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Merge a fetched page into the partition's aggregate
    ///
    /// Reads the current aggregate (if any), runs the strategy, and stores
    /// the replacement. Returns the new aggregate snapshot.
    ///
    /// # Errors
    /// Returns [`StoreError::Policy`] when the strategy rejects the page;
    /// the stored aggregate is left untouched in that case.
    pub fn apply_page<S: MergeStrategy>(
        &self,
        key: PartitionKey,
        incoming: &PageEnvelope<R>,
        strategy: &S,
    ) -> Result<Arc<Aggregate<R>>, StoreError> {
        let existing = self.inner.get(&key);
        let merged = strategy.merge(existing.as_deref(), incoming)?;
        let merged = Arc::new(merged);

        tracing::debug!(
            partition = %key,
            strategy = strategy.name(),
            page = incoming.meta.current_page,
            fetched = merged.fetched_len(),
            "stored merged aggregate"
        );
        self.inner.insert(key, Arc::clone(&merged));
        Ok(merged)
    }

    /// Read one window out of the partition's aggregate
    ///
    /// `None` means the window has not been fetched; the caller should
    /// issue a network request.
    #[must_use]
    pub fn read(&self, key: &PartitionKey, window: &RequestWindow) -> Option<PageEnvelope<R>> {
        let aggregate = self.inner.get(key);
        read_window(aggregate.as_deref(), window)
    }

    /// Current aggregate snapshot for a partition, if any
    #[inline]
    #[must_use]
    pub fn snapshot(&self, key: &PartitionKey) -> Option<Arc<Aggregate<R>>> {
        self.inner.get(key)
    }

    /// Check if a partition has an aggregate
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &PartitionKey) -> bool {
        self.inner.get(key).is_some()
    }

    /// Drop one partition's aggregate
    #[inline]
    pub fn invalidate(&self, key: &PartitionKey) {
        self.inner.invalidate(key);
    }

    /// Drop every aggregate (cache cleared / session reset)
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get store statistics
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        // Flush pending maintenance so the count reflects recent writes.
        self.inner.run_pending_tasks();
        StoreStats {
            entry_count: self.inner.entry_count(),
        }
    }

    /// Get approximate partition count
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl<R> Default for AggregateStore<R>
where
    R: Record + Send + Sync + 'static,
{
    /// Create store with default capacity (1,000 partitions)
    fn default() -> Self {
        Self::new(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcache_policy::{PartitionSpec, WindowedMergeStrategy};
    use fieldcache_types::{PageMeta, RawRecord};
    use serde_json::json;

    fn key(status: &str) -> PartitionKey {
        let spec = PartitionSpec::by_args(["status"]).unwrap();
        let args = json!({ "status": status }).as_object().cloned().unwrap();
        spec.key_for("collections", &args)
    }

    fn page(current_page: u32, ids: &[&str]) -> PageEnvelope<RawRecord> {
        PageEnvelope::new(
            ids.iter()
                .map(|id| RawRecord::new(*id, json!({ "externalId": id })))
                .collect(),
            PageMeta {
                current_page,
                per_page: 2,
                total_pages: 2,
                total_results: 4,
            },
        )
        .unwrap()
    }

    #[test]
    fn apply_then_read_round_trips() {
        let store = AggregateStore::new(100);
        let strategy = WindowedMergeStrategy::new();

        store
            .apply_page(key("DRAFT"), &page(1, &["a", "b"]), &strategy)
            .unwrap();
        store
            .apply_page(key("DRAFT"), &page(2, &["c", "d"]), &strategy)
            .unwrap();

        let window = RequestWindow::new(2, 2).unwrap();
        let slice = store.read(&key("DRAFT"), &window).unwrap();
        assert_eq!(slice.records[0].external_id(), "c");
    }

    #[test]
    fn partitions_are_isolated() {
        let store = AggregateStore::new(100);
        let strategy = WindowedMergeStrategy::new();

        store
            .apply_page(key("DRAFT"), &page(1, &["d1", "d2"]), &strategy)
            .unwrap();
        store
            .apply_page(key("PUBLISHED"), &page(1, &["p1", "p2"]), &strategy)
            .unwrap();

        let window = RequestWindow::new(1, 2).unwrap();
        let draft = store.read(&key("DRAFT"), &window).unwrap();
        let published = store.read(&key("PUBLISHED"), &window).unwrap();

        assert_eq!(draft.records[0].external_id(), "d1");
        assert_eq!(published.records[0].external_id(), "p1");
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn unfetched_partition_reads_as_missing() {
        let store: AggregateStore<RawRecord> = AggregateStore::new(100);
        let window = RequestWindow::new(1, 2).unwrap();
        assert!(store.read(&key("DRAFT"), &window).is_none());
    }

    #[test]
    fn rejected_merge_leaves_store_untouched() {
        let store = AggregateStore::new(100);
        let strategy = WindowedMergeStrategy::new();

        store
            .apply_page(key("DRAFT"), &page(1, &["a", "b"]), &strategy)
            .unwrap();

        // perPage change is rejected by the strategy.
        let mismatched = PageEnvelope::new(
            vec![RawRecord::new("x", json!({ "externalId": "x" }))],
            PageMeta {
                current_page: 1,
                per_page: 5,
                total_pages: 1,
                total_results: 1,
            },
        )
        .unwrap();
        assert!(store
            .apply_page(key("DRAFT"), &mismatched, &strategy)
            .is_err());

        let window = RequestWindow::new(1, 2).unwrap();
        let slice = store.read(&key("DRAFT"), &window).unwrap();
        assert_eq!(slice.records[0].external_id(), "a");
    }

    #[test]
    fn invalidation_drops_partitions() {
        let store = AggregateStore::new(100);
        let strategy = WindowedMergeStrategy::new();

        store
            .apply_page(key("DRAFT"), &page(1, &["a", "b"]), &strategy)
            .unwrap();
        assert!(store.contains(&key("DRAFT")));

        store.invalidate(&key("DRAFT"));
        assert!(!store.contains(&key("DRAFT")));

        store
            .apply_page(key("PUBLISHED"), &page(1, &["p1", "p2"]), &strategy)
            .unwrap();
        store.invalidate_all();
        assert_eq!(store.stats().entry_count, 0);
    }
}
