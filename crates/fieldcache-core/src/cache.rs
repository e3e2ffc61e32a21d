//! The FieldCache client facade
//!
//! Wires per-field policies to the partitioned aggregate store: a list page
//! issues a paginated query, the response is written here, the merge
//! strategy combines it with any cached aggregate for the same partition
//! key, and later reads re-slice the merged aggregate to serve exactly the
//! requested window, including windows that were never the last network
//! response.

use crate::config::CacheConfig;
use crate::error::FieldCacheError;
use dashmap::DashMap;
use fieldcache_policy::{
    AppendMergeStrategy, FieldPolicy, MergeRegistry, PartitionKey, WindowedMergeStrategy, APPEND,
};
use fieldcache_store::{AggregateStore, StoreStats};
use fieldcache_types::{PageEnvelope, RawRecord, RequestWindow};
use serde_json::{Map, Value};

/// Client-side cache for paginated query fields
///
/// One instance lives for the duration of a session (a browser tab's
/// worth of curation work) and is shared by every list surface. All
/// methods take `&self`; the store hands out immutable snapshots, so
/// concurrent readers are safe.
#[derive(Debug)]
pub struct FieldCache {
    config: CacheConfig,
    policies: DashMap<String, FieldPolicy>,
    registry: MergeRegistry,
    store: AggregateStore<RawRecord>,
    windowed: WindowedMergeStrategy,
    append: AppendMergeStrategy,
}

impl FieldCache {
    /// Create a cache from configuration
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let store = match config.partition_ttl {
            Some(ttl) => AggregateStore::with_ttl(config.max_partitions, ttl),
            None => AggregateStore::new(config.max_partitions),
        };
        Self {
            config,
            policies: DashMap::new(),
            registry: MergeRegistry::with_defaults(),
            store,
            windowed: WindowedMergeStrategy::new(),
            append: AppendMergeStrategy::new(),
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Register the field policy for one paginated query field
    ///
    /// # Errors
    /// - [`FieldCacheError::UnknownStrategy`] when the policy names a merge
    ///   strategy the registry doesn't know
    /// - [`FieldCacheError::DuplicatePolicy`] when the field already has a
    ///   policy; re-registration is a wiring mistake, not an update path
    pub fn register_policy(
        &self,
        field: impl Into<String>,
        policy: FieldPolicy,
    ) -> Result<(), FieldCacheError> {
        let field = field.into();
        if !self.registry.contains(policy.merge_strategy()) {
            return Err(FieldCacheError::UnknownStrategy {
                field,
                strategy: policy.merge_strategy().to_string(),
            });
        }

        use dashmap::mapref::entry::Entry;
        match self.policies.entry(field) {
            Entry::Occupied(entry) => Err(FieldCacheError::DuplicatePolicy(entry.key().clone())),
            Entry::Vacant(entry) => {
                tracing::debug!(
                    field = %entry.key(),
                    strategy = policy.merge_strategy(),
                    "registered field policy"
                );
                entry.insert(policy);
                Ok(())
            }
        }
    }

    /// Write one query response into the cache
    ///
    /// Validates the response shape at the boundary, derives the partition
    /// key from the query arguments, and merges the page into the
    /// partition's aggregate. Returns the partition key the page landed in.
    ///
    /// # Errors
    /// - [`FieldCacheError::UnknownField`] when no policy is registered
    /// - [`FieldCacheError::Shape`] when the response is malformed or the
    ///   configured list field is absent (a misconfiguration, surfaced
    ///   loudly)
    /// - [`FieldCacheError::Store`] when the merge strategy rejects the page
    pub fn write_response(
        &self,
        field: &str,
        args: &Map<String, Value>,
        response: &Value,
    ) -> Result<PartitionKey, FieldCacheError> {
        let policy = self.policy(field)?;
        let envelope =
            PageEnvelope::from_response(response, policy.list_field(), policy.id_field())?;
        let key = policy.key_for(field, args);

        if policy.merge_strategy() == APPEND {
            self.store.apply_page(key.clone(), &envelope, &self.append)?;
        } else {
            self.store
                .apply_page(key.clone(), &envelope, &self.windowed)?;
        }
        Ok(key)
    }

    /// Read one window for a field, if it has been fetched
    ///
    /// `Ok(None)` is the explicit "not available" signal: the window has
    /// not been fetched (or only partially), and the caller should issue a
    /// network request. It is distinct from an empty page.
    ///
    /// # Errors
    /// Returns [`FieldCacheError::UnknownField`] when no policy is
    /// registered for the field
    pub fn read_page(
        &self,
        field: &str,
        args: &Map<String, Value>,
        window: &RequestWindow,
    ) -> Result<Option<PageEnvelope<RawRecord>>, FieldCacheError> {
        let policy = self.policy(field)?;
        let key = policy.key_for(field, args);
        Ok(self.store.read(&key, window))
    }

    /// Drop the aggregate for one field/argument combination
    ///
    /// # Errors
    /// Returns [`FieldCacheError::UnknownField`] when no policy is
    /// registered for the field
    pub fn invalidate_partition(
        &self,
        field: &str,
        args: &Map<String, Value>,
    ) -> Result<(), FieldCacheError> {
        let policy = self.policy(field)?;
        let key = policy.key_for(field, args);
        tracing::debug!(partition = %key, "invalidated partition");
        self.store.invalidate(&key);
        Ok(())
    }

    /// Drop every cached aggregate
    pub fn clear(&self) {
        tracing::debug!("cleared all partitions");
        self.store.invalidate_all();
    }

    /// Store statistics
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    fn policy(&self, field: &str) -> Result<FieldPolicy, FieldCacheError> {
        self.policies
            .get(field)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FieldCacheError::UnknownField(field.to_string()))
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
