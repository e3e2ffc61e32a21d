//! FieldCache configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// FieldCache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of partition aggregates held before LRU eviction
    pub max_partitions: u64,
    /// Optional lifetime for each partition aggregate
    pub partition_ttl: Option<Duration>,
}

impl CacheConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max partition count
    #[inline]
    #[must_use]
    pub fn with_max_partitions(mut self, max: u64) -> Self {
        self.max_partitions = max;
        self
    }

    /// With partition TTL
    #[inline]
    #[must_use]
    pub fn with_partition_ttl(mut self, ttl: Duration) -> Self {
        self.partition_ttl = Some(ttl);
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_partitions: 1_000,
            partition_ttl: None,
        }
    }
}
