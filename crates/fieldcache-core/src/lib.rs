//! FieldCache Core - client facade
//!
//! The session-lifetime cache client that:
//! - Holds the per-field policy registry
//! - Validates responses at the cache boundary
//! - Dispatches merges to the configured strategy per field
//! - Serves window reads out of the partitioned aggregate store
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldcache_core::{CacheConfig, FieldCache};
//! use fieldcache_policy::{FieldPolicy, PartitionSpec};
//! use fieldcache_types::RequestWindow;
//!
//! let cache = FieldCache::new(CacheConfig::new());
//! cache.register_policy(
//!     "searchCollections",
//!     FieldPolicy::new("collections")
//!         .with_partition(PartitionSpec::by_args(["filters.status"])?),
//! )?;
//!
//! cache.write_response("searchCollections", &args, &response)?;
//! let window = RequestWindow::new(2, 30)?;
//! match cache.read_page("searchCollections", &args, &window)? {
//!     Some(page) => render(page),
//!     None => fetch_from_network(),
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod cache;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use cache::FieldCache;
pub use config::CacheConfig;
pub use error::FieldCacheError;

pub use fieldcache_policy::{
    ArgPath, FieldPolicy, MergeHint, PartitionKey, PartitionSpec, DEFAULT_ID_FIELD,
};
pub use fieldcache_store::StoreStats;
pub use fieldcache_summary::{group_by_property, property_label_counts, LabelCount};
pub use fieldcache_types::{
    Aggregate, PageEnvelope, PageMeta, RawRecord, Record, RequestWindow, ShapeError,
};
