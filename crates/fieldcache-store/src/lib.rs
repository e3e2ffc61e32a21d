//! Partitioned aggregate store
//!
//! Holds one merged [`Aggregate`](fieldcache_types::Aggregate) per partition
//! key, bounded by capacity and optional TTL. The store is an explicit,
//! injected object, not a framework-global singleton, so the merge, read,
//! and key functions stay independently unit-testable.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod store;

pub use error::StoreError;
pub use store::{AggregateStore, StoreStats};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
