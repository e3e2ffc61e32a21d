//! FieldCache Policy System
//!
//! Pluggable field policies for paginated query caching.
//!
//! # Core Concepts
//!
//! - [`PartitionSpec`]: which query-argument subset partitions the cache
//! - [`MergeStrategy`]: core trait for page-combination strategies
//! - [`WindowedMergeStrategy`]: offset placement tolerating out-of-order
//!   arrival (the default)
//! - [`AppendMergeStrategy`]: validated monotonic concatenation
//! - [`read_window`]: slice the merged aggregate for one requested window
//! - [`FieldPolicy`]: per-field bundle of the above
//! - [`MergeRegistry`]: registry for strategy selection
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldcache_policy::{FieldPolicy, PartitionSpec, WindowedMergeStrategy, read_window};
//!
//! let policy = FieldPolicy::new("collections")
//!     .with_partition(PartitionSpec::by_args(["filters.status"])?);
//!
//! let key = policy.key_for("collections", &args);
//! let merged = WindowedMergeStrategy::new().merge(existing.as_ref(), &incoming)?;
//! let slice = read_window(Some(&merged), &window);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Strategy implementations
mod append;
mod error;
mod field_policy;
mod partition;
mod read;
mod registry;
mod strategy;
mod windowed;

// Re-exports
pub use append::AppendMergeStrategy;
pub use error::PolicyError;
pub use field_policy::{FieldPolicy, DEFAULT_ID_FIELD};
pub use partition::{ArgPath, PartitionKey, PartitionSpec};
pub use read::read_window;
pub use registry::{MergeHint, MergeRegistry, MergeSelector, APPEND, WINDOWED};
pub use strategy::MergeStrategy;
pub use windowed::WindowedMergeStrategy;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use fieldcache_types::{PageEnvelope, PageMeta, RawRecord, Record, RequestWindow};
    use proptest::prelude::*;
    use serde_json::json;

    fn page(current_page: u32, per_page: u32, total: u32, ids: &[String]) -> PageEnvelope<RawRecord> {
        PageEnvelope::new(
            ids.iter()
                .map(|id| RawRecord::new(id.clone(), json!({ "externalId": id })))
                .collect(),
            PageMeta {
                current_page,
                per_page,
                total_pages: total.div_ceil(per_page),
                total_results: total,
            },
        )
        .unwrap()
    }

    fn page_ids(offset: usize, count: usize) -> Vec<String> {
        (offset..offset + count).map(|i| format!("r{i}")).collect()
    }

    #[test]
    fn registry_matches_shipped_strategies() {
        let registry = MergeRegistry::with_defaults();
        assert!(registry.contains(WindowedMergeStrategy::new().name()));
        assert!(registry.contains(AppendMergeStrategy::new().name()));
    }

    #[test]
    fn partitions_never_share_aggregates() {
        let policy = FieldPolicy::new("collections")
            .with_partition(PartitionSpec::by_args(["status"]).unwrap());
        let strategy = WindowedMergeStrategy::new();

        let draft_args = json!({"status": "DRAFT", "page": 1})
            .as_object()
            .cloned()
            .unwrap();
        let published_args = json!({"status": "PUBLISHED", "page": 1})
            .as_object()
            .cloned()
            .unwrap();

        let draft_key = policy.key_for("collections", &draft_args);
        let published_key = policy.key_for("collections", &published_args);
        assert_ne!(draft_key, published_key);

        // Each key holds its own aggregate; merging one leaves the other alone.
        let draft = strategy
            .merge(None, &page(1, 2, 2, &page_ids(0, 2)))
            .unwrap();
        let published = strategy
            .merge(None, &page(1, 2, 2, &["p0".to_string(), "p1".to_string()]))
            .unwrap();
        assert_ne!(
            draft.get(0).unwrap().external_id(),
            published.get(0).unwrap().external_id()
        );
    }

    proptest! {
        #[test]
        fn prop_windowed_merge_is_idempotent(
            current_page in 1..6u32,
            per_page in 1..6u32,
            count in 0..6usize,
        ) {
            let count = count.min(per_page as usize);
            let strategy = WindowedMergeStrategy::new();
            let offset = (current_page as usize - 1) * per_page as usize;
            let envelope = page(current_page, per_page, 100, &page_ids(offset, count));

            let once = strategy.merge(None, &envelope).unwrap();
            let twice = strategy.merge(Some(&once), &envelope).unwrap();

            prop_assert_eq!(&once, &twice);
        }

        #[test]
        fn prop_merged_page_reads_back_exactly(
            current_page in 1..6u32,
            per_page in 1..6u32,
        ) {
            let strategy = WindowedMergeStrategy::new();
            let offset = (current_page as usize - 1) * per_page as usize;
            let ids = page_ids(offset, per_page as usize);
            let envelope = page(current_page, per_page, 100, &ids);

            let merged = strategy.merge(None, &envelope).unwrap();
            let window = RequestWindow::new(current_page, per_page).unwrap();
            let slice = read_window(Some(&merged), &window).unwrap();

            let read_ids: Vec<String> = slice
                .records
                .iter()
                .map(|r| r.external_id().to_string())
                .collect();
            prop_assert_eq!(read_ids, ids);
        }
    }
}
