//! Testing utilities for FieldCache workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use fieldcache_core::{CacheConfig, FieldCache};
use fieldcache_policy::{FieldPolicy, PartitionSpec};
use fieldcache_types::RequestWindow;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

/// Canonical topic set used by curation summary panels
pub static CANONICAL_TOPICS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "BUSINESS",
        "CAREER",
        "EDUCATION",
        "ENTERTAINMENT",
        "FOOD",
        "GAMING",
        "HEALTH_FITNESS",
        "PARENTING",
        "PERSONAL_FINANCE",
        "POLITICS",
        "SCIENCE",
        "SELF_IMPROVEMENT",
        "SPORTS",
        "TECHNOLOGY",
        "TRAVEL",
    ]
});

pub fn collection(id: &str, status: &str) -> Value {
    json!({
        "externalId": id,
        "title": format!("Collection {id}"),
        "status": status,
        "language": "EN",
    })
}

pub fn collections_response(
    ids: &[&str],
    status: &str,
    page: u32,
    per_page: u32,
    total: u32,
) -> Value {
    let records: Vec<Value> = ids.iter().map(|id| collection(id, status)).collect();
    json!({
        "collections": records,
        "pagination": {
            "currentPage": page,
            "perPage": per_page,
            "totalPages": total.div_ceil(per_page),
            "totalResults": total,
        },
    })
}

pub fn status_args(status: &str, page: u32, per_page: u32) -> Map<String, Value> {
    json!({
        "filters": { "status": status },
        "page": page,
        "perPage": per_page,
    })
    .as_object()
    .cloned()
    .unwrap()
}

pub fn window(page: u32, per_page: u32) -> RequestWindow {
    RequestWindow::new(page, per_page).unwrap()
}

pub fn collections_policy() -> FieldPolicy {
    FieldPolicy::new("collections")
        .with_partition(PartitionSpec::by_args(["filters.status"]).unwrap())
}

pub fn setup_console_cache() -> FieldCache {
    let cache = FieldCache::new(CacheConfig::new());
    cache
        .register_policy("searchCollections", collections_policy())
        .unwrap();
    cache
}

/// Initialize test logging once; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
