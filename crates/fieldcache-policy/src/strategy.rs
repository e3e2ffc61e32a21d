//! Merge strategy trait
//!
//! Provides the [`MergeStrategy`] trait for pluggable page-combination
//! behavior when a fetched page is written into a partition aggregate.

use crate::error::PolicyError;
use fieldcache_types::{Aggregate, PageEnvelope, Record};

/// Merge strategy for combining a fetched page into a partition aggregate
///
/// # Safety
/// Implementations must be pure: `existing` is never mutated, and merging
/// the same `(existing, incoming)` pair must be deterministic and
/// idempotent, so the owning cache can rely on referential transparency
/// for change detection and concurrent readers never observe a
/// half-updated aggregate.
pub trait MergeStrategy: Send + Sync + std::fmt::Debug {
    /// Merge a freshly fetched page into the existing aggregate, if any
    ///
    /// When `existing` is absent this is the first page fetched for the
    /// partition and the result is the incoming page alone.
    ///
    /// # Errors
    /// Returns [`PolicyError`] when the page cannot be combined under this
    /// strategy's arrival assumptions
    fn merge<R: Record>(
        &self,
        existing: Option<&Aggregate<R>>,
        incoming: &PageEnvelope<R>,
    ) -> Result<Aggregate<R>, PolicyError>;

    /// Strategy name (for registry lookup and logging)
    fn name(&self) -> &'static str;
}

/// Reject a page that carries more records than its own page size allows
pub(crate) fn check_page_size<R: Record>(incoming: &PageEnvelope<R>) -> Result<(), PolicyError> {
    if incoming.records.len() > incoming.meta.per_page as usize {
        return Err(PolicyError::OversizedPage {
            page: incoming.meta.current_page,
            len: incoming.records.len(),
            per_page: incoming.meta.per_page,
        });
    }
    Ok(())
}
