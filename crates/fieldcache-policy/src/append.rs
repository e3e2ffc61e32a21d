//! Append merge strategy
//!
//! Plain concatenation, valid only for validated monotonic arrival.

use crate::error::PolicyError;
use crate::strategy::{check_page_size, MergeStrategy};
use fieldcache_types::{Aggregate, PageEnvelope, Record};

/// Concatenation with monotonicity validation
///
/// # Characteristics
/// - First merge must be page 1; each subsequent merge must be exactly the
///   next page with the same `perPage`
/// - Non-overlap is validated, not assumed: an incoming identity already
///   present in the aggregate is rejected
/// - Cheaper than windowed placement, but unusable for backward pagination
///   or racing fetch-more calls
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendMergeStrategy;

impl AppendMergeStrategy {
    /// Create new append strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MergeStrategy for AppendMergeStrategy {
    fn merge<R: Record>(
        &self,
        existing: Option<&Aggregate<R>>,
        incoming: &PageEnvelope<R>,
    ) -> Result<Aggregate<R>, PolicyError> {
        check_page_size(incoming)?;

        let Some(aggregate) = existing else {
            if incoming.meta.current_page != 1 {
                tracing::warn!(
                    got = incoming.meta.current_page,
                    "append merge rejected out-of-order first page"
                );
                return Err(PolicyError::NonMonotonicPage {
                    expected: 1,
                    got: incoming.meta.current_page,
                });
            }
            let slots = incoming.records.iter().cloned().map(Some).collect();
            return Ok(Aggregate::from_parts(slots, incoming.meta));
        };

        if aggregate.meta().per_page != incoming.meta.per_page {
            return Err(PolicyError::WindowMismatch {
                existing: aggregate.meta().per_page,
                incoming: incoming.meta.per_page,
            });
        }

        let expected = aggregate.meta().current_page + 1;
        if incoming.meta.current_page != expected {
            tracing::warn!(
                expected,
                got = incoming.meta.current_page,
                "append merge rejected non-monotonic page"
            );
            return Err(PolicyError::NonMonotonicPage {
                expected,
                got: incoming.meta.current_page,
            });
        }

        for record in &incoming.records {
            if aggregate.contains_id(record.external_id()) {
                return Err(PolicyError::DuplicateRecord {
                    id: record.external_id().to_string(),
                    page: incoming.meta.current_page,
                });
            }
        }

        let mut slots = aggregate.slots().to_vec();
        slots.extend(incoming.records.iter().cloned().map(Some));
        tracing::debug!(
            page = incoming.meta.current_page,
            records = incoming.records.len(),
            "append merge extended aggregate"
        );
        Ok(Aggregate::from_parts(slots, incoming.meta))
    }

    fn name(&self) -> &'static str {
        crate::registry::APPEND
    }
}
