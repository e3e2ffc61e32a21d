//! Windowed merge strategy
//!
//! Offset placement tolerating out-of-order page arrival.

use crate::error::PolicyError;
use crate::strategy::{check_page_size, MergeStrategy};
use fieldcache_types::{Aggregate, PageEnvelope, Record};
use std::collections::HashSet;

/// Offset placement with stale-duplicate clearing
///
/// # Characteristics
/// - Places the incoming page at the absolute offset implied by its
///   `currentPage` and `perPage`, overwriting stale entries at that offset
/// - Tolerates out-of-order arrival (backward pagination, racing
///   fetch-more calls); a later page merged first leaves unfetched holes
/// - Clears records elsewhere in the aggregate whose identity reappears in
///   the incoming page (items shift between pages when the server-side
///   list changes)
/// - Adopts the latest-known totals from the incoming page and drops any
///   stale tail beyond the new total
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowedMergeStrategy;

impl WindowedMergeStrategy {
    /// Create new windowed strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the merged slot list without touching `existing`
    fn place<R: Record>(
        existing: Option<&Aggregate<R>>,
        incoming: &PageEnvelope<R>,
    ) -> Vec<Option<R>> {
        let offset = incoming.offset();
        let end = offset + incoming.records.len();
        let incoming_ids: HashSet<&str> =
            incoming.records.iter().map(Record::external_id).collect();

        let mut slots: Vec<Option<R>> = match existing {
            Some(aggregate) => aggregate.slots().to_vec(),
            None => Vec::new(),
        };

        // Clear stale copies of incoming records that shifted to another offset.
        for (index, slot) in slots.iter_mut().enumerate() {
            let in_window = index >= offset && index < end;
            if in_window {
                continue;
            }
            if let Some(record) = slot.as_ref() {
                if incoming_ids.contains(record.external_id()) {
                    *slot = None;
                }
            }
        }

        if slots.len() < end {
            slots.resize_with(end, || None);
        }
        for (index, record) in incoming.records.iter().enumerate() {
            slots[offset + index] = Some(record.clone());
        }

        // A shrunk total drops the stale tail, but never the page just written.
        let keep = (incoming.meta.total_results as usize).max(end);
        slots.truncate(keep);

        slots
    }
}

impl MergeStrategy for WindowedMergeStrategy {
    fn merge<R: Record>(
        &self,
        existing: Option<&Aggregate<R>>,
        incoming: &PageEnvelope<R>,
    ) -> Result<Aggregate<R>, PolicyError> {
        check_page_size(incoming)?;

        if let Some(aggregate) = existing {
            if aggregate.meta().per_page != incoming.meta.per_page {
                return Err(PolicyError::WindowMismatch {
                    existing: aggregate.meta().per_page,
                    incoming: incoming.meta.per_page,
                });
            }
        }

        let slots = Self::place(existing, incoming);
        tracing::debug!(
            page = incoming.meta.current_page,
            records = incoming.records.len(),
            slots = slots.len(),
            "windowed merge placed page"
        );
        Ok(Aggregate::from_parts(slots, incoming.meta))
    }

    fn name(&self) -> &'static str {
        crate::registry::WINDOWED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcache_types::{PageMeta, RawRecord};
    use serde_json::json;

    fn record(id: &str) -> RawRecord {
        RawRecord::new(id, json!({ "externalId": id }))
    }

    fn page(current_page: u32, per_page: u32, total_results: u32, ids: &[&str]) -> PageEnvelope<RawRecord> {
        let total_pages = total_results.div_ceil(per_page);
        PageEnvelope::new(
            ids.iter().map(|id| record(id)).collect(),
            PageMeta {
                current_page,
                per_page,
                total_pages,
                total_results,
            },
        )
        .unwrap()
    }

    fn ids(aggregate: &Aggregate<RawRecord>) -> Vec<Option<String>> {
        aggregate
            .slots()
            .iter()
            .map(|slot| slot.as_ref().map(|r| r.external_id().to_string()))
            .collect()
    }

    #[test]
    fn first_merge_is_the_incoming_page() {
        let strategy = WindowedMergeStrategy::new();
        let merged = strategy.merge(None, &page(1, 2, 4, &["a", "b"])).unwrap();

        assert_eq!(ids(&merged), vec![Some("a".into()), Some("b".into())]);
        assert_eq!(merged.meta().current_page, 1);
    }

    #[test]
    fn out_of_order_first_page_leaves_holes() {
        let strategy = WindowedMergeStrategy::new();
        let merged = strategy.merge(None, &page(2, 2, 4, &["c", "d"])).unwrap();

        assert_eq!(
            ids(&merged),
            vec![None, None, Some("c".into()), Some("d".into())]
        );
    }

    #[test]
    fn backward_pagination_fills_the_gap() {
        let strategy = WindowedMergeStrategy::new();
        let later = strategy.merge(None, &page(2, 2, 4, &["c", "d"])).unwrap();
        let merged = strategy
            .merge(Some(&later), &page(1, 2, 4, &["a", "b"]))
            .unwrap();

        assert_eq!(
            ids(&merged),
            vec![
                Some("a".into()),
                Some("b".into()),
                Some("c".into()),
                Some("d".into())
            ]
        );
        // currentPage always reflects the most recently merged page.
        assert_eq!(merged.meta().current_page, 1);
    }

    #[test]
    fn remerging_the_same_page_is_idempotent() {
        let strategy = WindowedMergeStrategy::new();
        let once = strategy.merge(None, &page(1, 2, 4, &["a", "b"])).unwrap();
        let twice = strategy
            .merge(Some(&once), &page(1, 2, 4, &["a", "b"]))
            .unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn refetched_page_overwrites_stale_entries() {
        let strategy = WindowedMergeStrategy::new();
        let stale = strategy.merge(None, &page(1, 2, 4, &["a", "b"])).unwrap();
        let merged = strategy
            .merge(Some(&stale), &page(1, 2, 4, &["a", "e"]))
            .unwrap();

        assert_eq!(ids(&merged), vec![Some("a".into()), Some("e".into())]);
    }

    #[test]
    fn shifted_record_is_cleared_from_its_old_offset() {
        let strategy = WindowedMergeStrategy::new();
        let first = strategy.merge(None, &page(1, 2, 4, &["a", "b"])).unwrap();
        // A new record was inserted server-side; "b" shifted onto page 2.
        let merged = strategy
            .merge(Some(&first), &page(2, 2, 5, &["b", "c"]))
            .unwrap();

        assert_eq!(
            ids(&merged),
            vec![Some("a".into()), None, Some("b".into()), Some("c".into())]
        );
    }

    #[test]
    fn shrunk_totals_truncate_the_stale_tail() {
        let strategy = WindowedMergeStrategy::new();
        let first = strategy.merge(None, &page(1, 4, 8, &["a", "b", "c", "d"])).unwrap();
        let second = strategy
            .merge(Some(&first), &page(2, 4, 8, &["e", "f", "g", "h"]))
            .unwrap();
        // Six records were deleted server-side between fetches.
        let merged = strategy
            .merge(Some(&second), &page(1, 4, 2, &["a", "b"]))
            .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.meta().total_results, 2);
    }

    #[test]
    fn per_page_change_is_rejected() {
        let strategy = WindowedMergeStrategy::new();
        let first = strategy.merge(None, &page(1, 2, 4, &["a", "b"])).unwrap();
        let err = strategy
            .merge(Some(&first), &page(1, 4, 4, &["a", "b", "c", "d"]))
            .unwrap_err();

        assert!(matches!(
            err,
            PolicyError::WindowMismatch {
                existing: 2,
                incoming: 4
            }
        ));
    }

    #[test]
    fn oversized_page_is_rejected() {
        let strategy = WindowedMergeStrategy::new();
        let err = strategy
            .merge(None, &page(1, 2, 4, &["a", "b", "c"]))
            .unwrap_err();

        assert!(matches!(err, PolicyError::OversizedPage { len: 3, .. }));
    }
}
