//! Window reads over a merged aggregate

use fieldcache_types::{Aggregate, PageEnvelope, PageMeta, Record, RequestWindow};

/// Slice the merged aggregate for one requested window
///
/// Returns `None` (the explicit "not available" signal, distinct from an
/// empty page) when the aggregate is absent, the window lies beyond the
/// total or fetched data, or any slot in the window is an unfetched hole.
/// The caller is expected to issue a network request in that case.
///
/// The requested window is the source of truth, not the aggregate's own
/// `current_page` bookkeeping: the windowed merge places every page at its
/// true absolute offset, so any fully fetched window is servable regardless
/// of which page was merged last. Offsets are absolute item offsets over a
/// flat ordered list, so reads may even use a different `perPage`
/// granularity than the merges that built the aggregate. Returned metadata
/// carries the aggregate's latest-known totals with `current_page` set to
/// the requested page.
#[must_use]
pub fn read_window<R: Record>(
    existing: Option<&Aggregate<R>>,
    window: &RequestWindow,
) -> Option<PageEnvelope<R>> {
    let Some(aggregate) = existing else {
        tracing::trace!(page = window.page(), "read miss: no aggregate for partition");
        return None;
    };

    let offset = window.offset();
    let total = aggregate.meta().total_results as usize;
    let expected = (window.per_page() as usize).min(total.saturating_sub(offset));
    if expected == 0 {
        tracing::trace!(
            page = window.page(),
            total,
            "read miss: window beyond available data"
        );
        return None;
    }

    let mut records = Vec::with_capacity(expected);
    for index in offset..offset + expected {
        match aggregate.get(index) {
            Some(record) => records.push(record.clone()),
            None => {
                tracing::trace!(
                    page = window.page(),
                    index,
                    "read miss: unfetched slot in window"
                );
                return None;
            }
        }
    }

    tracing::trace!(page = window.page(), records = records.len(), "read hit");
    Some(PageEnvelope {
        records,
        meta: PageMeta {
            current_page: window.page(),
            per_page: window.per_page(),
            total_pages: aggregate.meta().total_pages,
            total_results: aggregate.meta().total_results,
        },
    })
}
