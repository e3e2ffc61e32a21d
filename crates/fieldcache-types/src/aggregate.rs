//! Merged aggregate for one partition key

use crate::meta::PageMeta;
use crate::record::Record;

/// Accumulated, merged record list plus pagination metadata for one partition
///
/// Slots are indexed by absolute item offset. `None` marks an offset that has
/// not been fetched yet: pages may arrive out of order, leaving holes the
/// read path must report as unfetched. The slot list may exceed one page (it
/// accumulates across fetches); `meta.current_page` reflects the most
/// recently merged page.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<R: Record> {
    slots: Vec<Option<R>>,
    meta: PageMeta,
}

impl<R: Record> Aggregate<R> {
    /// Assemble an aggregate from raw parts
    #[inline]
    #[must_use]
    pub fn from_parts(slots: Vec<Option<R>>, meta: PageMeta) -> Self {
        Self { slots, meta }
    }

    /// Slot list indexed by absolute item offset
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<R>] {
        &self.slots
    }

    /// Latest-known pagination metadata
    #[inline]
    #[must_use]
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Number of slots currently tracked, fetched or hole
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are tracked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots actually holding a fetched record
    #[must_use]
    pub fn fetched_len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Record at an absolute offset, if fetched
    #[inline]
    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&R> {
        self.slots.get(offset).and_then(Option::as_ref)
    }

    /// Whether a record with this identity is present anywhere in the aggregate
    #[must_use]
    pub fn contains_id(&self, external_id: &str) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|record| record.external_id() == external_id)
    }

    /// Decompose into raw parts
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<Option<R>>, PageMeta) {
        (self.slots, self.meta)
    }
}
