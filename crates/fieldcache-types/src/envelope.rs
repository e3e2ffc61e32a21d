//! One page of records plus its pagination metadata
//!
//! [`PageEnvelope::from_response`] is the cache-framework boundary: the only
//! place loosely-shaped JSON is accepted. Malformed input is rejected with a
//! typed [`ShapeError`] instead of propagating missing-field lookups into
//! the merge path.

use crate::error::ShapeError;
use crate::meta::PageMeta;
use crate::record::{RawRecord, Record};
use serde_json::Value;

/// Field name the pagination object is expected under
pub const PAGINATION_FIELD: &str = "pagination";

/// One fetched page for a partition
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<R: Record> {
    /// Records in server order
    pub records: Vec<R>,
    /// Pagination metadata for this page
    pub meta: PageMeta,
}

impl<R: Record> PageEnvelope<R> {
    /// Create an envelope from already-typed parts
    ///
    /// # Errors
    /// Returns [`ShapeError::InvalidMeta`] when the metadata is unusable
    pub fn new(records: Vec<R>, meta: PageMeta) -> Result<Self, ShapeError> {
        Ok(Self {
            records,
            meta: meta.validated()?,
        })
    }

    /// Absolute item offset where this page starts
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.meta.page_offset()
    }
}

impl PageEnvelope<RawRecord> {
    /// Parse one query response at the cache boundary
    ///
    /// `list_field` names the operation-specific list (`"collections"`,
    /// `"authors"`); `id_field` names the identity property on each record.
    /// A missing list field means a misconfigured policy, not a runtime
    /// condition to recover from.
    ///
    /// # Errors
    /// - [`ShapeError::ResponseNotObject`] if the response root is not an object
    /// - [`ShapeError::MissingListField`] / [`ShapeError::ListFieldNotArray`]
    ///   when `list_field` is absent or mis-shaped
    /// - [`ShapeError::MissingRecordId`] when a record lacks `id_field`
    /// - [`ShapeError::MissingPagination`] / [`ShapeError::MalformedPagination`]
    ///   / [`ShapeError::InvalidMeta`] for an unusable pagination object
    pub fn from_response(
        response: &Value,
        list_field: &str,
        id_field: &str,
    ) -> Result<Self, ShapeError> {
        let object = response.as_object().ok_or(ShapeError::ResponseNotObject)?;

        let list = object
            .get(list_field)
            .ok_or_else(|| ShapeError::MissingListField {
                field: list_field.to_string(),
            })?;
        let items = list.as_array().ok_or_else(|| ShapeError::ListFieldNotArray {
            field: list_field.to_string(),
        })?;

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let id = item
                .get(id_field)
                .and_then(Value::as_str)
                .ok_or_else(|| ShapeError::MissingRecordId {
                    field: id_field.to_string(),
                    index,
                })?;
            records.push(RawRecord::new(id, item.clone()));
        }

        let meta_value = object
            .get(PAGINATION_FIELD)
            .ok_or(ShapeError::MissingPagination)?;
        let meta: PageMeta = serde_json::from_value(meta_value.clone())
            .map_err(|source| ShapeError::MalformedPagination(source.to_string()))?;

        Self::new(records, meta)
    }
}
