//! Pagination metadata attached to every page response

use crate::error::ShapeError;
use serde::{Deserialize, Serialize};

/// Latest-known pagination bookkeeping for one partition
///
/// Wire names follow the GraphQL response shape (`currentPage`, `perPage`,
/// `totalPages`, `totalResults`). `current_page` always reflects the most
/// recently merged page; totals may drift between fetches as records are
/// added or removed server-side, so the newest values win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Most recently fetched page (1-based)
    pub current_page: u32,
    /// Page size the server used for this response
    pub per_page: u32,
    /// Total pages reported by the server
    pub total_pages: u32,
    /// Total results reported by the server
    pub total_results: u32,
}

impl PageMeta {
    /// Validate server-reported metadata
    ///
    /// # Errors
    /// Returns [`ShapeError::InvalidMeta`] when `current_page` or `per_page`
    /// is zero
    pub fn validated(self) -> Result<Self, ShapeError> {
        if self.current_page == 0 || self.per_page == 0 {
            return Err(ShapeError::InvalidMeta {
                current_page: self.current_page,
                per_page: self.per_page,
            });
        }
        Ok(self)
    }

    /// Absolute item offset where `current_page` starts
    #[inline]
    #[must_use]
    pub fn page_offset(&self) -> usize {
        (self.current_page as usize - 1) * self.per_page as usize
    }
}
