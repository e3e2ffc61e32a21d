//! Request windows for paginated reads

use crate::error::ShapeError;

/// A `(page, perPage)` pair describing which slice of an aggregate a caller wants
///
/// Both components are validated at construction: `page >= 1`, `per_page >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestWindow {
    page: u32,
    per_page: u32,
}

impl RequestWindow {
    /// Create a validated window
    ///
    /// # Errors
    /// Returns [`ShapeError::InvalidWindow`] if `page` or `per_page` is zero
    pub fn new(page: u32, per_page: u32) -> Result<Self, ShapeError> {
        if page == 0 || per_page == 0 {
            return Err(ShapeError::InvalidWindow { page, per_page });
        }
        Ok(Self { page, per_page })
    }

    /// Requested page number (1-based)
    #[inline]
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size
    #[inline]
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Absolute item offset of the first slot in this window
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}
