//! Merge and partitioning errors

use fieldcache_types::ShapeError;

/// Failures combining or partitioning paginated data
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Incoming page size differs from the aggregate's merge granularity
    ///
    /// Offsets are computed from the merge-time page size; changing it
    /// mid-partition requires invalidating the partition first.
    #[error("page size changed mid-partition (existing perPage={existing}, incoming perPage={incoming})")]
    WindowMismatch {
        /// Page size the aggregate was built with
        existing: u32,
        /// Page size of the incoming page
        incoming: u32,
    },

    /// Incoming page carries more records than its own page size allows
    #[error("page {page} carries {len} records but perPage is {per_page}")]
    OversizedPage {
        /// Reported page number
        page: u32,
        /// Number of records received
        len: usize,
        /// Reported page size
        per_page: u32,
    },

    /// Append strategy received a page out of sequence
    #[error("append merge expected page {expected}, got page {got}")]
    NonMonotonicPage {
        /// Next page the strategy would accept
        expected: u32,
        /// Page that actually arrived
        got: u32,
    },

    /// Append strategy received an identity already present in the aggregate
    #[error("append merge received duplicate record `{id}` on page {page}")]
    DuplicateRecord {
        /// Identity of the duplicated record
        id: String,
        /// Page the duplicate arrived on
        page: u32,
    },

    /// Argument path is empty or contains an empty segment
    #[error("invalid argument path `{path}`")]
    InvalidArgPath {
        /// The offending path
        path: String,
    },

    /// Boundary validation failure
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
