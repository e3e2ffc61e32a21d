//! Boundary validation errors

/// Malformed or misconfigured response shapes
///
/// Everything here is a programmer error (a misconfigured policy or a
/// contract-violating backend), surfaced loudly at the cache boundary so
/// incorrect pagination cannot degrade silently.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// Response root was not a JSON object
    #[error("response is not an object")]
    ResponseNotObject,

    /// Configured list field missing from the response
    #[error("list field `{field}` missing from response")]
    MissingListField {
        /// The configured list field name
        field: String,
    },

    /// Configured list field present but not an array
    #[error("list field `{field}` is not an array")]
    ListFieldNotArray {
        /// The configured list field name
        field: String,
    },

    /// A record is missing its identity field
    #[error("record {index} missing identity field `{field}`")]
    MissingRecordId {
        /// The configured identity field name
        field: String,
        /// Position of the offending record within the page
        index: usize,
    },

    /// Pagination object missing from the response
    #[error("pagination object missing from response")]
    MissingPagination,

    /// Pagination object present but undecodable
    #[error("malformed pagination object: {0}")]
    MalformedPagination(String),

    /// Server-reported metadata is unusable
    #[error("invalid pagination metadata (currentPage={current_page}, perPage={per_page})")]
    InvalidMeta {
        /// Reported current page
        current_page: u32,
        /// Reported page size
        per_page: u32,
    },

    /// Requested window is unusable
    #[error("invalid request window (page={page}, perPage={per_page})")]
    InvalidWindow {
        /// Requested page
        page: u32,
        /// Requested page size
        per_page: u32,
    },
}
