//! Error types for the FieldCache facade
//!
//! Registration and wiring failures surface here; merge and boundary
//! failures bubble up from the policy and store crates via `#[from]`.

use fieldcache_store::StoreError;
use fieldcache_types::ShapeError;

/// Main FieldCache error type
#[derive(Debug, thiserror::Error)]
pub enum FieldCacheError {
    /// No policy registered for the queried field
    #[error("no policy registered for field `{0}`")]
    UnknownField(String),

    /// A policy for this field is already registered
    #[error("policy already registered for field `{0}`")]
    DuplicatePolicy(String),

    /// Policy references a merge strategy the registry doesn't know
    #[error("unknown merge strategy `{strategy}` for field `{field}`")]
    UnknownStrategy {
        /// Field the policy was registered for
        field: String,
        /// The unrecognized strategy name
        strategy: String,
    },

    /// Response failed boundary validation
    #[error("malformed response: {0}")]
    Shape(#[from] ShapeError),

    /// The store rejected the merge
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl FieldCacheError {
    /// Whether this error signals a misconfigured policy rather than bad data
    #[inline]
    #[must_use]
    pub fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::UnknownField(_) | Self::DuplicatePolicy(_) | Self::UnknownStrategy { .. }
        )
    }
}
