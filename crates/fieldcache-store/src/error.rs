//! Store errors

use fieldcache_policy::PolicyError;

/// Failures applying a page to the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The configured merge strategy rejected the page
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
