//! Record identity for cached domain items
//!
//! Defines the [`Record`] trait for uniquely identified domain records and
//! [`RawRecord`], the JSON-boundary implementation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Uniquely identified domain record stored in an aggregate
///
/// # Contract
/// - `external_id` must be stable across fetches of the same record
/// - Two records with equal identities are the same item for merge
///   purposes, regardless of payload differences
pub trait Record: Clone + Debug {
    /// Stable identity used for deduplication across pages
    fn external_id(&self) -> &str;
}

/// JSON-backed record as received from a query response
///
/// The identity is extracted once at the response boundary so merge and
/// read paths never re-inspect the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    external_id: String,
    value: Value,
}

impl RawRecord {
    /// Create a record from an already-extracted identity and payload
    #[inline]
    #[must_use]
    pub fn new(external_id: impl Into<String>, value: Value) -> Self {
        Self {
            external_id: external_id.into(),
            value,
        }
    }

    /// Record payload as received from the server
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the record, returning its payload
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Record for RawRecord {
    fn external_id(&self) -> &str {
        &self.external_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_record_exposes_identity_and_payload() {
        let record = RawRecord::new("col-1", json!({"externalId": "col-1", "title": "Saved"}));
        assert_eq!(record.external_id(), "col-1");
        assert_eq!(record.value()["title"], "Saved");
    }

    #[test]
    fn raw_record_into_value() {
        let record = RawRecord::new("col-1", json!({"externalId": "col-1"}));
        assert_eq!(record.into_value()["externalId"], "col-1");
    }
}
