//! Per-field cache behavior

use crate::partition::{PartitionKey, PartitionSpec};
use crate::registry::{MergeHint, MergeSelector};
use serde_json::{Map, Value};

/// Identity field used when a policy does not override it
pub const DEFAULT_ID_FIELD: &str = "externalId";

/// Cache behavior for one paginated query field
///
/// Bundles the field-policy concerns for a field: which response list to
/// read, which record property carries identity, how to partition the
/// cache, and which merge strategy combines pages.
#[derive(Debug, Clone)]
pub struct FieldPolicy {
    list_field: String,
    id_field: String,
    partition: PartitionSpec,
    merge_strategy: &'static str,
}

impl FieldPolicy {
    /// Policy with defaults: identity `externalId`, shared partition,
    /// windowed merge
    #[must_use]
    pub fn new(list_field: impl Into<String>) -> Self {
        Self {
            list_field: list_field.into(),
            id_field: DEFAULT_ID_FIELD.to_string(),
            partition: PartitionSpec::Shared,
            merge_strategy: MergeSelector::new().select_name(),
        }
    }

    /// Override the identity field
    #[inline]
    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Set the partition spec
    #[inline]
    #[must_use]
    pub fn with_partition(mut self, partition: PartitionSpec) -> Self {
        self.partition = partition;
        self
    }

    /// Pick the merge strategy via a hint
    #[inline]
    #[must_use]
    pub fn with_merge_hint(mut self, hint: MergeHint) -> Self {
        self.merge_strategy = MergeSelector::new().with_hint(hint).select_name();
        self
    }

    /// Name of the response list field
    #[inline]
    #[must_use]
    pub fn list_field(&self) -> &str {
        &self.list_field
    }

    /// Name of the record identity field
    #[inline]
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// How the cache is partitioned for this field
    #[inline]
    #[must_use]
    pub fn partition(&self) -> &PartitionSpec {
        &self.partition
    }

    /// Configured merge strategy name
    #[inline]
    #[must_use]
    pub fn merge_strategy(&self) -> &'static str {
        self.merge_strategy
    }

    /// Derive the partition key for one query invocation of this field
    #[inline]
    #[must_use]
    pub fn key_for(&self, field: &str, args: &Map<String, Value>) -> PartitionKey {
        self.partition.key_for(field, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{APPEND, WINDOWED};
    use serde_json::json;

    #[test]
    fn policy_defaults() {
        let policy = FieldPolicy::new("collections");
        assert_eq!(policy.list_field(), "collections");
        assert_eq!(policy.id_field(), "externalId");
        assert_eq!(policy.partition(), &PartitionSpec::Shared);
        assert_eq!(policy.merge_strategy(), WINDOWED);
    }

    #[test]
    fn policy_builder() {
        let policy = FieldPolicy::new("searchCollections")
            .with_id_field("id")
            .with_partition(PartitionSpec::by_args(["filters.status"]).unwrap())
            .with_merge_hint(MergeHint::Sequential);

        assert_eq!(policy.id_field(), "id");
        assert_eq!(policy.merge_strategy(), APPEND);

        let args = json!({"filters": {"status": "DRAFT"}})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(
            policy.key_for("searchCollections", &args).as_str(),
            "searchCollections(filters.status=DRAFT)"
        );
    }
}
