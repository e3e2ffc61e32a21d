//! Grouping records by a shared property value

use serde_json::Value;
use std::collections::BTreeMap;

/// Group key used for records missing the property
pub const UNDEFINED_GROUP: &str = "undefined";

/// Partition items into groups keyed by `key_fn`
///
/// Group keys iterate in ascending order.
pub fn group_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Partition JSON records by the value of one property
///
/// Returns an empty mapping for empty input or when the property is absent
/// on the first record: the first record decides whether the property is
/// groupable at all. Later records missing the property fall into the
/// [`UNDEFINED_GROUP`] bucket. Scalar keys render bare (`1`, `DRAFT`), so
/// group keys iterate in ascending lexical order.
#[must_use]
pub fn group_by_property(records: &[Value], property: &str) -> BTreeMap<String, Vec<Value>> {
    let Some(first) = records.first() else {
        return BTreeMap::new();
    };
    if first.get(property).is_none() {
        return BTreeMap::new();
    }

    group_by_key(records.iter().cloned(), |record| {
        render_group_key(record.get(property))
    })
}

/// Bare rendering for one group key
fn render_group_key(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED_GROUP.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn groups_records_with_ascending_keys() {
        let records = vec![
            json!({"g": 1, "n": "a"}),
            json!({"g": 2, "n": "b"}),
            json!({"g": 1, "n": "c"}),
        ];

        let groups = group_by_property(&records, "g");

        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["1", "2"]);
        assert_eq!(
            groups["1"],
            vec![json!({"g": 1, "n": "a"}), json!({"g": 1, "n": "c"})]
        );
        assert_eq!(groups["2"], vec![json!({"g": 2, "n": "b"})]);
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        assert!(group_by_property(&[], "g").is_empty());
    }

    #[test]
    fn property_absent_on_first_record_yields_empty_mapping() {
        let records = vec![json!({"n": "a"}), json!({"g": 1, "n": "b"})];
        assert!(group_by_property(&records, "g").is_empty());
    }

    #[test]
    fn later_records_missing_the_property_bucket_as_undefined() {
        let records = vec![json!({"g": "x"}), json!({"n": "no group"})];
        let groups = group_by_property(&records, "g");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[UNDEFINED_GROUP], vec![json!({"n": "no group"})]);
    }

    #[test]
    fn string_keys_render_bare() {
        let records = vec![json!({"status": "DRAFT"})];
        let groups = group_by_property(&records, "status");
        assert!(groups.contains_key("DRAFT"));
    }

    #[test]
    fn group_by_key_is_generic() {
        let groups = group_by_key(vec![1, 2, 3, 4], |n| n % 2);
        assert_eq!(groups[&0], vec![2, 4]);
        assert_eq!(groups[&1], vec![1, 3]);
    }
}
