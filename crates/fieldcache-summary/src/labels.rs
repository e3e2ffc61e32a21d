//! Label usage summaries for side panels
//!
//! Produces `{name, count}` rows for topic and publisher panels, optionally
//! padded with zero-count entries for a canonical label set so every known
//! category shows up even when unobserved.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One summary row: a label and how often it was observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    /// Label name
    pub name: String,
    /// Number of records carrying the label
    pub count: usize,
}

/// Count observed labels
///
/// Rows are ordered by descending count; equal counts break ties by
/// ascending name.
pub fn count_labels<'a, I>(observed: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in observed {
        *counts.entry(label).or_insert(0) += 1;
    }
    sorted_rows(counts)
}

/// Count observed labels, padding zero-count rows for every canonical label
///
/// Canonical labels not present in the data still appear (with a count of
/// zero), so summary panels always list the full category set.
pub fn count_labels_with_canonical<'a, I>(observed: I, canonical: &[&str]) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in canonical {
        counts.insert(*label, 0);
    }
    for label in observed {
        *counts.entry(label).or_insert(0) += 1;
    }
    sorted_rows(counts)
}

/// Summarize one string property across JSON records
///
/// Records missing the property (or carrying a non-string value) are
/// skipped; this is a display helper, so degraded input degrades the
/// summary rather than failing it.
#[must_use]
pub fn property_label_counts(
    records: &[Value],
    property: &str,
    canonical: Option<&[&str]>,
) -> Vec<LabelCount> {
    let observed = records
        .iter()
        .filter_map(|record| record.get(property).and_then(Value::as_str));
    match canonical {
        Some(canonical) => count_labels_with_canonical(observed, canonical),
        None => count_labels(observed),
    }
}

/// Descending count, ties broken by ascending name
fn sorted_rows(counts: BTreeMap<&str, usize>) -> Vec<LabelCount> {
    let mut rows: Vec<LabelCount> = counts
        .into_iter()
        .map(|(name, count)| LabelCount {
            name: name.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    rows
}
