//! Partition-key derivation from query arguments
//!
//! A partition key decides which requests share one cache aggregate.
//! Requests differing only in `page`/`perPage` must map to the same key;
//! requests differing in a semantically distinct filter (a collection
//! status, a language) must map to different keys.

use crate::error::PolicyError;
use serde_json::{Map, Value};
use std::fmt;

/// Dotted path to a partition-relevant query argument
///
/// The distinguishing argument is often buried inside a filter sub-object
/// rather than sitting at the top level (`"filters.status"`); the lookup
/// digs through nested objects explicitly instead of assuming a top-level
/// argument of that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgPath {
    raw: String,
    segments: Vec<String>,
}

impl ArgPath {
    /// Parse a dotted argument path
    ///
    /// # Errors
    /// Returns [`PolicyError::InvalidArgPath`] for an empty path or a path
    /// with an empty segment
    pub fn new(path: impl Into<String>) -> Result<Self, PolicyError> {
        let raw = path.into();
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if raw.is_empty() || segments.iter().any(String::is_empty) {
            return Err(PolicyError::InvalidArgPath { path: raw });
        }
        Ok(Self { raw, segments })
    }

    /// The path as written
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolve the path against one query invocation's arguments
    #[must_use]
    pub fn lookup<'a>(&self, args: &'a Map<String, Value>) -> Option<&'a Value> {
        let mut current = args.get(&self.segments[0])?;
        for segment in &self.segments[1..] {
            current = current.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for ArgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Derived identifier determining which queries share a cache aggregate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// The rendered key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which query-argument subset partitions the cache for one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PartitionSpec {
    /// No partitioning: every request for the field merges into one aggregate
    #[default]
    Shared,

    /// Requests sharing the values at these paths share one aggregate
    ByArgs(Vec<ArgPath>),
}

impl PartitionSpec {
    /// Build a spec from dotted argument paths
    ///
    /// # Errors
    /// Returns [`PolicyError::InvalidArgPath`] if any path is malformed
    pub fn by_args<I, S>(paths: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = paths
            .into_iter()
            .map(ArgPath::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::ByArgs(paths))
    }

    /// Derive the partition key for one query invocation
    ///
    /// Configured paths are rendered in configured order, so the key is
    /// stable across invocations. An absent argument renders as `-`,
    /// distinct from a present `null`. Unlisted arguments (`page`,
    /// `perPage`) never influence the key.
    #[must_use]
    pub fn key_for(&self, field: &str, args: &Map<String, Value>) -> PartitionKey {
        match self {
            Self::Shared => PartitionKey(field.to_string()),
            Self::ByArgs(paths) => {
                let rendered: Vec<String> = paths
                    .iter()
                    .map(|path| format!("{}={}", path, render_arg(path.lookup(args))))
                    .collect();
                PartitionKey(format!("{}({})", field, rendered.join(",")))
            }
        }
    }
}

/// Canonical rendering for one argument value
fn render_arg(value: Option<&Value>) -> String {
    match value {
        None => "-".to_string(),
        // Bare strings, so DRAFT renders as DRAFT rather than "DRAFT"
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
