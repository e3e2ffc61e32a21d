//! FieldCache display summarizers
//!
//! Pure, stateless aggregation helpers feeding list-view side panels:
//! grouping records by a shared property value and summarizing label usage
//! as `{name, count}` rows.
//!
//! These are display helpers: degraded input (empty lists, missing
//! properties) yields empty output rather than an error, since an empty
//! panel beats a crashed page.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod group;
mod labels;

pub use group::{group_by_key, group_by_property, UNDEFINED_GROUP};
pub use labels::{count_labels, count_labels_with_canonical, property_label_counts, LabelCount};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
