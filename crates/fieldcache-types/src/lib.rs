//! FieldCache core data model
//!
//! Defines the types shared by every FieldCache crate:
//! - [`Record`] / [`RawRecord`]: uniquely identified domain records
//! - [`RequestWindow`]: the `(page, perPage)` pair a caller asks for
//! - [`PageMeta`] / [`PageEnvelope`]: one fetched page plus its metadata
//! - [`Aggregate`]: the merged slot list cached per partition key
//! - [`ShapeError`]: loud boundary validation failures
//!
//! [`PageEnvelope::from_response`] is the only place loosely-shaped JSON is
//! accepted; everything past it operates on validated, typed values.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregate;
mod envelope;
mod error;
mod meta;
mod record;
mod window;

pub use aggregate::Aggregate;
pub use envelope::{PageEnvelope, PAGINATION_FIELD};
pub use error::ShapeError;
pub use meta::PageMeta;
pub use record::{RawRecord, Record};
pub use window::RequestWindow;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
