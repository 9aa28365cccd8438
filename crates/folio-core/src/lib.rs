//! # folio-core
//!
//! Core types shared by every Folio crate:
//! - [`StatField`] identifies one of the three mirrored profile counters
//!   and the attribute selector of the element that displays it
//! - [`StatSnapshot`] is the last-known set of counts
//! - Count normalization helpers that keep every value a plain decimal
//! - Cross-cutting error types

pub mod errors;
pub mod field;
pub mod normalize;
pub mod snapshot;

pub use errors::CoreError;
pub use field::StatField;
pub use normalize::{is_plain_count, normalize_count};
pub use snapshot::StatSnapshot;
