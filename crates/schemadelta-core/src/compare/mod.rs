//! The three set comparators.
//!
//! Each comparator consumes an old and a new snapshot of one record kind and
//! returns a [`Report`](crate::report::Report). None of them can fail: absent
//! attributes read as empty and empty snapshots degrade to all-DEL or all-NEW
//! output.

pub mod fields;
pub mod identified;
pub mod models;

pub use fields::{compare_sets, compare_sets_with_stats, FieldStats, Tier, FIELD_TIERS};
pub use identified::compare_record_sets;
pub use models::compare_model_sets;
