//! schemadelta Core - alias-aware schema snapshot comparison
//!
//! This crate compares two successive snapshots of an application's schema
//! metadata and produces a categorized, human-readable change report to guide
//! a migration:
//! - Alias resolution for renamed and merged modules and models
//! - Administrative record filtering and obsolete-model detection
//! - Tiered greedy matching of old and new records
//! - Per-module change reporting for fields, models and identified records
//!
//! The engine is a pure transformation. It never touches a live schema and
//! keeps no state between calls.

pub mod alias;
pub mod analysis;
pub mod compare;
pub mod errors;
pub mod filter;
pub mod logging_facility;
pub mod matcher;
pub mod record;
pub mod report;
pub mod reporter;

// Re-export commonly used types
pub use alias::AliasMap;
pub use analysis::{analyze, SnapshotBundle};
pub use compare::{compare_model_sets, compare_record_sets, compare_sets, FieldStats};
pub use errors::{DeltaError, ExError, ExErrorKind};
pub use record::{parse_snapshot_bytes, Record, Snapshot};
pub use report::{Report, GENERAL};
