//! Full analysis of two schema versions.

use crate::alias::AliasMap;
use crate::compare::fields::OBSOLETE_MODEL_LINE;
use crate::compare::{compare_model_sets, compare_record_sets, compare_sets};
use crate::record::Snapshot;
use crate::report::{Report, GENERAL};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};

/// The three snapshot kinds extracted from one schema version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotBundle {
    pub fields: Snapshot,
    pub models: Snapshot,
    /// Identified records
    pub records: Snapshot,
}

/// Run the model, field and identified-record comparators and merge their
/// reports group by group, in that order.
///
/// When model snapshots are given, obsolete models are listed once, by the
/// model comparator.
pub fn analyze(old: SnapshotBundle, new: SnapshotBundle, aliases: &AliasMap) -> Report {
    log_op_start!(
        "analyze",
        fields = old.fields.len() as u64,
        models = old.models.len() as u64,
        records = old.records.len() as u64
    );
    let start = std::time::Instant::now();

    let models_given = !old.models.is_empty() || !new.models.is_empty();
    let mut report = compare_model_sets(old.models, new.models, aliases);

    let mut fields = compare_sets(old.fields, new.fields, aliases);
    if models_given {
        fields.retain(GENERAL, |line| !line.starts_with(OBSOLETE_MODEL_LINE));
    }
    report.merge(fields);
    report.merge(compare_record_sets(old.records, new.records, aliases));

    log_op_end!(
        "analyze",
        duration_ms = start.elapsed().as_millis() as u64,
        lines = report.line_count() as u64
    );
    report
}
