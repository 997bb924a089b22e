//! Pre-comparison filtering of field snapshots.

use crate::alias::AliasMap;
use crate::record::{Record, FIELD, MODEL};
use std::collections::BTreeSet;

/// Audit and identifier columns present on every model. Their records never
/// carry a meaningful schema change.
pub const ADMIN_FIELDS: &[&str] = &["create_date", "create_uid", "id", "write_date", "write_uid"];

/// Drop the records of administrative columns, keeping snapshot order.
pub fn strip_admin_records(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| !ADMIN_FIELDS.contains(&record.str(FIELD)))
        .collect()
}

/// Distinct model names referenced by a snapshot.
pub fn model_names(records: &[Record]) -> BTreeSet<String> {
    records.iter().map(|r| r.str(MODEL).to_string()).collect()
}

/// Old models absent from the new snapshot, directly and through the alias map.
pub fn obsolete_models(old: &[Record], new: &[Record], aliases: &AliasMap) -> BTreeSet<String> {
    let new_models = model_names(new);
    model_names(old)
        .into_iter()
        .filter(|model| {
            !new_models.contains(model) && !new_models.contains(aliases.model_map(model))
        })
        .collect()
}

/// Split old records into `(active, in_obsolete_models)`, each in snapshot order.
pub fn partition_obsolete(
    old: Vec<Record>,
    obsolete: &BTreeSet<String>,
) -> (Vec<Record>, Vec<Record>) {
    old.into_iter()
        .partition(|record| !obsolete.contains(record.str(MODEL)))
}
