//! Model existence comparison: obsolete, new, renamed and moved models.

use crate::alias::AliasMap;
use crate::record::{Record, MODEL, MODEL_TYPE, MODULE};
use crate::report::{Report, GENERAL};
use crate::{log_op_end, log_op_start};
use std::collections::{BTreeMap, HashSet};

/// Model name to owning module. A model listed twice keeps its first owner.
fn owners(records: &[Record]) -> BTreeMap<&str, &str> {
    let mut owners = BTreeMap::new();
    for record in records {
        owners
            .entry(record.str(MODEL))
            .or_insert_with(|| record.str(MODULE));
    }
    owners
}

/// Distinct model records in snapshot order.
fn distinct(records: &[Record]) -> impl Iterator<Item = &Record> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(move |&record| seen.insert(record.str(MODEL)))
}

fn with_type(mut text: String, record: &Record) -> String {
    if record.flag(MODEL_TYPE) {
        text.push_str(&format!(" [{}]", record.display(MODEL_TYPE)));
    }
    text
}

/// Compare two model snapshots and return the grouped report.
///
/// Renames are resolved through the strict rename table only; a merged-away
/// model is reported as obsolete.
pub fn compare_model_sets(old: Vec<Record>, new: Vec<Record>, aliases: &AliasMap) -> Report {
    log_op_start!(
        "compare_model_sets",
        old_len = old.len() as u64,
        new_len = new.len() as u64
    );
    let start = std::time::Instant::now();
    let old_models = owners(&old);
    let new_models = owners(&new);
    let mut report = Report::new();
    let (mut obsolete, mut added, mut moved) = (0u64, 0u64, 0u64);

    for record in distinct(&old) {
        let model = record.str(MODEL);
        let group = aliases.module_map(record.str(MODULE)).to_string();

        if let Some(&new_module) = new_models.get(model) {
            if group != new_module {
                moved += 1;
                report.push(
                    group,
                    with_type(format!("model {} (moved to {})", model, new_module), record),
                );
            }
            continue;
        }

        obsolete += 1;
        let target = aliases.model_rename_map(model);
        match new_models.get(target) {
            Some(&new_module) if target != model => {
                let moved_module = if group != new_module {
                    format!(" in module {}", new_module)
                } else {
                    String::new()
                };
                report.push(
                    group.clone(),
                    with_type(
                        format!("obsolete model {} (renamed to {}{})", model, target, moved_module),
                        record,
                    ),
                );
                report.push(
                    GENERAL,
                    format!("obsolete model {} (renamed to {}) [module {}]", model, target, group),
                );
            }
            _ => {
                report.push(
                    group.clone(),
                    with_type(format!("obsolete model {}", model), record),
                );
                report.push(GENERAL, format!("obsolete model {} [module {}]", model, group));
            }
        }
    }

    for record in distinct(&new) {
        let model = record.str(MODEL);
        let module = record.str(MODULE);

        if let Some(&old_module) = old_models.get(model) {
            if module != aliases.module_map(old_module) {
                report.push(
                    module,
                    with_type(format!("model {} (moved from {})", model, old_module), record),
                );
            }
            continue;
        }

        added += 1;
        let prior = aliases.inv_model_map(model);
        match old_models.get(prior) {
            Some(&old_module) if prior != model => {
                let moved_module = if module != aliases.module_map(old_module) {
                    format!(" in module {}", old_module)
                } else {
                    String::new()
                };
                report.push(
                    module,
                    with_type(
                        format!("new model {} (renamed from {}{})", model, prior, moved_module),
                        record,
                    ),
                );
                report.push(
                    GENERAL,
                    format!("new model {} (renamed from {}) [module {}]", model, prior, module),
                );
            }
            _ => {
                report.push(module, with_type(format!("new model {}", model), record));
                report.push(GENERAL, format!("new model {} [module {}]", model, module));
            }
        }
    }

    log_op_end!(
        "compare_model_sets",
        duration_ms = start.elapsed().as_millis() as u64,
        obsolete = obsolete,
        added = added,
        moved = moved
    );
    report
}
