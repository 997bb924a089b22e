//! Field-level comparison: filter, three matching tiers, DEL/NEW, summary.

use crate::alias::AliasMap;
use crate::filter::{obsolete_models, partition_obsolete, strip_admin_records};
use crate::matcher::{Matcher, Pools};
use crate::record::{
    Record, ATTACHMENT, FIELD, HAS_DEFAULT, INHERITS, IS_FUNCTION, IS_PROPERTY,
    IS_RELATED, MODE, MODEL, MODULE, ORDER, RELATION, REQUIRED, SELECTION_KEYS, STORED, TABLE,
    TYPE,
};
use crate::report::{Report, GENERAL};
use crate::reporter::ChangeReporter;
use crate::{log_op_end, log_op_start};
use std::collections::BTreeSet;

/// One matching pass: the keys that pair records and the keys whose
/// differences are reported for each pair.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub name: &'static str,
    pub match_keys: &'static [&'static str],
    pub report_keys: &'static [&'static str],
}

/// `module` only differs here when the pair was joined through a module alias.
const REPORT_IN_PLACE: &[&str] = &[
    MODULE,
    RELATION,
    TYPE,
    SELECTION_KEYS,
    INHERITS,
    STORED,
    IS_FUNCTION,
    IS_RELATED,
    IS_PROPERTY,
    REQUIRED,
    TABLE,
    ORDER,
];

/// Same module, mode, model and field name.
pub const DIRECT: Tier = Tier {
    name: "direct",
    match_keys: &[MODULE, MODE, MODEL, FIELD],
    report_keys: REPORT_IN_PLACE,
};

/// Same field and type, moved to another module.
pub const OTHER_MODULE: Tier = Tier {
    name: "other_module",
    match_keys: &[MODE, MODEL, FIELD, TYPE],
    report_keys: &[
        MODULE,
        RELATION,
        SELECTION_KEYS,
        INHERITS,
        STORED,
        IS_FUNCTION,
        IS_RELATED,
        IS_PROPERTY,
        REQUIRED,
        TABLE,
        ORDER,
    ],
};

/// Field stayed in place with a different type.
pub const OTHER_TYPE: Tier = Tier {
    name: "other_type",
    match_keys: &[MODULE, MODE, MODEL, FIELD],
    report_keys: REPORT_IN_PLACE,
};

/// Tiers in the order they run, most specific first.
pub const FIELD_TIERS: [Tier; 3] = [DIRECT, OTHER_MODULE, OTHER_TYPE];

/// Start of the `general` line naming an obsolete model.
pub const OBSOLETE_MODEL_LINE: &str = "obsolete model ";

/// Attributes listed on a DEL line.
const DEL_KEYS: &[&str] = &[RELATION, REQUIRED, SELECTION_KEYS, INHERITS, MODE, ATTACHMENT];

/// Matching statistics of one field comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// Old records after administrative filtering
    pub original_old: usize,
    pub direct: usize,
    pub other_module: usize,
    pub other_type: usize,
    /// Old records belonging to obsolete models
    pub in_obsolete_models: usize,
    pub unmatched_old: usize,
    pub unmatched_new: usize,
}

impl FieldStats {
    pub fn matched(&self) -> usize {
        self.direct + self.other_module + self.other_type
    }
}

/// Compare two field snapshots and return the grouped report.
///
/// Both snapshots are consumed.
pub fn compare_sets(old: Vec<Record>, new: Vec<Record>, aliases: &AliasMap) -> Report {
    compare_sets_with_stats(old, new, aliases).0
}

/// [`compare_sets`], also returning the matching statistics.
pub fn compare_sets_with_stats(
    old: Vec<Record>,
    new: Vec<Record>,
    aliases: &AliasMap,
) -> (Report, FieldStats) {
    log_op_start!(
        "compare_sets",
        old_len = old.len() as u64,
        new_len = new.len() as u64
    );
    let start = std::time::Instant::now();

    let old = strip_admin_records(old);
    let new = strip_admin_records(new);
    let mut stats = FieldStats {
        original_old: old.len(),
        ..FieldStats::default()
    };

    // An empty new snapshot degrades to all-DEL output.
    let obsolete = if new.is_empty() {
        BTreeSet::new()
    } else {
        obsolete_models(&old, &new, aliases)
    };
    let (active, in_obsolete) = partition_obsolete(old, &obsolete);
    stats.in_obsolete_models = in_obsolete.len();

    let matcher = Matcher::new(aliases);
    let mut report = Report::new();
    let mut pools = Pools::new(active, new);
    let mut counts = [0usize; 3];

    for (tier, count) in FIELD_TIERS.iter().zip(counts.iter_mut()) {
        let mut reporter = ChangeReporter::new(aliases, &mut report);
        let (rest, matched) = matcher.match_tier(pools, tier.match_keys, |old, new| {
            reporter.report_changes(&old, &new, tier.report_keys)
        });
        tracing::debug!(tier = tier.name, matched, "field tier matched");
        pools = rest;
        *count = matched;
    }
    let [direct, other_module, other_type] = counts;
    stats.direct = direct;
    stats.other_module = other_module;
    stats.other_type = other_type;
    stats.unmatched_old = pools.old.len();
    stats.unmatched_new = pools.new.len();

    let mut reporter = ChangeReporter::new(aliases, &mut report);
    for record in pools.old {
        if let Some((record, extra)) = unmatched_line(record, DEL_KEYS) {
            reporter.print(&record, &format!("DEL{}", extra));
        }
    }
    for record in pools.new {
        let mut keys = DEL_KEYS.to_vec();
        keys.push(HAS_DEFAULT);
        if record.flag(IS_FUNCTION) || record.flag(IS_RELATED) {
            keys.extend([IS_FUNCTION, IS_RELATED, STORED]);
        }
        if let Some((record, extra)) = unmatched_line(record, &keys) {
            reporter.print(&record, &format!("NEW{}", extra));
        }
    }

    for model in &obsolete {
        report.push(GENERAL, format!("{}{}", OBSOLETE_MODEL_LINE, model));
    }
    for line in summary_lines(&stats) {
        report.push(GENERAL, line);
    }

    log_op_end!(
        "compare_sets",
        duration_ms = start.elapsed().as_millis() as u64,
        matched = stats.matched() as u64,
        unmatched_old = stats.unmatched_old as u64,
        unmatched_new = stats.unmatched_new as u64,
        obsolete = stats.in_obsolete_models as u64
    );
    (report, stats)
}

/// Prepare an unmatched record for a DEL/NEW line.
///
/// Returns `None` for records that carry no migration weight: the `_order`
/// pseudo-field and non-stored computed or related fields.
fn unmatched_line(mut record: Record, keys: &[&str]) -> Option<(Record, String)> {
    if record.str(FIELD) == ORDER {
        return None;
    }
    if !record.flag(STORED) && (record.flag(IS_FUNCTION) || record.flag(IS_RELATED)) {
        return None;
    }
    if record.str(MODE) == "create" {
        record.set(MODE, "");
    }
    let extra = extra_message(&record, keys);
    Some((record, extra))
}

/// ` key: value` for every truthy attribute among `keys`, or the bare key
/// when the displayed value equals it.
fn extra_message(record: &Record, keys: &[&str]) -> String {
    let parts: Vec<String> = keys
        .iter()
        .filter(|key| record.flag(key))
        .map(|&key| {
            let shown = record.display(key);
            if shown == key {
                shown
            } else {
                format!("{}: {}", key, shown)
            }
        })
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!(" {}", parts.join(", "))
    }
}

fn summary_lines(stats: &FieldStats) -> [String; 7] {
    [
        format!("# {} fields matched,", stats.matched()),
        format!("# Direct match: {}", stats.direct),
        format!("# Found in other module: {}", stats.other_module),
        format!("# Found with different type: {}", stats.other_type),
        format!("# In obsolete models: {}", stats.in_obsolete_models),
        format!("# Not matched: {}", stats.unmatched_old),
        format!("# New columns: {}", stats.unmatched_new),
    ]
}
