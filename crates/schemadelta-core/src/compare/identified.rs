//! Comparison of identified records (named configuration entries).
//!
//! Records are paired by name rather than by column position:
//! 1. direct match on (module, model, name),
//! 2. unmatched non-primary copies of a record are discarded on both sides,
//! 3. match on (model, name) across modules, reported as moved,
//! 4. match on (model, suffix) between primary records, reported as renamed.
//!
//! Whatever is left becomes a plain addition or deletion.

use crate::alias::AliasMap;
use crate::matcher::{Matcher, Pools};
use crate::record::{
    Record, DEFINITION, DOMAIN, MODEL, MODULE, NAME, NOUPDATE, OTHER_PREFIX, SUFFIX,
};
use crate::report::Report;
use crate::{log_op_end, log_op_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Deleted,
    Added,
    /// Same record on both sides, carrying a change
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Relocation {
    Moved(String),
    Renamed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Direct,
    Moved,
    Renamed,
}

#[derive(Debug, Clone)]
struct Entry {
    record: Record,
    side: Side,
    relocation: Option<Relocation>,
    domain_deleted: bool,
    definition_change: Option<String>,
    noupdate_switched: bool,
}

impl Entry {
    fn plain(record: Record, side: Side) -> Self {
        Self {
            record,
            side,
            relocation: None,
            domain_deleted: false,
            definition_change: None,
            noupdate_switched: false,
        }
    }

    fn render(&self) -> String {
        let model = self.record.str(MODEL);
        let name = self.record.str(NAME);
        let mut content = match self.side {
            Side::Deleted => format!("DEL {}: {}", model, name),
            Side::Added => format!("NEW {}: {}", model, name),
            Side::Modified => format!("{}: {}", model, name),
        };
        let direction = if self.side == Side::Deleted { "to" } else { "from" };
        match &self.relocation {
            Some(Relocation::Moved(module)) => {
                content.push_str(&format!(" [moved {} {} module]", direction, module))
            }
            Some(Relocation::Renamed(module)) => {
                content.push_str(&format!(" [renamed {} {} module]", direction, module))
            }
            None => {}
        }
        if self.domain_deleted {
            content.push_str(" (deleted domain)");
        }
        if let Some(change) = &self.definition_change {
            content.push_str(&format!(" (changed definition: {})", change));
        }
        if self.record.flag(NOUPDATE) {
            content.push_str(" (noupdate)");
        }
        if self.noupdate_switched {
            content.push_str(" (noupdate switched)");
        }
        content
    }
}

/// Compare two identified-record snapshots and return the grouped report.
///
/// Both snapshots are consumed.
pub fn compare_record_sets(old: Vec<Record>, new: Vec<Record>, aliases: &AliasMap) -> Report {
    log_op_start!(
        "compare_record_sets",
        old_len = old.len() as u64,
        new_len = new.len() as u64
    );
    let start = std::time::Instant::now();
    let matcher = Matcher::new(aliases);

    let pools = Pools::new(old, new);
    let (pools, modified) =
        match_records(&matcher, pools, &[MODULE, MODEL, NAME], MatchKind::Direct);

    let pools = Pools::new(
        discard_updates(&matcher, pools.old),
        discard_updates(&matcher, pools.new),
    );
    let (pools, moved) = match_records(&matcher, pools, &[MODEL, NAME], MatchKind::Moved);
    let (pools, renamed) = match_records(
        &matcher,
        pools,
        &[MODEL, SUFFIX, OTHER_PREFIX],
        MatchKind::Renamed,
    );
    let unmatched_old = pools.old.len();
    let unmatched_new = pools.new.len();

    let mut entries: Vec<Entry> = pools
        .old
        .into_iter()
        .map(|record| Entry::plain(record, Side::Deleted))
        .chain(
            pools
                .new
                .into_iter()
                .map(|record| Entry::plain(record, Side::Added)),
        )
        .chain(moved)
        .chain(renamed)
        .chain(modified)
        .collect();

    entries.sort_by(|a, b| {
        (a.record.str(MODEL), a.side == Side::Deleted, a.record.str(NAME)).cmp(&(
            b.record.str(MODEL),
            b.side == Side::Deleted,
            b.record.str(NAME),
        ))
    });

    let mut report = Report::new();
    for entry in &entries {
        let group = aliases.module_map(entry.record.str(MODULE)).to_string();
        report.push(group, entry.render());
    }

    log_op_end!(
        "compare_record_sets",
        duration_ms = start.elapsed().as_millis() as u64,
        unmatched_old = unmatched_old as u64,
        unmatched_new = unmatched_new as u64
    );
    report
}

/// Remove every record that is a non-primary copy (module differs from its
/// prefix) of a record in the same pool. Runs after the direct pass, so only
/// copies without an in-place counterpart are dropped.
fn discard_updates(matcher: &Matcher<'_>, records: Vec<Record>) -> Vec<Record> {
    let snapshot = records.clone();
    let mut records = records;
    for item in &snapshot {
        let found = matcher.search_all(item, &records, &[MODEL, NAME]);
        for index in found.into_iter().rev() {
            records.remove(index);
        }
    }
    tracing::debug!(
        kept = records.len(),
        discarded = snapshot.len() - records.len(),
        "identified record updates discarded"
    );
    records
}

/// Run one matching pass and turn each pair into report entries.
fn match_records(
    matcher: &Matcher<'_>,
    pools: Pools,
    keys: &[&str],
    kind: MatchKind,
) -> (Pools, Vec<Entry>) {
    let mut entries = Vec::new();
    let (pools, matched) = matcher.match_tier(pools, keys, |old, new| {
        let domain_deleted =
            old.flag(DOMAIN) && old.display(DOMAIN) != "[]" && !new.flag(DOMAIN);
        let definition_change = (old.flag(DEFINITION) && !old.same(&new, DEFINITION)).then(|| {
            format!(
                "is now '{}' ('{}')",
                new.display(DEFINITION),
                old.display(DEFINITION)
            )
        });
        let noupdate_switched = old.flag(NOUPDATE) != new.flag(NOUPDATE);

        let relocation = |module: &str| match kind {
            MatchKind::Moved => Some(Relocation::Moved(module.to_string())),
            MatchKind::Renamed => Some(Relocation::Renamed(module.to_string())),
            MatchKind::Direct => None,
        };

        if kind == MatchKind::Direct {
            if domain_deleted || definition_change.is_some() || noupdate_switched {
                entries.push(Entry {
                    domain_deleted,
                    definition_change,
                    noupdate_switched,
                    ..Entry::plain(new, Side::Modified)
                });
            }
            return;
        }

        let moved_from = relocation(old.str(MODULE));
        let old_entry = Entry {
            relocation: relocation(new.str(MODULE)),
            ..Entry::plain(old, Side::Deleted)
        };
        let new_entry = Entry {
            relocation: moved_from,
            domain_deleted,
            definition_change,
            noupdate_switched,
            ..Entry::plain(new, Side::Added)
        };
        entries.push(old_entry);
        entries.push(new_entry);
    });
    tracing::debug!(kind = ?kind, matched, "identified records matched");
    (pools, entries)
}
