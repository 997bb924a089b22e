//! Greedy, order-sensitive pairing of old and new records.
//!
//! A tier takes ownership of the still-unmatched old and new records, pairs
//! each old record with the first eligible new record in snapshot order, and
//! hands back whatever stayed unmatched. A record consumed by one tier is
//! therefore never seen by the next.

use crate::alias::AliasMap;
use crate::record::{Record, FIELD, MODEL, MODULE, OTHER_PREFIX, PREFIX};

/// View definitions re-export records under other prefixes; never pair them
/// through `other_prefix`.
const VIEW_MODEL: &str = "ir.ui.view";

/// Unmatched records of both snapshots, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pools {
    pub old: Vec<Record>,
    pub new: Vec<Record>,
}

impl Pools {
    pub fn new(old: Vec<Record>, new: Vec<Record>) -> Self {
        Self { old, new }
    }
}

/// Alias-aware record equality and candidate search.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    aliases: &'a AliasMap,
}

impl<'a> Matcher<'a> {
    pub fn new(aliases: &'a AliasMap) -> Self {
        Self { aliases }
    }

    /// True when `old` and `new` agree on every key.
    ///
    /// `module` is compared after mapping the old value through renames and
    /// merges; `model` only through strict renames, so two models merged into
    /// the same target are never paired. `other_prefix` requires both records
    /// to be owned by their own prefix module.
    pub fn compare_records(&self, old: &Record, new: &Record, keys: &[&str]) -> bool {
        keys.iter().all(|&key| match key {
            MODULE => self.aliases.module_map(old.str(MODULE)) == new.str(MODULE),
            MODEL => self.aliases.model_rename_map(old.str(MODEL)) == new.str(MODEL),
            OTHER_PREFIX => {
                old.str(MODULE) == old.str(PREFIX)
                    && new.str(MODULE) == new.str(PREFIX)
                    && old.str(MODEL) != VIEW_MODEL
            }
            _ => old.same(new, key),
        })
    }

    /// Index of the first candidate matching `item` on `keys`.
    ///
    /// When nothing matches, `keys` include `field` and `item` has no field
    /// name, a second pass accepts a candidate that differs only in its field
    /// name.
    pub fn search(&self, item: &Record, candidates: &[Record], keys: &[&str]) -> Option<usize> {
        if let Some(index) = candidates
            .iter()
            .position(|other| self.compare_records(item, other, keys))
        {
            return Some(index);
        }

        if !keys.contains(&FIELD) || !item.str(FIELD).is_empty() {
            return None;
        }
        candidates.iter().position(|other| {
            let mut renamed = item.clone();
            renamed.set(FIELD, other.get(FIELD).clone());
            self.compare_records(&renamed, other, keys)
        })
    }

    /// Indices of every candidate matching `item` that is not owned by its
    /// own prefix module.
    pub fn search_all(&self, item: &Record, candidates: &[Record], keys: &[&str]) -> Vec<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, other)| {
                self.compare_records(item, other, keys) && other.str(MODULE) != other.str(PREFIX)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Run one matching tier.
    ///
    /// Each old record, in order, is paired with the first matching record
    /// still in the new pool; both leave their pools and are passed to
    /// `on_match`. Returns the remaining pools and the number of pairs.
    pub fn match_tier<F>(&self, pools: Pools, keys: &[&str], mut on_match: F) -> (Pools, usize)
    where
        F: FnMut(Record, Record),
    {
        let Pools { old, mut new } = pools;
        let mut unmatched_old = Vec::with_capacity(old.len());
        let mut matched = 0;

        for item in old {
            match self.search(&item, &new, keys) {
                Some(index) => {
                    let found = new.remove(index);
                    on_match(item, found);
                    matched += 1;
                }
                None => unmatched_old.push(item),
            }
        }

        tracing::debug!(
            keys = ?keys,
            matched,
            unmatched_old = unmatched_old.len(),
            unmatched_new = new.len(),
            "tier complete"
        );
        (Pools::new(unmatched_old, new), matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MODE, TYPE};

    fn field(module: &str, model: &str, name: &str, ty: &str) -> Record {
        Record::new()
            .with(MODULE, module)
            .with(MODEL, model)
            .with(FIELD, name)
            .with(TYPE, ty)
            .with(MODE, "")
    }

    const DIRECT: &[&str] = &[MODULE, MODE, MODEL, FIELD];

    #[test]
    fn test_compare_records_module_through_alias() {
        let aliases = AliasMap::new().rename_module("a", "b");
        let matcher = Matcher::new(&aliases);
        let old = field("a", "m", "f", "char");
        let new = field("b", "m", "f", "char");
        assert!(matcher.compare_records(&old, &new, DIRECT));
        assert!(!matcher.compare_records(&new, &old, DIRECT));
    }

    #[test]
    fn test_compare_records_model_ignores_merges() {
        let aliases = AliasMap::new().merge_model("old.m", "new.m");
        let matcher = Matcher::new(&aliases);
        let old = field("a", "old.m", "f", "char");
        let new = field("a", "new.m", "f", "char");
        assert!(!matcher.compare_records(&old, &new, DIRECT));

        let aliases = AliasMap::new().rename_model("old.m", "new.m");
        assert!(Matcher::new(&aliases).compare_records(&old, &new, DIRECT));
    }

    #[test]
    fn test_other_prefix_requires_primary_owner() {
        let aliases = AliasMap::new();
        let matcher = Matcher::new(&aliases);
        let primary = Record::new()
            .with(MODULE, "sale")
            .with(PREFIX, "sale")
            .with(MODEL, "ir.rule");
        let foreign = primary.clone().with(PREFIX, "base");
        assert!(matcher.compare_records(&primary, &primary, &[OTHER_PREFIX]));
        assert!(!matcher.compare_records(&primary, &foreign, &[OTHER_PREFIX]));

        let view = primary.clone().with(MODEL, VIEW_MODEL);
        assert!(!matcher.compare_records(&view, &view, &[OTHER_PREFIX]));
    }

    #[test]
    fn test_search_returns_first_in_order() {
        let aliases = AliasMap::new();
        let matcher = Matcher::new(&aliases);
        let item = field("a", "m", "f", "char");
        let candidates = vec![
            field("a", "m", "g", "char"),
            field("a", "m", "f", "integer"),
            field("a", "m", "f", "char"),
        ];
        assert_eq!(matcher.search(&item, &candidates, DIRECT), Some(1));
    }

    #[test]
    fn test_search_field_rename_fallback_only_for_unnamed_items() {
        let aliases = AliasMap::new();
        let matcher = Matcher::new(&aliases);
        let candidates = vec![field("a", "m", "renamed", "char")];

        let named = field("a", "m", "f", "char");
        assert_eq!(matcher.search(&named, &candidates, DIRECT), None);

        let unnamed = field("a", "m", "", "char");
        assert_eq!(matcher.search(&unnamed, &candidates, DIRECT), Some(0));
    }

    #[test]
    fn test_search_all_skips_primary_records() {
        let aliases = AliasMap::new();
        let matcher = Matcher::new(&aliases);
        let record = |module: &str, prefix: &str| {
            Record::new()
                .with(MODULE, module)
                .with(PREFIX, prefix)
                .with(MODEL, "res.groups")
                .with("name", "base.group_user")
        };
        let candidates = vec![record("base", "base"), record("sale", "base")];
        let found = matcher.search_all(&candidates[0], &candidates, &[MODEL, "name"]);
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn test_match_tier_consumes_mutually() {
        let aliases = AliasMap::new();
        let matcher = Matcher::new(&aliases);
        let pools = Pools::new(
            vec![field("a", "m", "f", "char"), field("a", "m", "f", "char")],
            vec![field("a", "m", "f", "char")],
        );
        let mut pairs = Vec::new();
        let (remaining, matched) =
            matcher.match_tier(pools, DIRECT, |old, new| pairs.push((old, new)));
        assert_eq!(matched, 1);
        assert_eq!(pairs.len(), 1);
        assert_eq!(remaining.old.len(), 1);
        assert!(remaining.new.is_empty());
    }
}
