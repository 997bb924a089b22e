#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::model;
use schemadelta_core::{compare_model_sets, AliasMap, GENERAL};

#[test]
fn test_obsolete_and_new_models() {
    let old = vec![model("base", "res.foo"), model("base", "res.partner")];
    let new = vec![model("base", "res.partner"), model("sale", "sale.order")];

    let report = compare_model_sets(old, new, &AliasMap::new());

    assert_eq!(report.lines("base"), ["obsolete model res.foo"]);
    assert_eq!(report.lines("sale"), ["new model sale.order"]);
    assert_eq!(
        report.lines(GENERAL),
        [
            "obsolete model res.foo [module base]",
            "new model sale.order [module sale]",
        ]
    );
}

#[test]
fn test_renamed_model() {
    let aliases = AliasMap::new().rename_model("res.foo", "res.bar");
    let old = vec![model("base", "res.foo")];
    let new = vec![model("base", "res.bar")];

    let report = compare_model_sets(old, new, &aliases);

    assert_eq!(
        report.lines("base"),
        [
            "obsolete model res.foo (renamed to res.bar)",
            "new model res.bar (renamed from res.foo)",
        ]
    );
    assert_eq!(
        report.lines(GENERAL),
        [
            "obsolete model res.foo (renamed to res.bar) [module base]",
            "new model res.bar (renamed from res.foo) [module base]",
        ]
    );
}

#[test]
fn test_renamed_model_in_other_module() {
    let aliases = AliasMap::new().rename_model("sale.foo", "account.foo");
    let old = vec![model("sale", "sale.foo")];
    let new = vec![model("account", "account.foo")];

    let report = compare_model_sets(old, new, &aliases);

    assert_eq!(
        report.lines("sale"),
        ["obsolete model sale.foo (renamed to account.foo in module account)"]
    );
    assert_eq!(
        report.lines("account"),
        ["new model account.foo (renamed from sale.foo in module sale)"]
    );
}

#[test]
fn test_merged_model_is_reported_obsolete() {
    let aliases = AliasMap::new().merge_model("res.foo", "res.partner");
    let old = vec![model("base", "res.foo"), model("base", "res.partner")];
    let new = vec![model("base", "res.partner")];

    let report = compare_model_sets(old, new, &aliases);

    assert_eq!(report.lines("base"), ["obsolete model res.foo"]);
}

#[test]
fn test_moved_model_is_neither_obsolete_nor_new() {
    let old = vec![model("sale", "sale.foo")];
    let new = vec![model("sale_stock", "sale.foo")];

    let report = compare_model_sets(old, new, &AliasMap::new());

    assert_eq!(report.lines("sale"), ["model sale.foo (moved to sale_stock)"]);
    assert_eq!(report.lines("sale_stock"), ["model sale.foo (moved from sale)"]);
    assert!(report.lines(GENERAL).is_empty());
}

#[test]
fn test_module_rename_is_not_a_move() {
    let aliases = AliasMap::new().rename_module("sale", "sales");
    let old = vec![model("sale", "sale.foo")];
    let new = vec![model("sales", "sale.foo")];

    let report = compare_model_sets(old, new, &aliases);

    assert!(report.is_empty());
}

#[test]
fn test_model_type_tag() {
    let new = vec![model("base", "base.wizard").with("model_type", "transient")];

    let report = compare_model_sets(Vec::new(), new, &AliasMap::new());

    assert_eq!(report.lines("base"), ["new model base.wizard [transient]"]);
    assert_eq!(report.lines(GENERAL), ["new model base.wizard [module base]"]);
}
