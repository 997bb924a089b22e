#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{field, model, xmlid};
use schemadelta_core::errors::{DeltaError, ExError, ExErrorKind};
use schemadelta_core::logging_facility::test_capture::init_test_capture;
use schemadelta_core::{
    compare_model_sets, compare_record_sets, compare_sets, log_op_end, log_op_error, log_op_start,
    AliasMap,
};
use schemadelta_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_MATCHED, FIELD_OBSOLETE, FIELD_OLD_LEN,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, old_len = 3_u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field(FIELD_OLD_LEN), Some("3"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DeltaError::RecordNotObject { index: 2 };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_SNAPSHOT"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("InvalidSnapshot"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::InvalidAliasConfig).with_message("bad table");
    log_op_error!(op_name, err, duration_ms = 1);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
}

#[test]
fn test_compare_sets_logs_boundaries() {
    let capture = init_test_capture();

    let old = vec![field("base", "res.partner", "name", "char")];
    compare_sets(old.clone(), old, &AliasMap::new());

    capture.assert_event_exists("compare_sets", EVENT_START);
    let ends: Vec<_> = capture
        .events_for_op("compare_sets")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(ends.iter().any(|e| e.field(FIELD_MATCHED) == Some("1")));
    assert!(ends.iter().all(|e| e.field(FIELD_DURATION_MS).is_some()));
}

#[test]
fn test_compare_model_sets_logs_counters() {
    let capture = init_test_capture();

    compare_model_sets(vec![model("base", "res.foo")], Vec::new(), &AliasMap::new());

    let ends: Vec<_> = capture
        .events_for_op("compare_model_sets")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(ends.iter().any(|e| e.field(FIELD_OBSOLETE) == Some("1")));
}

#[test]
fn test_compare_record_sets_logs_boundaries() {
    let capture = init_test_capture();

    compare_record_sets(
        vec![xmlid("sale", "ir.rule", "sale.rule_a")],
        Vec::new(),
        &AliasMap::new(),
    );

    capture.assert_event_exists("compare_record_sets", EVENT_START);
    capture.assert_event_exists("compare_record_sets", EVENT_END);
}

#[test]
fn test_snapshot_parse_failure_logs_error_event() {
    let capture = init_test_capture();

    let result = schemadelta_core::parse_snapshot_bytes(b"{}");
    assert!(result.is_err());

    let errors: Vec<_> = capture
        .events_for_op("parse_snapshot_bytes")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert!(!errors.is_empty());
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_SNAPSHOT"));
}
