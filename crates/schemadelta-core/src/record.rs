//! Snapshot records: one field, model, or identified record per entry.
//!
//! Records are loose attribute maps so the extraction side can evolve without
//! breaking the engine. Absent attributes always read as falsy.

use crate::errors::{DeltaError, ExError, ExErrorKind};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered sequence of records for one schema version.
pub type Snapshot = Vec<Record>;

// Field record keys
pub const MODULE: &str = "module";
pub const MODEL: &str = "model";
pub const FIELD: &str = "field";
pub const TYPE: &str = "type";
pub const RELATION: &str = "relation";
pub const STORED: &str = "stored";
pub const IS_FUNCTION: &str = "isfunction";
pub const IS_RELATED: &str = "isrelated";
pub const IS_PROPERTY: &str = "isproperty";
pub const REQUIRED: &str = "required";
pub const TABLE: &str = "table";
pub const COLUMN1: &str = "column1";
pub const COLUMN2: &str = "column2";
pub const SELECTION_KEYS: &str = "selection_keys";
pub const INHERITS: &str = "_inherits";
pub const ORDER: &str = "_order";
pub const MODE: &str = "mode";
pub const ATTACHMENT: &str = "attachment";
pub const HAS_DEFAULT: &str = "hasdefault";

// Identified record keys
pub const NAME: &str = "name";
pub const DOMAIN: &str = "domain";
pub const DEFINITION: &str = "definition";
pub const NOUPDATE: &str = "noupdate";
pub const SUFFIX: &str = "suffix";
pub const PREFIX: &str = "prefix";

// Model record keys
pub const MODEL_TYPE: &str = "model_type";

/// Pseudo-key requiring both sides to be the primary owner of their record.
pub const OTHER_PREFIX: &str = "other_prefix";

static NULL: Value = Value::Null;

/// One metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw attribute value; `null` when absent.
    pub fn get(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }

    /// String attribute, or `""` when absent or not a string.
    pub fn str(&self, key: &str) -> &str {
        self.get(key).as_str().unwrap_or("")
    }

    /// Truthiness of an attribute.
    pub fn flag(&self, key: &str) -> bool {
        is_truthy(self.get(key))
    }

    /// Attribute equality where any two falsy values are equal.
    pub fn same(&self, other: &Record, key: &str) -> bool {
        attr_eq(self.get(key), other.get(key))
    }

    /// Attribute rendered for report text.
    pub fn display(&self, key: &str) -> String {
        display_value(self.get(key))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub fn attr_eq(a: &Value, b: &Value) -> bool {
    if !is_truthy(a) && !is_truthy(b) {
        return true;
    }
    a == b
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => format!("'{}'", s),
                    other => display_value(other),
                })
                .collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(_) => value.to_string(),
    }
}

/// Parse a snapshot from raw JSON bytes (an array of objects).
///
/// # Errors
///
/// `InvalidSnapshot` when the bytes are not UTF-8, not JSON, not an array,
/// or contain a non-object entry.
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let op = "parse_snapshot_bytes";
    log_op_start!(op, len = bytes.len() as u64);
    let start = std::time::Instant::now();

    match decode_snapshot(bytes) {
        Ok(snapshot) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                records = snapshot.len() as u64
            );
            Ok(snapshot)
        }
        Err(err) => {
            let err = err.with_op(op);
            log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
            Err(err)
        }
    }
}

fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_message(format!("snapshot is not valid UTF-8: {}", e))
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_message(format!("snapshot is not valid JSON: {}", e))
    })?;

    let Value::Array(entries) = raw else {
        return Err(ExError::new(ExErrorKind::InvalidSnapshot)
            .with_message("snapshot JSON root must be an array"));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => Ok(Record::from(map)),
            _ => Err(ExError::from(DeltaError::RecordNotObject { index })),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_attribute_is_falsy() {
        let record = Record::new().with(MODULE, "base");
        assert!(!record.flag(STORED));
        assert_eq!(record.str(TABLE), "");
        assert_eq!(record.get(RELATION), &Value::Null);
    }

    #[test]
    fn test_falsy_values_compare_equal() {
        let a = Record::new().with(REQUIRED, false);
        let b = Record::new().with(REQUIRED, "");
        let c = Record::new();
        assert!(a.same(&b, REQUIRED));
        assert!(a.same(&c, REQUIRED));
        assert!(!a.same(&Record::new().with(REQUIRED, true), REQUIRED));
    }

    #[test]
    fn test_display_values() {
        assert_eq!(display_value(&json!(true)), "True");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("res.partner")), "res.partner");
        assert_eq!(display_value(&json!(["draft", "done"])), "['draft', 'done']");
        assert_eq!(display_value(&json!(3)), "3");
    }

    #[test]
    fn test_parse_snapshot_bytes() {
        let bytes = br#"[{"module": "base", "model": "res.partner", "field": "name"}]"#;
        let snapshot = parse_snapshot_bytes(bytes).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].str(FIELD), "name");
    }

    #[test]
    fn test_parse_snapshot_rejects_non_array() {
        let err = parse_snapshot_bytes(br#"{"module": "base"}"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
        assert_eq!(err.op(), Some("parse_snapshot_bytes"));
    }

    #[test]
    fn test_parse_snapshot_rejects_scalar_entry() {
        let err = parse_snapshot_bytes(br#"[{"module": "base"}, 4]"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
        assert!(err.message().contains("entry 1"));
    }

    #[test]
    fn test_parse_snapshot_rejects_invalid_utf8() {
        let err = parse_snapshot_bytes(&[0xff, 0xfe]).unwrap_err();
        assert!(err.message().contains("UTF-8"));
    }
}
