use schemadelta_core::Record;
use serde_json::{json, Value};

/// Build a record from a JSON object literal
#[allow(dead_code)]
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => Record::from(map),
        other => panic!("fixture must be a JSON object, got {}", other),
    }
}

/// Stored plain field record
#[allow(dead_code)]
pub fn field(module: &str, model: &str, name: &str, ty: &str) -> Record {
    record(json!({
        "module": module,
        "model": model,
        "field": name,
        "type": ty,
        "stored": true,
        "mode": "",
    }))
}

/// Model existence record
#[allow(dead_code)]
pub fn model(module: &str, name: &str) -> Record {
    record(json!({"module": module, "model": name, "model_type": ""}))
}

/// Identified record; prefix and suffix are derived from the dotted name.
#[allow(dead_code)]
pub fn xmlid(module: &str, model: &str, name: &str) -> Record {
    let (prefix, suffix) = name.split_once('.').unwrap_or(("", name));
    record(json!({
        "module": module,
        "model": model,
        "name": name,
        "prefix": prefix,
        "suffix": suffix,
        "domain": false,
        "definition": "",
        "noupdate": false,
    }))
}

/// Report lines starting with `DEL` or `NEW` across all module groups
#[allow(dead_code)]
pub fn del_new_lines(report: &schemadelta_core::Report) -> Vec<String> {
    report
        .groups()
        .flat_map(|(_, lines)| lines.iter())
        .filter(|line| line.contains(": DEL") || line.contains(": NEW"))
        .cloned()
        .collect()
}
