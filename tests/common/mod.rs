#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::PathBuf;

pub const PROJECT_KEY: &str = "PROJ";
pub const ACTIVE_STATUS: i64 = 1;
pub const DEPRECATED_STATUS: i64 = 99;

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(relative)
}

/// A test case as `GET /testcases` returns it.
pub fn remote_case(id: i64, key: &str, name: &str, status_id: i64, android: Option<&str>) -> Value {
    json!({
        "id": id,
        "key": key,
        "name": name,
        "project": {"id": 10, "self": "https://api.example/projects/10"},
        "priority": {"id": 3},
        "status": {"id": status_id, "self": format!("https://api.example/statuses/{status_id}")},
        "labels": ["mobile"],
        "customFields": {
            "Android Auto": android,
            "iOS Auto": null,
            "Component": "checkout"
        }
    })
}

pub fn page(values: Vec<Value>) -> Value {
    json!({
        "maxResults": 1900,
        "startAt": 0,
        "total": values.len(),
        "isLast": true,
        "values": values
    })
}

/// Catalog used by the checker scenarios.
pub fn catalog() -> Value {
    page(vec![
        remote_case(1, "PROJ-T1", "Login", ACTIVE_STATUS, Some("Done")),
        remote_case(3, "PROJ-T3", "Checkout", ACTIVE_STATUS, Some("Done")),
        remote_case(5, "PROJ-T5", "Profile", ACTIVE_STATUS, None),
        remote_case(6, "PROJ-T6", "Add to cart", DEPRECATED_STATUS, Some("Done")),
        remote_case(7, "PROJ-T7", "Legacy onboarding", DEPRECATED_STATUS, Some("Done")),
    ])
}

pub fn statuses() -> Value {
    page(vec![
        json!({"id": ACTIVE_STATUS, "name": "Draft", "archived": false}),
        json!({"id": 2, "name": "Approved", "archived": false}),
        json!({"id": DEPRECATED_STATUS, "name": "Deprecated", "archived": false}),
    ])
}
