use std::fs;
use std::path::{Path, PathBuf};

use absentee_client::commands::common::ScopeOptions;
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub const TODAY: &str = "2026-10-18";

pub fn temp_records_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let path = dir.path().join("records.json");
    Ok((dir, path))
}

pub fn write_records(path: &Path, records: &[Value]) {
    let body = serde_json::to_string_pretty(&json!({ "records": records }));
    assert!(body.is_ok());
    if let Ok(body) = body {
        assert!(fs::write(path, body).is_ok());
    }
}

pub fn record(id: &str, person: &str, departure: &str, return_date: &str) -> Value {
    json!({
        "id": id,
        "person": person,
        "departureDate": departure,
        "returnDate": return_date,
        "createdAt": 1_733_011_200_000_i64,
    })
}

pub fn scope<'a>(path: &'a Path, person: Option<&str>) -> ScopeOptions<'a> {
    ScopeOptions {
        person: person.map(std::string::ToString::to_string),
        today: Some(TODAY.to_string()),
        records_override: Some(path),
        ..ScopeOptions::default()
    }
}

/// Records for `self` spanning history, an ongoing trip and plans, plus one
/// spouse trip that must never leak into `self` totals.
pub fn mixed_history() -> Vec<Value> {
    vec![
        record("trip_a", "self", "2024-05-01", "2024-05-31"),
        record("trip_b", "self", "2025-09-01", "2025-11-01"),
        record("trip_c", "self", "2026-07-01", "2026-07-11"),
        record("trip_d", "self", "2026-10-10", "2026-10-25"),
        record("trip_e", "self", "2027-01-05", "2027-01-25"),
        record("trip_f", "spouse", "2026-01-01", "2026-06-30"),
    ]
}
