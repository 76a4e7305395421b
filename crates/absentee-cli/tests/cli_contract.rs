use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::{Value, json};
use tempfile::TempDir;

const EXPECTED_ROOT_HELP: &str = "Absentee - absence-day tracking for settlement applications

Usage:
  absentee <command>

Start here:
  absentee stats
  absentee forecast
  absentee --help
";

fn temp_home() -> TempDir {
    let created = tempfile::Builder::new()
        .prefix("absentee-cli-test-")
        .tempdir();
    assert!(created.is_ok());
    match created {
        Ok(dir) => dir,
        Err(error) => panic!("temp dir unavailable: {error}"),
    }
}

fn run_cli_in_home(home: &Path, args: &[&str]) -> (Option<i32>, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_absentee"));
    command.args(args);
    command.env("ABSENTEE_HOME", home);
    command.env_remove("ABSENTEE_LOG");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = command.output();
    assert!(output.is_ok());
    if let Ok(result) = output {
        let stdout = String::from_utf8(result.stdout);
        assert!(stdout.is_ok());
        if let Ok(stdout_text) = stdout {
            return (result.status.code(), stdout_text);
        }
    }
    (None, String::new())
}

fn write_history(home: &Path) {
    let trip = |id: &str, person: &str, departure: &str, return_date: &str| {
        json!({
            "id": id,
            "person": person,
            "departureDate": departure,
            "returnDate": return_date,
            "createdAt": 1_733_011_200_000_i64,
        })
    };
    let document = json!({
        "records": [
            trip("trip_a", "self", "2024-05-01", "2024-05-31"),
            trip("trip_b", "self", "2025-09-01", "2025-11-01"),
            trip("trip_c", "self", "2026-07-01", "2026-07-11"),
            trip("trip_d", "self", "2026-10-10", "2026-10-25"),
            trip("trip_e", "self", "2027-01-05", "2027-01-25"),
            trip("trip_f", "spouse", "2026-01-01", "2026-06-30"),
        ]
    });
    let body = serde_json::to_string_pretty(&document);
    assert!(body.is_ok());
    if let Ok(body) = body {
        assert!(fs::write(home.join("records.json"), body).is_ok());
    }
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok());
    parsed.unwrap_or(Value::Null)
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["ok"], Value::Bool(false));
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    payload
}

#[test]
fn bare_invocation_prints_root_help() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &[]);
    assert_eq!(code, Some(0));
    assert_eq!(body, EXPECTED_ROOT_HELP);
}

#[test]
fn top_level_help_lists_every_command() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["--help"]);
    assert_eq!(code, Some(0));
    for command in ["stats", "trips", "forecast", "check", "days"] {
        assert!(body.contains(&format!("absentee {command}")));
    }
}

#[test]
fn stats_json_reports_both_counting_modes() {
    let home = temp_home();
    write_history(home.path());
    let (code, body) = run_cli_in_home(home.path(), &["stats", "--today", "2026-10-18", "--json"]);
    assert_eq!(code, Some(0));

    let payload = parse_json(&body);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["command"], Value::String("stats".to_string()));
    assert_eq!(payload["data"]["person"], Value::String("self".to_string()));
    assert_eq!(payload["data"]["trip_count"], json!(5));

    let modes = payload["data"]["modes"].as_array().cloned().unwrap_or_default();
    assert_eq!(modes.len(), 2);
    let conservative = modes
        .iter()
        .find(|row| row["mode"] == "conservative")
        .cloned()
        .unwrap_or(Value::Null);
    assert_eq!(conservative["total_days"], json!(136));
    assert_eq!(conservative["rolling_days"], json!(32));
    assert_eq!(conservative["rolling_remaining"], json!(148));
    assert_eq!(conservative["fixed_period_days"], json!(62));
}

#[test]
fn stats_text_shows_rolling_usage() {
    let home = temp_home();
    write_history(home.path());
    let (code, body) = run_cli_in_home(home.path(), &["stats", "--today", "2026-10-18"]);
    assert_eq!(code, Some(0));
    assert!(body.contains("2026-10-18"));
    assert!(body.contains("148"));
}

#[test]
fn spouse_scope_ignores_self_trips() {
    let home = temp_home();
    write_history(home.path());
    let (code, body) = run_cli_in_home(
        home.path(),
        &["trips", "--person", "spouse", "--today", "2026-10-18", "--json"],
    );
    assert_eq!(code, Some(0));
    let payload = parse_json(&body);
    assert_eq!(payload["data"]["trip_count"], json!(1));
    assert_eq!(payload["data"]["history"][0]["id"], json!("trip_f"));
}

#[test]
fn days_text_prints_all_three_counts() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["days", "2024-12-01", "2024-12-05"]);
    assert_eq!(code, Some(0));
    assert!(body.starts_with("2024-12-01 to 2024-12-05"));
    assert!(body.contains("Official:"));
    assert!(body.contains("Calendar span:"));
}

#[test]
fn missing_records_document_is_a_user_error() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["stats", "--json"]);
    assert_eq!(code, Some(1));
    assert_json_error_contract(&body, "records_not_found");
}

#[test]
fn missing_records_text_error_names_the_code() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["forecast"]);
    assert_eq!(code, Some(1));
    assert!(body.starts_with("Could not complete the request."));
    assert!(body.contains("  Error:    records_not_found"));
}

#[test]
fn check_rejects_inverted_candidate() {
    let home = temp_home();
    write_history(home.path());
    let (code, body) = run_cli_in_home(
        home.path(),
        &["check", "2027-04-30", "2027-03-01", "--today", "2026-10-18", "--json"],
    );
    assert_eq!(code, Some(1));
    assert_json_error_contract(&body, "record_validation_failed");
}

#[test]
fn check_reports_peak_with_candidate() {
    let home = temp_home();
    write_history(home.path());
    let (code, body) = run_cli_in_home(
        home.path(),
        &["check", "2027-03-01", "2027-04-30", "--today", "2026-10-18", "--json"],
    );
    assert_eq!(code, Some(0));
    let payload = parse_json(&body);
    assert_eq!(payload["data"]["impact"]["peak_rolling_used_without"], json!(45));
    assert_eq!(payload["data"]["impact"]["peak_rolling_used_with"], json!(105));
    assert_eq!(payload["data"]["impact"]["over_limit_with"], json!(false));
}

#[test]
fn unknown_person_is_rejected_before_loading_records() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["stats", "--person", "cousin", "--json"]);
    assert_eq!(code, Some(1));
    let payload = assert_json_error_contract(&body, "invalid_argument");
    assert_eq!(payload["data"]["command_hint"], json!("stats"));
}

#[test]
fn malformed_date_argument_is_reported_as_json() {
    let home = temp_home();
    let (code, body) = run_cli_in_home(home.path(), &["days", "2024-13-01", "2024-12-05", "--json"]);
    assert_eq!(code, Some(1));
    assert_json_error_contract(&body, "invalid_argument");
}

#[test]
fn closing_stdout_early_does_not_panic() {
    let home = temp_home();
    write_history(home.path());
    let mut producer = Command::new(env!("CARGO_BIN_EXE_absentee"));
    producer.args(["forecast", "--today", "2026-10-18", "--json"]);
    producer.env("ABSENTEE_HOME", home.path());
    producer.stdout(Stdio::piped());
    producer.stderr(Stdio::piped());

    let spawned = producer.spawn();
    assert!(spawned.is_ok());
    if let Ok(mut child) = spawned {
        if let Some(stdout_pipe) = child.stdout.take() {
            let mut reader = BufReader::new(stdout_pipe);
            let mut first_line = String::new();
            assert!(reader.read_line(&mut first_line).is_ok());
            assert!(!first_line.is_empty());
            drop(reader);
        }

        let status = child.wait();
        assert!(status.is_ok());
        if let Some(mut stderr_pipe) = child.stderr.take() {
            let mut stderr_text = String::new();
            assert!(stderr_pipe.read_to_string(&mut stderr_text).is_ok());
            assert!(!stderr_text.contains("panicked"));
        }
    }
}
