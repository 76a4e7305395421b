use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::RecordIssue;

pub(crate) const RECORDS_HELP_COMMAND: &str = "absentee --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `absentee {cmd} --help` for usage."),
            None => "Run `absentee --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn record_validation_failed(errors: Vec<String>) -> Self {
        let count = errors.len();
        Self::new(
            "record_validation_failed",
            &format!("Trip was not recorded: {count} field problems need fixes."),
            vec![
                "Fix the listed problems and retry.".to_string(),
                "Dates use YYYY-MM-DD and the return date must not precede the departure date."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "errors": errors,
        }))
    }

    pub fn record_not_found(record_id: &str) -> Self {
        Self::new(
            "record_not_found",
            &format!("Trip id `{record_id}` was not found."),
            vec!["Run `absentee trips` to list valid trip ids.".to_string()],
        )
        .with_data(json!({
            "record_id": record_id,
        }))
    }

    pub fn records_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "records_not_found",
            &format!("No travel records document at `{location}`."),
            vec![
                format!("Create `{location}` with a top-level `records` array."),
                "Or pass `--records <path>`, or set `ABSENTEE_HOME` to the directory holding `records.json`."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "records_path": location,
            "help_command": RECORDS_HELP_COMMAND,
        }))
    }

    pub fn records_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "records_unreadable",
            &format!("Could not read travel records at `{location}`: {detail}"),
            vec![format!("Verify `{location}` exists and is readable.")],
        )
    }

    pub fn records_invalid(path: &Path, issues: Vec<RecordIssue>) -> Self {
        let location = path.display().to_string();
        let issue_count = issues.len();
        Self::new(
            "records_invalid",
            &format!("Travel records at `{location}` failed validation: {issue_count} problems found."),
            vec![
                "Fix the listed records in the source document.".to_string(),
                "Each record needs `id`, `person`, `departureDate` and `returnDate`.".to_string(),
            ],
        )
        .with_data(json!({
            "records_path": location,
            "issues": issues,
        }))
    }

    pub fn records_malformed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "records_invalid",
            &format!("Travel records at `{location}` are not a valid JSON document: {detail}"),
            vec![
                "The document must be a JSON object with a top-level `records` array.".to_string(),
            ],
        )
        .with_data(json!({
            "records_path": location,
        }))
    }

    pub fn records_home_unresolved() -> Self {
        Self::new(
            "records_home_unresolved",
            "Could not resolve a home directory for the travel records document.",
            vec!["Pass `--records <path>` or set `ABSENTEE_HOME`.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
