use absentee_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Could not complete the request.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let problems = detail_lines(error.data.as_ref());
    if !problems.is_empty() {
        lines.push(String::new());
        lines.push("Problems:".to_string());
        lines.extend(problems);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

/// Validator messages and per-record issues, one bullet each.
fn detail_lines(data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };

    let mut lines = data
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(Value::as_str)
                .map(|message| format!("  - {message}"))
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    if let Some(issues) = data.get("issues").and_then(Value::as_array) {
        for issue in issues {
            let index = issue.get("index").and_then(Value::as_u64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("record");
            let message = issue.get("message").and_then(Value::as_str).unwrap_or("");
            lines.push(format!("  - records[{index}].{field}: {message}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use absentee_client::ClientError;
    use absentee_client::contracts::types::RecordIssue;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run absentee --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Could not complete the request."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run absentee --help"));
        assert!(!rendered.contains("Problems:"));
    }

    #[test]
    fn lists_record_issues_by_index_and_field() {
        let error = ClientError::records_invalid(
            Path::new("/tmp/records.json"),
            vec![RecordIssue::new(2, "returnDate", "returnDate must be present.")],
        );
        let rendered = render_error(&error);
        assert!(rendered.contains("Problems:"));
        assert!(rendered.contains("  - records[2].returnDate: returnDate must be present."));
    }
}
