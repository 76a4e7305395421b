use std::io;

use serde_json::Value;

use super::format::{
    days, int_field, key_value_rows, progress_bar, risk_text, str_field, window_text,
};

pub fn render_stats(data: &Value) -> io::Result<String> {
    let modes = data
        .get("modes")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("stats output requires modes"))?;

    let person = str_field(data, "person");
    let as_of = str_field(data, "as_of");
    let trip_count = data.get("trip_count").and_then(Value::as_u64).unwrap_or(0);

    let mut lines = vec![format!("Absence summary for {person} as of {as_of}"), String::new()];

    if trip_count == 0 {
        lines.push("No trips recorded yet. The full allowance is available.".to_string());
        lines.push(String::new());
    }

    lines.extend(key_value_rows(
        &[
            ("Trips:", trip_count.to_string()),
            ("First departure:", optional_date(data, "earliest_date")),
            ("Latest trip:", latest_trip(data)),
            ("Rolling window:", window_text(data.get("rolling_window"))),
            ("Fixed window:", window_text(data.get("fixed_window"))),
        ],
        2,
    ));

    let rolling_max = data.get("rolling_max_days").and_then(Value::as_i64).unwrap_or(0);
    let fixed_max = data
        .get("fixed_period_max_days")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    for mode in modes {
        lines.push(String::new());
        lines.push(mode_heading(mode));
        lines.extend(key_value_rows(
            &[
                ("Lifetime:", days(int_field(mode, "total_days"))),
                (
                    "Rolling 12 months:",
                    usage_text(mode, "rolling", rolling_max),
                ),
                (
                    "Fixed period:",
                    usage_text(mode, "fixed_period", fixed_max),
                ),
                ("Risk:", risk_text(mode.get("risk"))),
                ("Per-rule risk:", risk_text(mode.get("rule_risk"))),
            ],
            2,
        ));
        for (flag, rule) in [
            ("exceeds_rolling_limit", "rolling"),
            ("exceeds_fixed_period_limit", "fixed-period"),
        ] {
            if mode.get(flag).and_then(Value::as_bool).unwrap_or(false) {
                lines.push(format!("  Over the {rule} limit."));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("Records: {}", str_field(data, "records_path")));
    Ok(lines.join("\n"))
}

fn mode_heading(mode: &Value) -> String {
    match mode.get("mode").and_then(Value::as_str) {
        Some("official") => "Official count (departure and return days excluded):".to_string(),
        Some("conservative") => "Conservative count (one boundary day included):".to_string(),
        Some(other) => format!("{other}:"),
        None => "Counts:".to_string(),
    }
}

fn usage_text(mode: &Value, prefix: &str, max_days: i64) -> String {
    let used = int_field(mode, &format!("{prefix}_days"));
    let remaining = int_field(mode, &format!("{prefix}_remaining"));
    let percentage = mode
        .get(format!("{prefix}_percentage"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    format!(
        "{used} of {max_days}  {} {percentage}%  ({} left)",
        progress_bar(percentage),
        days(remaining)
    )
}

fn latest_trip(data: &Value) -> String {
    match (
        data.get("latest_departure_date").and_then(Value::as_str),
        data.get("latest_return_date").and_then(Value::as_str),
    ) {
        (Some(departure), Some(returned)) => format!("{departure} to {returned}"),
        _ => "none".to_string(),
    }
}

fn optional_date(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or("none")
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_stats;

    #[test]
    fn renders_both_modes_with_risk_labels() {
        let data = json!({
            "person": "self",
            "as_of": "2026-10-18",
            "records_path": "/tmp/records.json",
            "trip_count": 2,
            "earliest_date": "2025-09-01",
            "latest_departure_date": "2026-07-01",
            "latest_return_date": "2026-07-11",
            "rolling_window": {"start": "2025-10-18", "end": "2026-10-18"},
            "rolling_max_days": 180,
            "fixed_window": {"start": "2025-10-15", "end": "2030-10-15"},
            "fixed_period_max_days": 450,
            "modes": [
                {
                    "mode": "official",
                    "total_days": 69,
                    "rolling_days": 22,
                    "rolling_remaining": 158,
                    "rolling_percentage": 12,
                    "exceeds_rolling_limit": false,
                    "fixed_period_days": 25,
                    "fixed_period_remaining": 425,
                    "fixed_period_percentage": 6,
                    "exceeds_fixed_period_limit": false,
                    "risk": {"level": "safe", "label": "Within safe range"},
                    "rule_risk": {"level": "safe", "label": "Within safe range"}
                },
                {
                    "mode": "conservative",
                    "total_days": 71,
                    "rolling_days": 190,
                    "rolling_remaining": 0,
                    "rolling_percentage": 100,
                    "exceeds_rolling_limit": true,
                    "fixed_period_days": 27,
                    "fixed_period_remaining": 423,
                    "fixed_period_percentage": 6,
                    "exceeds_fixed_period_limit": false,
                    "risk": {"level": "safe", "label": "Within safe range"},
                    "rule_risk": {"level": "danger", "label": "Close to the limit"}
                }
            ]
        });

        let rendered = render_stats(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Absence summary for self as of 2026-10-18"));
            assert!(text.contains("Latest trip:"));
            assert!(text.contains("2026-07-01 to 2026-07-11"));
            assert!(text.contains("22 of 180"));
            assert!(text.contains("Within safe range (safe)"));
            assert!(text.contains("Per-rule risk:"));
            assert!(text.contains("Close to the limit (danger)"));
            assert!(text.contains("Over the rolling limit."));
            assert!(!text.contains("Over the fixed-period limit."));
        }
    }

    #[test]
    fn rejects_payload_without_modes() {
        assert!(render_stats(&json!({})).is_err());
    }
}
