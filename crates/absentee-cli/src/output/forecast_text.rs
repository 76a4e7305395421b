use std::io;

use serde_json::Value;

use super::format::{
    self, Column, days, int_field, key_value_rows, progress_bar, risk_text, str_field,
    window_text,
};

pub fn render_forecast(data: &Value) -> io::Result<String> {
    let projection = data
        .get("projection")
        .ok_or_else(|| io::Error::other("forecast output requires projection"))?;

    let mut lines = vec![
        format!(
            "Forecast for {} as of {}",
            str_field(data, "person"),
            str_field(data, "as_of")
        ),
        format!(
            "  {} completed, {} ongoing or planned (conservative count)",
            int_field(data, "completed_trip_count"),
            int_field(data, "upcoming_trip_count")
        ),
        String::new(),
    ];
    lines.extend(render_projection(projection)?);
    lines.push(String::new());
    lines.push(format!("Records: {}", str_field(data, "records_path")));
    Ok(lines.join("\n"))
}

pub fn render_check(data: &Value) -> io::Result<String> {
    let candidate = data
        .get("candidate")
        .ok_or_else(|| io::Error::other("check output requires candidate"))?;
    let impact = data
        .get("impact")
        .ok_or_else(|| io::Error::other("check output requires impact"))?;

    let mut lines = vec![
        format!(
            "Hypothetical trip for {}: {} to {} ({})",
            str_field(data, "person"),
            str_field(candidate, "departure_date"),
            str_field(candidate, "return_date"),
            str_field(candidate, "status")
        ),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Official days:", int_field(candidate, "days_official").to_string()),
            (
                "Conservative days:",
                int_field(candidate, "days_conservative").to_string(),
            ),
            ("Calendar days:", int_field(candidate, "calendar_span").to_string()),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Impact:".to_string());
    let peak_month = impact
        .get("peak_month_with")
        .and_then(Value::as_str)
        .unwrap_or("none");
    lines.extend(key_value_rows(
        &[
            (
                "Peak rolling usage:",
                format!(
                    "{} -> {} (peak {peak_month})",
                    int_field(impact, "peak_rolling_used_without"),
                    int_field(impact, "peak_rolling_used_with")
                ),
            ),
            ("Peak risk:", risk_text(impact.get("peak_risk_with"))),
            (
                "Fixed period used:",
                format!(
                    "{} -> {}",
                    int_field(impact, "fixed_period_used_without"),
                    int_field(impact, "fixed_period_used_with")
                ),
            ),
            (
                "Left after plans:",
                days(int_field(impact, "after_plan_remaining_with")),
            ),
            ("Pace:", verdict_text(str_field(impact, "pace_verdict_with")).to_string()),
        ],
        2,
    ));
    if impact
        .get("over_limit_with")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push("  This trip would take planned absences over the rolling limit.".to_string());
    }

    if let Some(with_trip) = data.get("with_trip") {
        lines.push(String::new());
        lines.push("Forecast with this trip:".to_string());
        lines.push(String::new());
        lines.extend(render_projection(with_trip)?);
    }
    Ok(lines.join("\n"))
}

fn render_projection(projection: &Value) -> io::Result<Vec<String>> {
    let summary = projection
        .get("summary")
        .ok_or_else(|| io::Error::other("projection requires summary"))?;
    let monthly = projection
        .get("monthly")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("projection requires monthly rows"))?;

    let mut lines = vec!["Planning summary:".to_string()];
    lines.extend(key_value_rows(
        &[
            (
                "Used now:",
                format!(
                    "{}  {}",
                    days(int_field(summary, "current_used")),
                    risk_text(summary.get("current_risk"))
                ),
            ),
            ("Left now:", days(int_field(summary, "current_remaining"))),
            (
                "Planned:",
                format!(
                    "{} across {} trips",
                    days(int_field(summary, "planned_days")),
                    int_field(summary, "planned_trip_count")
                ),
            ),
            (
                "Left after plans:",
                format!(
                    "{}  {}",
                    days(int_field(summary, "after_plan_remaining")),
                    risk_text(summary.get("after_plan_risk"))
                ),
            ),
        ],
        2,
    ));
    if summary
        .get("over_limit")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push("  Planned trips exceed the rolling allowance.".to_string());
    }

    lines.push(String::new());
    lines.push("Rolling 12-month usage at each month end:".to_string());
    let columns = [
        Column::left("Month"),
        Column::right("Used"),
        Column::right("Left"),
        Column::left("Usage"),
        Column::left("Risk"),
    ];
    let rows = monthly
        .iter()
        .map(|month| {
            let percentage = month.get("percentage").and_then(Value::as_u64).unwrap_or(0);
            vec![
                str_field(month, "month").to_string(),
                int_field(month, "used").to_string(),
                int_field(month, "remaining").to_string(),
                format!("{} {percentage}%", progress_bar(percentage)),
                month
                    .get("risk")
                    .map(|risk| str_field(risk, "level"))
                    .unwrap_or("unknown")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Month",
    ));

    if let Some(fixed) = projection.get("fixed_period") {
        let percentage = fixed.get("percentage").and_then(Value::as_u64).unwrap_or(0);
        lines.push(String::new());
        lines.push(format!(
            "Fixed period {}:",
            window_text(fixed.get("window"))
        ));
        lines.extend(key_value_rows(
            &[
                (
                    "Used:",
                    format!(
                        "{} of {}  {} {percentage}%",
                        int_field(fixed, "used"),
                        int_field(fixed, "max_days"),
                        progress_bar(percentage)
                    ),
                ),
                ("Left:", days(int_field(fixed, "remaining"))),
                ("Risk:", risk_text(fixed.get("risk"))),
            ],
            2,
        ));
    }

    if let Some(pace) = projection.get("pace") {
        let time = pace.get("time_percent").and_then(Value::as_f64).unwrap_or(0.0);
        let usage = pace.get("usage_percent").and_then(Value::as_f64).unwrap_or(0.0);
        let through = if pace
            .get("includes_planned")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            format!("{} (includes planned trips)", str_field(pace, "effective_date"))
        } else {
            str_field(pace, "effective_date").to_string()
        };
        lines.push(String::new());
        lines.push("Pace:".to_string());
        lines.extend(key_value_rows(
            &[
                ("Measured through:", through),
                ("Time elapsed:", format!("{time:.1}%")),
                ("Allowance used:", format!("{usage:.1}%")),
                ("Verdict:", verdict_text(str_field(pace, "verdict")).to_string()),
            ],
            2,
        ));
    }

    Ok(lines)
}

fn verdict_text(verdict: &str) -> &'static str {
    match verdict {
        "using_too_fast" => "Using the allowance faster than time is passing",
        "using_reasonably" => "Using the allowance at a reasonable pace",
        _ => "unknown",
    }
}
