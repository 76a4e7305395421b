use std::io;

use serde_json::Value;

use super::format::{self, Column, int_field, key_value_rows, str_field};

pub fn render_trips(data: &Value) -> io::Result<String> {
    let history = data
        .get("history")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("trips output requires history"))?;
    let planned = data
        .get("planned")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("trips output requires planned"))?;

    let person = str_field(data, "person");
    if history.is_empty() && planned.is_empty() {
        return Ok([
            format!("No trips recorded for {person}."),
            String::new(),
            format!("Records: {}", str_field(data, "records_path")),
        ]
        .join("\n"));
    }

    let mut lines = vec![format!(
        "Trips for {person} as of {} ({} total)",
        str_field(data, "as_of"),
        int_field(data, "trip_count")
    )];

    for (heading, rows) in [("Planned:", planned), ("History:", history)] {
        if rows.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.extend(trip_table(rows));
    }

    lines.push(String::new());
    lines.push(format!("Records: {}", str_field(data, "records_path")));
    Ok(lines.join("\n"))
}

fn trip_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column::left("Departure"),
        Column::left("Return"),
        Column::right("Official"),
        Column::right("Conservative"),
        Column::left("Status"),
        Column::left("Notes"),
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "departure_date").to_string(),
                str_field(row, "return_date").to_string(),
                int_field(row, "days_official").to_string(),
                int_field(row, "days_conservative").to_string(),
                str_field(row, "status").to_string(),
                row.get("notes")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Trip")
}

pub fn render_days(data: &Value) -> io::Result<String> {
    if data.get("days_official").is_none() {
        return Err(io::Error::other("days output requires day counts"));
    }

    let mut lines = vec![format!(
        "{} to {}",
        str_field(data, "departure_date"),
        str_field(data, "return_date")
    )];
    lines.extend(key_value_rows(
        &[
            ("Official:", int_field(data, "days_official").to_string()),
            ("Conservative:", int_field(data, "days_conservative").to_string()),
            ("Calendar span:", int_field(data, "calendar_span").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}
