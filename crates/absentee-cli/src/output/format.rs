use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const BAR_WIDTH: usize = 20;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a padded table, or one labelled block per row when the columns
/// cannot fit in `max_width`.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let total = INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    if total > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| value.chars().count())
                .fold(column.name.len(), cmp::max)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let entries_per_row = rows.iter().enumerate().map(|(row_index, row)| {
        let entries = columns
            .iter()
            .enumerate()
            .map(|(index, column)| (column.name, row.get(index).cloned().unwrap_or_default()))
            .collect::<Vec<(&str, String)>>();
        (row_index, entries)
    });

    let mut output = Vec::new();
    for (row_index, entries) in entries_per_row {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        output.extend(key_value_rows(&entries, 4));
    }
    output
}

/// Fixed-width usage bar, e.g. `[#####...............]`.
pub fn progress_bar(percentage: u64) -> String {
    let filled = (cmp::min(percentage, 100) as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

pub fn days(value: i64) -> String {
    if value.abs() == 1 {
        format!("{value} day")
    } else {
        format!("{value} days")
    }
}

pub fn risk_text(risk: Option<&Value>) -> String {
    let Some(risk) = risk else {
        return "unknown".to_string();
    };
    let level = str_field(risk, "level");
    let label = str_field(risk, "label");
    format!("{label} ({level})")
}

pub fn window_text(window: Option<&Value>) -> String {
    match window {
        Some(window) => format!(
            "{} to {}",
            str_field(window, "start"),
            str_field(window, "end")
        ),
        None => "unknown".to_string(),
    }
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

pub fn int_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Column, days, key_value_rows, progress_bar, render_table_or_blocks};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rolling:", "24 days".to_string()),
                ("Remaining:", "156 days".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rolling:    24 days");
        assert_eq!(rows[1], "  Remaining:  156 days");
    }

    #[test]
    fn table_pads_and_right_aligns_numbers() {
        let columns = [Column::left("Month"), Column::right("Used")];
        let rows = vec![
            vec!["2026-10".to_string(), "26".to_string()],
            vec!["2026-11".to_string(), "125".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 80, "Month");
        assert_eq!(rendered[0], "  Month    Used");
        assert_eq!(rendered[1], "  2026-10    26");
        assert_eq!(rendered[2], "  2026-11   125");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("Departure"),
            Column::left("Return"),
            Column::left("Notes"),
        ];
        let rows = vec![vec![
            "2026-07-01".to_string(),
            "2026-07-11".to_string(),
            "family visit".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 20, "Trip");
        assert_eq!(rendered[0], "  Trip 1:");
        assert!(rendered[1].contains("Departure"));
        assert!(rendered[3].contains("family visit"));
    }

    #[test]
    fn progress_bar_clamps_and_rounds() {
        assert_eq!(progress_bar(0), "[....................]");
        assert_eq!(progress_bar(50), "[##########..........]");
        assert_eq!(progress_bar(140), "[####################]");
    }

    #[test]
    fn day_labels_pluralize() {
        assert_eq!(days(1), "1 day");
        assert_eq!(days(-10), "-10 days");
        assert_eq!(days(0), "0 days");
    }
}
