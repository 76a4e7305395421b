use chrono::{Datelike, Duration, NaiveDate};

use crate::engine::types::CountingMode;
use crate::{ClientError, ClientResult};

/// Absence days for one trip under `mode`, floored at zero.
///
/// Official: whole days strictly between departure and return.
/// Conservative: the raw day difference, so one boundary day counts.
pub fn compute_days(departure: NaiveDate, return_date: NaiveDate, mode: CountingMode) -> i64 {
    let difference = days_between(departure, return_date);
    match mode {
        CountingMode::Official => (difference - 1).max(0),
        CountingMode::Conservative => difference.max(0),
    }
}

/// Signed day difference `end - start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Calendar days physically touched by the trip, both ends included.
pub fn calendar_span(departure: NaiveDate, return_date: NaiveDate) -> i64 {
    if return_date < departure {
        return 0;
    }
    days_between(departure, return_date) + 1
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !looks_like_iso_date(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

pub fn parse_iso_date_strict(
    value: &str,
    field_name: &str,
    command: &str,
) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

/// Shifts `date` by `months`, clamping the day to the target month's length
/// (Mar 31 minus one month is Feb 28 or 29).
pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let current_month = i32::try_from(date.month()).unwrap_or(1);
    let mut raw_month = current_month + months;
    let mut year = date.year();

    while raw_month > 12 {
        raw_month -= 12;
        year += 1;
    }
    while raw_month < 1 {
        raw_month += 12;
        year -= 1;
    }

    let month_u32 = u32::try_from(raw_month).unwrap_or(1);
    let day = date.day().min(days_in_month(year, month_u32));
    if let Some(result) = NaiveDate::from_ymd_opt(year, month_u32, day) {
        return result;
    }
    date
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    date.with_day(last).unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        add_months_clamped, calendar_span, compute_days, format_iso_date, last_day_of_month,
        parse_calendar_date, parse_iso_date_strict,
    };
    use crate::engine::types::CountingMode;

    fn date(value: &str) -> NaiveDate {
        parse_calendar_date(value).unwrap_or(NaiveDate::MIN)
    }

    #[test]
    fn official_and_conservative_counts_for_reference_trip() {
        let departure = date("2024-12-01");
        let return_date = date("2024-12-05");
        assert_eq!(compute_days(departure, return_date, CountingMode::Official), 3);
        assert_eq!(compute_days(departure, return_date, CountingMode::Conservative), 4);
    }

    #[test]
    fn same_day_and_next_day_trips() {
        let day = date("2025-03-10");
        assert_eq!(compute_days(day, day, CountingMode::Official), 0);
        assert_eq!(compute_days(day, day, CountingMode::Conservative), 0);

        let next = date("2025-03-11");
        assert_eq!(compute_days(day, next, CountingMode::Official), 0);
        assert_eq!(compute_days(day, next, CountingMode::Conservative), 1);

        let two_later = date("2025-03-12");
        assert_eq!(compute_days(day, two_later, CountingMode::Official), 1);
    }

    #[test]
    fn inverted_ranges_floor_at_zero() {
        let departure = date("2025-05-10");
        let return_date = date("2025-05-01");
        assert_eq!(compute_days(departure, return_date, CountingMode::Official), 0);
        assert_eq!(compute_days(departure, return_date, CountingMode::Conservative), 0);
        assert_eq!(calendar_span(departure, return_date), 0);
    }

    #[test]
    fn counts_never_exceed_calendar_span() {
        let departure = date("2024-01-01");
        for offset in 0..400 {
            let return_date = super::add_days(departure, offset);
            let official = compute_days(departure, return_date, CountingMode::Official);
            let conservative = compute_days(departure, return_date, CountingMode::Conservative);
            assert!(official >= 0);
            assert!(official <= conservative);
            assert!(conservative <= calendar_span(departure, return_date));
        }
    }

    #[test]
    fn month_clamping_handles_end_of_month_transitions() {
        let mar_31 = date("2024-03-31");
        assert_eq!(format_iso_date(&add_months_clamped(mar_31, -1)), "2024-02-29");
        assert_eq!(format_iso_date(&add_months_clamped(mar_31, -13)), "2023-02-28");
        assert_eq!(format_iso_date(&add_months_clamped(mar_31, 12)), "2025-03-31");
    }

    #[test]
    fn last_day_of_month_respects_leap_years() {
        assert_eq!(format_iso_date(&last_day_of_month(date("2028-02-03"))), "2028-02-29");
        assert_eq!(format_iso_date(&last_day_of_month(date("2027-02-03"))), "2027-02-28");
        assert_eq!(format_iso_date(&last_day_of_month(date("2026-11-30"))), "2026-11-30");
    }

    #[test]
    fn strict_parsing_rejects_non_calendar_values() {
        assert!(parse_iso_date_strict("2026-02-31", "today", "stats").is_err());
        assert!(parse_iso_date_strict("2026/02/01", "today", "stats").is_err());
        assert!(parse_iso_date_strict("2026-02-01", "today", "stats").is_ok());
        assert!(parse_calendar_date("20260201").is_none());
    }
}
