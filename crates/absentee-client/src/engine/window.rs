use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::date::{add_months_clamped, compute_days, days_between};
use crate::engine::types::{CountingMode, TravelRecord};

/// Inclusive evaluation window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window of `months` ending on `end`, e.g. the twelve months up to today.
    pub fn trailing_months(end: NaiveDate, months: u32) -> Self {
        let lookback = i32::try_from(months).unwrap_or(i32::MAX);
        Self {
            start: add_months_clamped(end, -lookback),
            end,
        }
    }

    /// Day difference between the bounds.
    pub fn length_days(&self) -> i64 {
        days_between(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A trip overlaps when either travel date lands inside the window or the
/// trip spans the whole window. Touching a bound counts.
pub fn records_overlap(record: &TravelRecord, window: DateWindow) -> bool {
    window.contains(record.departure_date)
        || window.contains(record.return_date)
        || (record.departure_date <= window.start && record.return_date >= window.end)
}

/// The trip's contribution after clipping it to `window`.
pub fn days_in_window(record: &TravelRecord, window: DateWindow, mode: CountingMode) -> i64 {
    let effective_start = record.departure_date.max(window.start);
    let effective_end = record.return_date.min(window.end);
    if effective_end < effective_start {
        return 0;
    }
    compute_days(effective_start, effective_end, mode)
}

#[cfg(test)]
mod tests {
    use super::{DateWindow, days_in_window, records_overlap};
    use crate::engine::testkit::{date, trip, window};
    use crate::engine::types::CountingMode;

    #[test]
    fn contained_trip_matches_full_trip_counts() {
        let record = trip("2025-03-01", "2025-03-20");
        let year = window("2025-01-01", "2025-12-31");
        for mode in CountingMode::ALL {
            assert_eq!(days_in_window(&record, year, mode), record.days(mode));
        }
        assert!(records_overlap(&record, year));
    }

    #[test]
    fn trips_outside_window_contribute_nothing() {
        let year = window("2025-01-01", "2025-12-31");
        let before = trip("2024-11-01", "2024-12-31");
        let after = trip("2026-01-01", "2026-01-15");
        for record in [&before, &after] {
            assert!(!records_overlap(record, year));
            for mode in CountingMode::ALL {
                assert_eq!(days_in_window(record, year, mode), 0);
            }
        }
    }

    #[test]
    fn straddling_trips_are_clipped_to_the_window() {
        let year = window("2025-01-01", "2025-12-31");
        let straddle_start = trip("2024-12-20", "2025-01-11");
        assert!(records_overlap(&straddle_start, year));
        assert_eq!(days_in_window(&straddle_start, year, CountingMode::Conservative), 10);
        assert_eq!(days_in_window(&straddle_start, year, CountingMode::Official), 9);

        let straddle_end = trip("2025-12-25", "2026-01-05");
        assert_eq!(days_in_window(&straddle_end, year, CountingMode::Conservative), 6);
    }

    #[test]
    fn trip_spanning_the_window_is_bounded_by_it() {
        let month = window("2025-06-01", "2025-06-30");
        let long_trip = trip("2025-05-01", "2025-08-01");
        assert!(records_overlap(&long_trip, month));
        assert_eq!(days_in_window(&long_trip, month, CountingMode::Conservative), 29);
        assert_eq!(days_in_window(&long_trip, month, CountingMode::Official), 28);
    }

    #[test]
    fn touching_a_bound_counts_as_overlap_with_zero_days() {
        let month = window("2025-06-01", "2025-06-30");
        let returns_on_start = trip("2025-05-20", "2025-06-01");
        assert!(records_overlap(&returns_on_start, month));
        assert_eq!(days_in_window(&returns_on_start, month, CountingMode::Conservative), 0);
    }

    #[test]
    fn trailing_window_clamps_month_ends() {
        let trailing = DateWindow::trailing_months(date("2024-02-29"), 12);
        assert_eq!(trailing.start, date("2023-02-28"));
        assert_eq!(trailing.end, date("2024-02-29"));
    }
}
