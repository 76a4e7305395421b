use chrono::NaiveDate;

use crate::engine::policy::ABSENCE_POLICY_V1;
use crate::engine::types::{CountingMode, Person, TravelRecord};
use crate::engine::window::{DateWindow, days_in_window, records_overlap};

/// Clipped days summed over every trip that overlaps `window`. Callers
/// filter by person beforehand.
pub fn sum_in_window<'a, I>(trips: I, window: DateWindow, mode: CountingMode) -> i64
where
    I: IntoIterator<Item = &'a TravelRecord>,
{
    trips
        .into_iter()
        .filter(|record| records_overlap(record, window))
        .map(|record| days_in_window(record, window, mode))
        .sum()
}

/// Days for `person` inside the 12-month window ending on `as_of`.
pub fn rolling_window_total(
    records: &[TravelRecord],
    person: Person,
    as_of: NaiveDate,
    mode: CountingMode,
) -> i64 {
    let window = ABSENCE_POLICY_V1.rolling.window_ending(as_of);
    fixed_window_total(records, person, window, mode)
}

pub fn fixed_window_total(
    records: &[TravelRecord],
    person: Person,
    window: DateWindow,
    mode: CountingMode,
) -> i64 {
    sum_in_window(
        records.iter().filter(|record| record.person == person),
        window,
        mode,
    )
}

/// Sum of cached full-trip counts, no windowing.
pub fn lifetime_total(records: &[TravelRecord], person: Person, mode: CountingMode) -> i64 {
    records
        .iter()
        .filter(|record| record.person == person)
        .map(|record| record.days(mode))
        .sum()
}
