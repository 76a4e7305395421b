use chrono::NaiveDate;

use crate::engine::date::{compute_days, parse_calendar_date};
use crate::engine::types::{CountingMode, Person, TravelRecord};
use crate::engine::window::DateWindow;

pub(crate) fn date(value: &str) -> NaiveDate {
    parse_calendar_date(value).unwrap_or(NaiveDate::MIN)
}

pub(crate) fn window(start: &str, end: &str) -> DateWindow {
    DateWindow::new(date(start), date(end))
}

pub(crate) fn trip_for(person: Person, departure: &str, return_date: &str) -> TravelRecord {
    let departure_date = date(departure);
    let return_date = date(return_date);
    TravelRecord {
        id: format!("trip_{departure}_{}", person.as_str()),
        person,
        departure_date,
        return_date,
        days_official: compute_days(departure_date, return_date, CountingMode::Official),
        days_conservative: compute_days(departure_date, return_date, CountingMode::Conservative),
        notes: None,
        created_at: 0,
    }
}

pub(crate) fn trip(departure: &str, return_date: &str) -> TravelRecord {
    trip_for(Person::Myself, departure, return_date)
}
