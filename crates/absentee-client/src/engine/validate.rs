use crate::engine::date::parse_calendar_date;
use crate::engine::types::TripCandidate;

pub const MISSING_PERSON: &str = "Select who travelled.";
pub const MISSING_DEPARTURE: &str = "Select a departure date.";
pub const MISSING_RETURN: &str = "Select a return date.";
pub const INVALID_DEPARTURE: &str = "Departure date must use YYYY-MM-DD with a real calendar date.";
pub const INVALID_RETURN: &str = "Return date must use YYYY-MM-DD with a real calendar date.";
pub const RETURN_BEFORE_DEPARTURE: &str = "Return date cannot be earlier than departure date.";

/// Admission check for a new trip. An empty list means the candidate is valid.
pub fn validate_record(candidate: &TripCandidate) -> Vec<String> {
    let mut errors = Vec::new();

    if candidate.person.is_none() {
        errors.push(MISSING_PERSON.to_string());
    }

    let departure = required_date(
        candidate.departure_date.as_deref(),
        MISSING_DEPARTURE,
        INVALID_DEPARTURE,
        &mut errors,
    );
    let return_date = required_date(
        candidate.return_date.as_deref(),
        MISSING_RETURN,
        INVALID_RETURN,
        &mut errors,
    );

    if let (Some(departure), Some(return_date)) = (departure, return_date)
        && return_date < departure
    {
        errors.push(RETURN_BEFORE_DEPARTURE.to_string());
    }

    errors
}

fn required_date(
    value: Option<&str>,
    missing_message: &str,
    invalid_message: &str,
    errors: &mut Vec<String>,
) -> Option<chrono::NaiveDate> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        errors.push(missing_message.to_string());
        return None;
    };
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        errors.push(invalid_message.to_string());
    }
    parsed
}
