use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::date::{calendar_span, compute_days, parse_calendar_date};
use crate::engine::validate::validate_record;
use crate::{ClientError, ClientResult};

/// The two people whose absences are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "self")]
    Myself,
    #[serde(rename = "spouse")]
    Spouse,
}

impl Person {
    pub const ALL: [Self; 2] = [Self::Myself, Self::Spouse];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Myself => "self",
            Self::Spouse => "spouse",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "self" => Some(Self::Myself),
            "spouse" => Some(Self::Spouse),
            _ => None,
        }
    }
}

/// Day-counting convention for a trip's boundary days.
///
/// `Official` excludes both the departure and the return day. `Conservative`
/// counts one boundary day as spent abroad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    Official,
    Conservative,
}

impl CountingMode {
    pub const ALL: [Self; 2] = [Self::Official, Self::Conservative];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Conservative => "conservative",
        }
    }
}

/// One departure/return pair. Immutable once admitted; both day counts are
/// cached at admission and only recomputed when clipping to a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRecord {
    pub id: String,
    pub person: Person,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub days_official: i64,
    pub days_conservative: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

impl TravelRecord {
    /// Builds a record from a candidate that passed validation.
    pub fn admit(candidate: &TripCandidate, id: String, created_at: i64) -> ClientResult<Self> {
        let errors = validate_record(candidate);
        if !errors.is_empty() {
            return Err(ClientError::record_validation_failed(errors));
        }

        let person = candidate.person;
        let departure = candidate.departure_date.as_deref().and_then(parse_calendar_date);
        let return_date = candidate.return_date.as_deref().and_then(parse_calendar_date);
        let (Some(person), Some(departure_date), Some(return_date)) =
            (person, departure, return_date)
        else {
            return Err(ClientError::record_validation_failed(vec![
                "Trip is missing a person or a date.".to_string(),
            ]));
        };

        Ok(Self {
            id,
            person,
            departure_date,
            return_date,
            days_official: compute_days(departure_date, return_date, CountingMode::Official),
            days_conservative: compute_days(departure_date, return_date, CountingMode::Conservative),
            notes: candidate
                .notes
                .as_ref()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            created_at,
        })
    }

    /// Cached full-trip day count.
    pub fn days(&self, mode: CountingMode) -> i64 {
        match mode {
            CountingMode::Official => self.days_official,
            CountingMode::Conservative => self.days_conservative,
        }
    }

    pub fn calendar_span(&self) -> i64 {
        calendar_span(self.departure_date, self.return_date)
    }
}

/// Unvalidated trip input as a form would submit it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCandidate {
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TripCandidate {
    pub fn new(person: Person, departure_date: &str, return_date: &str) -> Self {
        Self {
            person: Some(person),
            departure_date: Some(departure_date.to_string()),
            return_date: Some(return_date.to_string()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}
