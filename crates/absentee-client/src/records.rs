//! Travel records document loading and the caller-owned record set.
//!
//! The document is read once per command. Edits made through [`RecordSet`]
//! live only in memory and are never written back.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use ulid::Ulid;

use crate::contracts::types::RecordIssue;
use crate::engine::date::{compute_days, parse_calendar_date};
use crate::engine::types::{CountingMode, Person, TravelRecord, TripCandidate};
use crate::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct RecordsDocument {
    records: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: Option<String>,
    person: Option<String>,
    departure_date: Option<String>,
    return_date: Option<String>,
    days_official: Option<i64>,
    days_conservative: Option<i64>,
    notes: Option<String>,
    created_at: Option<i64>,
}

pub fn load_records(path: &Path) -> ClientResult<Vec<TravelRecord>> {
    if !path.exists() {
        return Err(ClientError::records_not_found(path));
    }
    let body = fs::read_to_string(path)
        .map_err(|error| ClientError::records_unreadable(path, &error.to_string()))?;
    let records = parse_records_document(&body, path)?;
    info!(path = %path.display(), count = records.len(), "loaded travel records");
    Ok(records)
}

/// Parses a `{ "records": [...] }` document. Unknown fields are ignored;
/// missing day counts are derived from the dates.
pub fn parse_records_document(body: &str, source: &Path) -> ClientResult<Vec<TravelRecord>> {
    let document = serde_json::from_str::<RecordsDocument>(body)
        .map_err(|error| ClientError::records_malformed(source, &error.to_string()))?;

    let mut records = Vec::with_capacity(document.records.len());
    let mut issues = Vec::new();
    for (index, entry) in document.records.into_iter().enumerate() {
        match serde_json::from_value::<StoredRecord>(entry) {
            Ok(stored) => {
                if let Some(record) = normalize_stored(index, stored, &mut issues) {
                    records.push(record);
                }
            }
            Err(error) => issues.push(RecordIssue::new(index, "record", &error.to_string())),
        }
    }

    if !issues.is_empty() {
        debug!(issue_count = issues.len(), "records document rejected");
        return Err(ClientError::records_invalid(source, issues));
    }
    Ok(records)
}

fn normalize_stored(
    index: usize,
    stored: StoredRecord,
    issues: &mut Vec<RecordIssue>,
) -> Option<TravelRecord> {
    let start_len = issues.len();

    let id = stored
        .id
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if id.is_none() {
        issues.push(RecordIssue::new(index, "id", "id must be present and non-empty."));
    }

    let person = match stored.person.as_deref() {
        Some(value) => {
            let parsed = Person::parse(value);
            if parsed.is_none() {
                issues.push(RecordIssue::new(
                    index,
                    "person",
                    "person must be `self` or `spouse`.",
                ));
            }
            parsed
        }
        None => {
            issues.push(RecordIssue::new(index, "person", "person must be present."));
            None
        }
    };

    let departure_date = required_date(index, "departureDate", stored.departure_date, issues);
    let return_date = required_date(index, "returnDate", stored.return_date, issues);
    if let (Some(departure), Some(returned)) = (departure_date, return_date)
        && returned < departure
    {
        issues.push(RecordIssue::new(
            index,
            "returnDate",
            "returnDate cannot be earlier than departureDate.",
        ));
    }

    if issues.len() > start_len {
        return None;
    }
    let (Some(id), Some(person), Some(departure_date), Some(return_date)) =
        (id, person, departure_date, return_date)
    else {
        return None;
    };

    Some(TravelRecord {
        id,
        person,
        departure_date,
        return_date,
        days_official: cached_or_computed(
            stored.days_official,
            departure_date,
            return_date,
            CountingMode::Official,
        ),
        days_conservative: cached_or_computed(
            stored.days_conservative,
            departure_date,
            return_date,
            CountingMode::Conservative,
        ),
        notes: stored
            .notes
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        created_at: stored.created_at.unwrap_or(0),
    })
}

fn required_date(
    index: usize,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<chrono::NaiveDate> {
    let Some(raw) = value else {
        issues.push(RecordIssue::new(index, field, &format!("{field} must be present.")));
        return None;
    };
    let parsed = parse_calendar_date(&raw);
    if parsed.is_none() {
        issues.push(RecordIssue::new(
            index,
            field,
            &format!("{field} must use YYYY-MM-DD format with a real calendar date."),
        ));
    }
    parsed
}

fn cached_or_computed(
    cached: Option<i64>,
    departure: chrono::NaiveDate,
    return_date: chrono::NaiveDate,
    mode: CountingMode,
) -> i64 {
    cached
        .filter(|value| *value >= 0)
        .unwrap_or_else(|| compute_days(departure, return_date, mode))
}

pub fn new_record_id() -> String {
    format!("trip_{}", Ulid::new())
}

pub fn now_epoch_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
        Err(_) => 0,
    }
}

/// Caller-owned collection of trips. Engine functions borrow its slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<TravelRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<TravelRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TravelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn for_person(&self, person: Person) -> Vec<&TravelRecord> {
        self.records
            .iter()
            .filter(|record| record.person == person)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&TravelRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Appends an already-admitted record.
    pub fn add(&mut self, record: TravelRecord) {
        self.records.push(record);
    }

    /// Validates `candidate` and appends it with a fresh id.
    pub fn admit(&mut self, candidate: &TripCandidate) -> ClientResult<&TravelRecord> {
        let record = TravelRecord::admit(candidate, new_record_id(), now_epoch_millis())?;
        debug!(id = %record.id, person = record.person.as_str(), "admitted trip");
        self.records.push(record);
        self.records
            .last()
            .ok_or_else(|| ClientError::internal_serialization("admitted trip vanished"))
    }

    pub fn remove(&mut self, id: &str) -> ClientResult<TravelRecord> {
        let Some(position) = self.records.iter().position(|record| record.id == id) else {
            return Err(ClientError::record_not_found(id));
        };
        Ok(self.records.remove(position))
    }

    /// Re-validates and recomputes both day counts from the new dates. The
    /// id and creation time are kept.
    pub fn replace(&mut self, id: &str, candidate: &TripCandidate) -> ClientResult<&TravelRecord> {
        let Some(position) = self.records.iter().position(|record| record.id == id) else {
            return Err(ClientError::record_not_found(id));
        };
        let created_at = self.records[position].created_at;
        let updated = TravelRecord::admit(candidate, id.to_string(), created_at)?;
        self.records[position] = updated;
        Ok(&self.records[position])
    }
}
