use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::{ScopeOptions, resolve_scope};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TripRow, TripsData};
use crate::engine::date::format_iso_date;
use crate::engine::partition::trip_status;
use crate::engine::types::TravelRecord;

pub fn run(person: Option<&str>, today: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ScopeOptions {
        person: person.map(std::string::ToString::to_string),
        today: today.map(std::string::ToString::to_string),
        ..ScopeOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ScopeOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let scope = resolve_scope(&options, "trips")?;
    let mut own_trips = scope
        .records
        .iter()
        .filter(|record| record.person == scope.person)
        .collect::<Vec<&TravelRecord>>();
    own_trips.sort_by_key(|record| Reverse((record.return_date, record.departure_date)));

    // History holds anything that has departed, including ongoing trips.
    let (history, planned): (Vec<&TravelRecord>, Vec<&TravelRecord>) = own_trips
        .into_iter()
        .partition(|record| record.departure_date <= scope.today);

    let data = TripsData {
        records_path: scope.records_path_display(),
        person: scope.person.as_str().to_string(),
        as_of: format_iso_date(&scope.today),
        trip_count: history.len() + planned.len(),
        history: history
            .into_iter()
            .map(|record| trip_row(record, scope.today))
            .collect(),
        planned: planned
            .into_iter()
            .map(|record| trip_row(record, scope.today))
            .collect(),
    };

    success("trips", data)
}

fn trip_row(record: &TravelRecord, today: NaiveDate) -> TripRow {
    TripRow {
        id: record.id.clone(),
        departure_date: format_iso_date(&record.departure_date),
        return_date: format_iso_date(&record.return_date),
        days_official: record.days_official,
        days_conservative: record.days_conservative,
        calendar_span: record.calendar_span(),
        status: trip_status(record, today).as_str().to_string(),
        notes: record.notes.clone(),
    }
}
