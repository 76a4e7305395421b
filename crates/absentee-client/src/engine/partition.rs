use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::types::{Person, TravelRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Completed,
    Ongoing,
    Planned,
}

impl TripStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Ongoing => "ongoing",
            Self::Planned => "planned",
        }
    }
}

/// Derived from dates on every call; never stored on the record.
pub fn trip_status(record: &TravelRecord, today: NaiveDate) -> TripStatus {
    if record.return_date <= today {
        TripStatus::Completed
    } else if record.departure_date > today {
        TripStatus::Planned
    } else {
        TripStatus::Ongoing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripPartition {
    pub completed: Vec<TravelRecord>,
    pub ongoing: Vec<TravelRecord>,
    pub planned: Vec<TravelRecord>,
}

impl TripPartition {
    /// Trips that still hold future absence days: ongoing first, then planned.
    pub fn upcoming(&self) -> Vec<TravelRecord> {
        self.ongoing
            .iter()
            .chain(self.planned.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.completed.len() + self.ongoing.len() + self.planned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition_trips(records: &[TravelRecord], person: Person, today: NaiveDate) -> TripPartition {
    let mut partition = TripPartition::default();
    for record in records.iter().filter(|record| record.person == person) {
        match trip_status(record, today) {
            TripStatus::Completed => partition.completed.push(record.clone()),
            TripStatus::Ongoing => partition.ongoing.push(record.clone()),
            TripStatus::Planned => partition.planned.push(record.clone()),
        }
    }
    partition
}
