//! Absence-day accounting.
//!
//! Pure functions over caller-owned record slices: no I/O, no shared state,
//! and every result is recomputed on each call.

pub mod aggregate;
pub mod date;
pub mod forecast;
pub mod partition;
pub mod policy;
pub mod risk;
pub mod stats;
pub mod types;
pub mod validate;
pub mod window;

#[cfg(test)]
pub(crate) mod testkit;

pub use aggregate::{fixed_window_total, lifetime_total, rolling_window_total};
pub use date::compute_days;
pub use forecast::{
    ForecastInput, compare_pace, forecast, planning_summary, project_daily_sampled,
    project_fixed_period, project_monthly,
};
pub use partition::{TripPartition, TripStatus, partition_trips};
pub use policy::{ABSENCE_POLICY_V1, AbsencePolicy};
pub use risk::{RiskLevel, classify_risk};
pub use stats::{AbsenceStats, absence_stats};
pub use types::{CountingMode, Person, TravelRecord, TripCandidate};
pub use validate::validate_record;
pub use window::{DateWindow, days_in_window, records_overlap};
