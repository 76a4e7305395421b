use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::aggregate::{fixed_window_total, lifetime_total};
use crate::engine::policy::AbsencePolicy;
use crate::engine::risk::{RiskLevel, display_percentage};
use crate::engine::types::{CountingMode, Person, TravelRecord};
use crate::engine::window::DateWindow;

/// Usage under one counting mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeStats {
    pub mode: CountingMode,
    pub total_days: i64,
    pub rolling_days: i64,
    pub rolling_remaining: i64,
    pub rolling_percentage: u32,
    pub exceeds_rolling_limit: bool,
    pub fixed_period_days: i64,
    pub fixed_period_remaining: i64,
    pub fixed_period_percentage: u32,
    pub exceeds_fixed_period_limit: bool,
    /// Larger of the rolling and lifetime totals against the larger cap.
    pub risk_level: RiskLevel,
    /// Worse of the rolling band (vs its cap) and the fixed-period band.
    pub rule_risk_level: RiskLevel,
}

/// Per-person summary, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceStats {
    pub person: Person,
    pub as_of: NaiveDate,
    pub trip_count: usize,
    pub earliest_date: Option<NaiveDate>,
    pub latest_departure_date: Option<NaiveDate>,
    pub latest_return_date: Option<NaiveDate>,
    pub rolling_window: DateWindow,
    pub fixed_window: DateWindow,
    pub official: ModeStats,
    pub conservative: ModeStats,
}

impl AbsenceStats {
    pub fn for_mode(&self, mode: CountingMode) -> &ModeStats {
        match mode {
            CountingMode::Official => &self.official,
            CountingMode::Conservative => &self.conservative,
        }
    }
}

pub fn absence_stats(
    records: &[TravelRecord],
    person: Person,
    today: NaiveDate,
    policy: &AbsencePolicy,
) -> AbsenceStats {
    let mut own_trips = records
        .iter()
        .filter(|record| record.person == person)
        .collect::<Vec<&TravelRecord>>();
    own_trips.sort_by_key(|record| (record.departure_date, record.return_date));

    let rolling_window = policy.rolling.window_ending(today);
    let fixed_window = policy.fixed_period.window;
    let latest = own_trips.last();

    AbsenceStats {
        person,
        as_of: today,
        trip_count: own_trips.len(),
        earliest_date: own_trips.first().map(|record| record.departure_date),
        latest_departure_date: latest.map(|record| record.departure_date),
        latest_return_date: latest.map(|record| record.return_date),
        rolling_window,
        fixed_window,
        official: mode_stats(records, person, rolling_window, policy, CountingMode::Official),
        conservative: mode_stats(
            records,
            person,
            rolling_window,
            policy,
            CountingMode::Conservative,
        ),
    }
}

fn mode_stats(
    records: &[TravelRecord],
    person: Person,
    rolling_window: DateWindow,
    policy: &AbsencePolicy,
    mode: CountingMode,
) -> ModeStats {
    let rolling_max = policy.rolling.max_days;
    let fixed_max = policy.fixed_period.max_days;

    let total_days = lifetime_total(records, person, mode);
    let rolling_days = fixed_window_total(records, person, rolling_window, mode);
    let fixed_period_days = fixed_window_total(records, person, policy.fixed_period.window, mode);
    let risk_level = policy
        .thresholds
        .classify(rolling_days.max(total_days), rolling_max.max(fixed_max));
    let rule_risk_level = policy
        .thresholds
        .classify(rolling_days, rolling_max)
        .max(policy.thresholds.classify(fixed_period_days, fixed_max));

    ModeStats {
        mode,
        total_days,
        rolling_days,
        rolling_remaining: (rolling_max - rolling_days).max(0),
        rolling_percentage: display_percentage(rolling_days, rolling_max),
        exceeds_rolling_limit: rolling_days > rolling_max,
        fixed_period_days,
        fixed_period_remaining: (fixed_max - fixed_period_days).max(0),
        fixed_period_percentage: display_percentage(fixed_period_days, fixed_max),
        exceeds_fixed_period_limit: fixed_period_days > fixed_max,
        risk_level,
        rule_risk_level,
    }
}
