//! Forward projection of absence usage over completed and planned trips.
//!
//! Every projection here uses the conservative count, so it never
//! under-reports what the official count would later show.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::aggregate::sum_in_window;
use crate::engine::date::{add_days, add_months_clamped, days_between, last_day_of_month};
use crate::engine::policy::AbsencePolicy;
use crate::engine::risk::{RiskLevel, display_percentage, usage_percent};
use crate::engine::types::{CountingMode, TravelRecord};
use crate::engine::window::DateWindow;

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;
pub const DEFAULT_HORIZON_DAYS: i64 = 365;
pub const DEFAULT_STEP_DAYS: i64 = 7;

const PROJECTION_MODE: CountingMode = CountingMode::Conservative;

/// One person's trips split around `today`. Callers decide which trips go in
/// `planned`; every projection reads the union of both slices.
#[derive(Debug, Clone, Copy)]
pub struct ForecastInput<'a> {
    pub completed: &'a [TravelRecord],
    /// Trips with absence days still ahead of `today`. The commands pass
    /// ongoing trips here too, not only those departing after `today`.
    pub planned: &'a [TravelRecord],
    pub today: NaiveDate,
}

impl<'a> ForecastInput<'a> {
    pub fn new(completed: &'a [TravelRecord], planned: &'a [TravelRecord], today: NaiveDate) -> Self {
        Self {
            completed,
            planned,
            today,
        }
    }

    fn trips(&self) -> impl Iterator<Item = &'a TravelRecord> + 'a {
        let completed = self.completed;
        let planned = self.planned;
        completed.iter().chain(planned.iter())
    }

    fn rolling_usage(&self, policy: &AbsencePolicy, as_of: NaiveDate) -> i64 {
        sum_in_window(self.trips(), policy.rolling.window_ending(as_of), PROJECTION_MODE)
    }

    fn latest_planned_return(&self) -> Option<NaiveDate> {
        self.planned.iter().map(|record| record.return_date).max()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProjection {
    /// `YYYY-MM` of the month being evaluated.
    pub label: String,
    pub month_end: NaiveDate,
    pub used: i64,
    pub remaining: i64,
    pub percentage: u32,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyProjection {
    pub date: NaiveDate,
    pub used: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedPeriodProjection {
    pub window: DateWindow,
    pub max_days: i64,
    /// Raw total, may exceed `max_days`.
    pub used: i64,
    pub remaining: i64,
    pub percentage: u32,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceVerdict {
    UsingTooFast,
    UsingReasonably,
}

impl PaceVerdict {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsingTooFast => "using_too_fast",
            Self::UsingReasonably => "using_reasonably",
        }
    }
}

/// Elapsed share of the fixed period against the share of its cap used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceComparison {
    pub effective_date: NaiveDate,
    pub includes_planned: bool,
    pub elapsed_days: i64,
    pub period_days: i64,
    pub time_percent: f64,
    pub usage_percent: f64,
    /// `usage_percent - time_percent`; positive means ahead of schedule.
    pub gap_percent: f64,
    pub verdict: PaceVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningSummary {
    pub current_used: i64,
    /// `max - used`, left unclamped so overruns stay visible.
    pub current_remaining: i64,
    pub current_percentage: u32,
    pub current_risk_level: RiskLevel,
    pub planned_trip_count: usize,
    pub planned_days: i64,
    pub after_plan_remaining: i64,
    pub after_plan_percentage: u32,
    pub after_plan_risk_level: RiskLevel,
    pub over_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub as_of: NaiveDate,
    pub summary: PlanningSummary,
    pub monthly: Vec<MonthlyProjection>,
    pub daily: Vec<DailyProjection>,
    pub fixed_period: FixedPeriodProjection,
    pub pace: PaceComparison,
}

/// Rolling usage at the last day of each of the next `horizon_months`
/// months, starting with the current one.
pub fn project_monthly(
    input: ForecastInput<'_>,
    horizon_months: u32,
    policy: &AbsencePolicy,
) -> Vec<MonthlyProjection> {
    let max_days = policy.rolling.max_days;
    (0..horizon_months)
        .map(|offset| {
            let shifted = add_months_clamped(input.today, i32::try_from(offset).unwrap_or(0));
            let month_end = last_day_of_month(shifted);
            let used = input.rolling_usage(policy, month_end);
            MonthlyProjection {
                label: month_end.format("%Y-%m").to_string(),
                month_end,
                used,
                remaining: (max_days - used).max(0),
                percentage: display_percentage(used, max_days),
                risk_level: policy.thresholds.classify(used, max_days),
            }
        })
        .collect()
}

/// Rolling usage sampled every `step_days` from today through
/// `horizon_days` inclusive.
pub fn project_daily_sampled(
    input: ForecastInput<'_>,
    horizon_days: i64,
    step_days: i64,
    policy: &AbsencePolicy,
) -> Vec<DailyProjection> {
    let step = step_days.max(1);
    let max_days = policy.rolling.max_days;
    let mut points = Vec::new();
    let mut offset = 0_i64;
    while offset <= horizon_days {
        let date = add_days(input.today, offset);
        let used = input.rolling_usage(policy, date);
        points.push(DailyProjection {
            date,
            used,
            remaining: (max_days - used).max(0),
        });
        offset += step;
    }
    points
}

pub fn project_fixed_period(
    input: ForecastInput<'_>,
    window: DateWindow,
    max_days: i64,
    policy: &AbsencePolicy,
) -> FixedPeriodProjection {
    let used = sum_in_window(input.trips(), window, PROJECTION_MODE);
    FixedPeriodProjection {
        window,
        max_days,
        used,
        remaining: (max_days - used).max(0),
        percentage: display_percentage(used, max_days),
        risk_level: policy.thresholds.classify(used, max_days),
    }
}

/// Time progress is measured up to today, or up to the last planned return
/// when that is later.
pub fn compare_pace(input: ForecastInput<'_>, fixed: &FixedPeriodProjection) -> PaceComparison {
    let latest_planned = input.latest_planned_return();
    let effective_date = match latest_planned {
        Some(date) if date > input.today => date,
        _ => input.today,
    };
    let period_days = fixed.window.length_days();
    let elapsed_days = days_between(fixed.window.start, effective_date);
    let time_percent = if period_days <= 0 {
        0.0
    } else {
        ((elapsed_days as f64 / period_days as f64) * 100.0).clamp(0.0, 100.0)
    };
    let usage = f64::from(fixed.percentage);
    let verdict = if usage > time_percent {
        PaceVerdict::UsingTooFast
    } else {
        PaceVerdict::UsingReasonably
    };

    PaceComparison {
        effective_date,
        includes_planned: effective_date > input.today,
        elapsed_days,
        period_days,
        time_percent,
        usage_percent: usage,
        gap_percent: usage - time_percent,
        verdict,
    }
}

pub fn planning_summary(input: ForecastInput<'_>, policy: &AbsencePolicy) -> PlanningSummary {
    let max_days = policy.rolling.max_days;
    let current_used = sum_in_window(
        input.completed.iter(),
        policy.rolling.window_ending(input.today),
        PROJECTION_MODE,
    );
    let planned_days = input
        .planned
        .iter()
        .map(|record| record.days(PROJECTION_MODE))
        .sum::<i64>();
    let current_remaining = max_days - current_used;
    let after_plan_remaining = current_remaining - planned_days;

    PlanningSummary {
        current_used,
        current_remaining,
        current_percentage: display_percentage(current_used, max_days),
        current_risk_level: policy.thresholds.classify(current_used, max_days),
        planned_trip_count: input.planned.len(),
        planned_days,
        after_plan_remaining,
        after_plan_percentage: display_percentage(current_used + planned_days, max_days),
        after_plan_risk_level: policy
            .thresholds
            .classify(current_used + planned_days, max_days),
        over_limit: after_plan_remaining < 0,
    }
}

/// Every projection with the default horizons.
pub fn forecast(input: ForecastInput<'_>, policy: &AbsencePolicy) -> Forecast {
    let fixed_period = project_fixed_period(
        input,
        policy.fixed_period.window,
        policy.fixed_period.max_days,
        policy,
    );
    let pace = compare_pace(input, &fixed_period);
    Forecast {
        as_of: input.today,
        summary: planning_summary(input, policy),
        monthly: project_monthly(input, DEFAULT_HORIZON_MONTHS, policy),
        daily: project_daily_sampled(input, DEFAULT_HORIZON_DAYS, DEFAULT_STEP_DAYS, policy),
        fixed_period,
        pace,
    }
}
