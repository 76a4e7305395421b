use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::window::DateWindow;

/// Rule-set identifier emitted with command results so threshold or window
/// changes stay visible in diffs of saved output.
pub const ABSENCE_POLICY_VERSION: &str = "uk-absence/v1";

/// At most `max_days` absent in any window of `period_months` ending on the
/// evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingRule {
    pub max_days: i64,
    pub period_months: u32,
}

impl RollingRule {
    pub fn window_ending(self, end: NaiveDate) -> DateWindow {
        DateWindow::trailing_months(end, self.period_months)
    }
}

/// At most `max_days` absent inside one fixed qualifying period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedPeriodRule {
    pub max_days: i64,
    pub window: DateWindow,
}

/// Percent-of-cap boundaries for the risk bands. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    pub warning_percent: f64,
    pub danger_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbsencePolicy {
    pub rolling: RollingRule,
    pub fixed_period: FixedPeriodRule,
    pub thresholds: RiskThresholds,
}

impl AbsencePolicy {
    pub fn with_fixed_window(mut self, window: DateWindow) -> Self {
        self.fixed_period.window = window;
        self
    }
}

impl Default for AbsencePolicy {
    fn default() -> Self {
        ABSENCE_POLICY_V1
    }
}

pub const DEFAULT_FIXED_WINDOW: DateWindow =
    DateWindow::new(ymd(2025, 10, 15), ymd(2030, 10, 15));

pub const ABSENCE_POLICY_V1: AbsencePolicy = AbsencePolicy {
    rolling: RollingRule {
        max_days: 180,
        period_months: 12,
    },
    fixed_period: FixedPeriodRule {
        max_days: 450,
        window: DEFAULT_FIXED_WINDOW,
    },
    thresholds: RiskThresholds {
        warning_percent: 70.0,
        danger_percent: 90.0,
    },
};

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => NaiveDate::MIN,
    }
}
