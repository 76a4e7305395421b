use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::contracts::types::{
    DailyRow, FixedPeriodRow, MonthlyRow, PaceRow, PlanningSummaryRow, ProjectionData, RiskBadge,
    WindowRange,
};
use crate::engine::date::{format_iso_date, parse_iso_date_strict};
use crate::engine::forecast::Forecast;
use crate::engine::policy::{ABSENCE_POLICY_V1, AbsencePolicy};
use crate::engine::risk::RiskLevel;
use crate::engine::types::{Person, TravelRecord};
use crate::engine::window::DateWindow;
use crate::records::load_records;
use crate::state::resolve_records_path;
use crate::{ClientError, ClientResult};

/// Inputs every record-reading command accepts. Dates are raw
/// `YYYY-MM-DD` strings and are checked here.
#[derive(Debug, Default, Clone)]
pub struct ScopeOptions<'a> {
    pub person: Option<String>,
    pub today: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub records_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub person: Person,
    pub today: NaiveDate,
    pub policy: AbsencePolicy,
    pub records_path: PathBuf,
    pub records: Vec<TravelRecord>,
}

impl Scope {
    pub fn records_path_display(&self) -> String {
        self.records_path.display().to_string()
    }
}

pub(crate) fn resolve_scope(options: &ScopeOptions<'_>, command: &str) -> ClientResult<Scope> {
    let person = resolve_person(options.person.as_deref(), command)?;
    let today = resolve_today(options.today.as_deref(), command)?;
    let policy = resolve_policy(
        options.period_start.as_deref(),
        options.period_end.as_deref(),
        command,
    )?;
    let records_path = resolve_records_path(options.records_override)?;
    let records = load_records(&records_path)?;

    info!(
        command,
        person = person.as_str(),
        as_of = %today,
        records = records.len(),
        "running absence command"
    );

    Ok(Scope {
        person,
        today,
        policy,
        records_path,
        records,
    })
}

pub(crate) fn resolve_person(value: Option<&str>, command: &str) -> ClientResult<Person> {
    match value {
        None => Ok(Person::Myself),
        Some(raw) => Person::parse(raw).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                "`person` must be `self` or `spouse`.",
                Some(command),
            )
        }),
    }
}

pub(crate) fn resolve_today(value: Option<&str>, command: &str) -> ClientResult<NaiveDate> {
    match value {
        Some(raw) => parse_iso_date_strict(raw, "today", command),
        None => Ok(Local::now().date_naive()),
    }
}

/// Default rules with the fixed window optionally moved. A missing bound
/// keeps the default for that side.
pub(crate) fn resolve_policy(
    period_start: Option<&str>,
    period_end: Option<&str>,
    command: &str,
) -> ClientResult<AbsencePolicy> {
    let default_window = ABSENCE_POLICY_V1.fixed_period.window;
    let start = match period_start {
        Some(raw) => parse_iso_date_strict(raw, "period_start", command)?,
        None => default_window.start,
    };
    let end = match period_end {
        Some(raw) => parse_iso_date_strict(raw, "period_end", command)?,
        None => default_window.end,
    };
    if end < start {
        return Err(ClientError::invalid_argument_with_recovery(
            "`period_end` cannot be earlier than `period_start`.",
            vec![
                format!(
                    "Pass a window that ends on or after {}.",
                    format_iso_date(&start)
                ),
                format!("Run `absentee {command} --help` for usage."),
            ],
        ));
    }
    Ok(ABSENCE_POLICY_V1.with_fixed_window(DateWindow::new(start, end)))
}

pub(crate) fn window_range(window: DateWindow) -> WindowRange {
    WindowRange {
        start: format_iso_date(&window.start),
        end: format_iso_date(&window.end),
    }
}

pub(crate) fn risk_badge(level: RiskLevel) -> RiskBadge {
    RiskBadge {
        level: level.as_str().to_string(),
        label: level.label().to_string(),
    }
}

pub(crate) fn projection_data(forecast: &Forecast) -> ProjectionData {
    let summary = &forecast.summary;
    let fixed = &forecast.fixed_period;
    let pace = &forecast.pace;

    ProjectionData {
        summary: PlanningSummaryRow {
            current_used: summary.current_used,
            current_remaining: summary.current_remaining,
            current_percentage: summary.current_percentage,
            current_risk: risk_badge(summary.current_risk_level),
            planned_trip_count: summary.planned_trip_count,
            planned_days: summary.planned_days,
            after_plan_remaining: summary.after_plan_remaining,
            after_plan_percentage: summary.after_plan_percentage,
            after_plan_risk: risk_badge(summary.after_plan_risk_level),
            over_limit: summary.over_limit,
        },
        monthly: forecast
            .monthly
            .iter()
            .map(|month| MonthlyRow {
                month: month.label.clone(),
                month_end: format_iso_date(&month.month_end),
                used: month.used,
                remaining: month.remaining,
                percentage: month.percentage,
                risk: risk_badge(month.risk_level),
            })
            .collect(),
        daily: forecast
            .daily
            .iter()
            .map(|point| DailyRow {
                date: format_iso_date(&point.date),
                used: point.used,
                remaining: point.remaining,
            })
            .collect(),
        fixed_period: FixedPeriodRow {
            window: window_range(fixed.window),
            max_days: fixed.max_days,
            used: fixed.used,
            remaining: fixed.remaining,
            percentage: fixed.percentage,
            risk: risk_badge(fixed.risk_level),
        },
        pace: PaceRow {
            effective_date: format_iso_date(&pace.effective_date),
            includes_planned: pace.includes_planned,
            elapsed_days: pace.elapsed_days,
            period_days: pace.period_days,
            time_percent: round_tenth(pace.time_percent),
            usage_percent: round_tenth(pace.usage_percent),
            gap_percent: round_tenth(pace.gap_percent),
            verdict: pace.verdict.as_str().to_string(),
        },
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
