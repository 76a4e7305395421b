use crate::ClientResult;
use crate::commands::common::{ScopeOptions, resolve_scope, risk_badge, window_range};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ModeStatsRow, StatsData};
use crate::engine::date::format_iso_date;
use crate::engine::policy::ABSENCE_POLICY_VERSION;
use crate::engine::stats::{ModeStats, absence_stats};
use crate::engine::types::CountingMode;

pub fn run(person: Option<&str>, today: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ScopeOptions {
        person: person.map(std::string::ToString::to_string),
        today: today.map(std::string::ToString::to_string),
        ..ScopeOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ScopeOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let scope = resolve_scope(&options, "stats")?;
    let stats = absence_stats(&scope.records, scope.person, scope.today, &scope.policy);

    let data = StatsData {
        policy_version: ABSENCE_POLICY_VERSION.to_string(),
        records_path: scope.records_path_display(),
        person: scope.person.as_str().to_string(),
        as_of: format_iso_date(&scope.today),
        trip_count: stats.trip_count,
        earliest_date: stats.earliest_date.as_ref().map(format_iso_date),
        latest_departure_date: stats.latest_departure_date.as_ref().map(format_iso_date),
        latest_return_date: stats.latest_return_date.as_ref().map(format_iso_date),
        rolling_window: window_range(stats.rolling_window),
        rolling_max_days: scope.policy.rolling.max_days,
        fixed_window: window_range(stats.fixed_window),
        fixed_period_max_days: scope.policy.fixed_period.max_days,
        modes: CountingMode::ALL
            .into_iter()
            .map(|mode| mode_row(stats.for_mode(mode)))
            .collect(),
    };

    success("stats", data)
}

fn mode_row(stats: &ModeStats) -> ModeStatsRow {
    ModeStatsRow {
        mode: stats.mode.as_str().to_string(),
        total_days: stats.total_days,
        rolling_days: stats.rolling_days,
        rolling_remaining: stats.rolling_remaining,
        rolling_percentage: stats.rolling_percentage,
        exceeds_rolling_limit: stats.exceeds_rolling_limit,
        fixed_period_days: stats.fixed_period_days,
        fixed_period_remaining: stats.fixed_period_remaining,
        fixed_period_percentage: stats.fixed_period_percentage,
        exceeds_fixed_period_limit: stats.exceeds_fixed_period_limit,
        risk: risk_badge(stats.risk_level),
        rule_risk: risk_badge(stats.rule_risk_level),
    }
}
