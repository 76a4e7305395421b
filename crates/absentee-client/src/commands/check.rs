use tracing::info;

use crate::ClientResult;
use crate::commands::common::{ScopeOptions, projection_data, resolve_scope, risk_badge};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CandidateRow, CheckData, CheckImpact};
use crate::engine::date::format_iso_date;
use crate::engine::forecast::{Forecast, ForecastInput, MonthlyProjection, forecast};
use crate::engine::partition::{partition_trips, trip_status};
use crate::engine::policy::{ABSENCE_POLICY_VERSION, AbsencePolicy};
use crate::engine::risk::RiskLevel;
use crate::engine::types::{Person, TravelRecord, TripCandidate};
use crate::records::RecordSet;

#[derive(Debug, Default)]
pub struct CheckRunOptions<'a> {
    pub scope: ScopeOptions<'a>,
    pub departure_date: String,
    pub return_date: String,
    pub notes: Option<String>,
}

pub fn run(
    person: Option<&str>,
    departure_date: &str,
    return_date: &str,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(CheckRunOptions {
        scope: ScopeOptions {
            person: person.map(std::string::ToString::to_string),
            ..ScopeOptions::default()
        },
        departure_date: departure_date.to_string(),
        return_date: return_date.to_string(),
        notes: None,
    })
}

/// Projects the person's trips with and without the candidate. The
/// candidate is admitted into an in-memory copy only.
#[doc(hidden)]
pub fn run_with_options(options: CheckRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let scope = resolve_scope(&options.scope, "check")?;
    let candidate = TripCandidate {
        person: Some(scope.person),
        departure_date: Some(options.departure_date.clone()),
        return_date: Some(options.return_date.clone()),
        notes: options.notes.clone(),
    };

    let baseline = RecordSet::new(scope.records.clone());
    let mut with_trip = baseline.clone();
    let admitted = with_trip.admit(&candidate)?.clone();
    info!(
        departure = %admitted.departure_date,
        return_date = %admitted.return_date,
        days = admitted.days_conservative,
        "checking hypothetical trip"
    );

    let without = project(baseline.records(), scope.person, scope.today, &scope.policy);
    let with = project(with_trip.records(), scope.person, scope.today, &scope.policy);

    let without_peak = peak_month(&without.monthly);
    let with_peak = peak_month(&with.monthly);

    let impact = CheckImpact {
        peak_rolling_used_without: without_peak.map_or(0, |month| month.used),
        peak_rolling_used_with: with_peak.map_or(0, |month| month.used),
        peak_month_with: with_peak.map(|month| month.label.clone()),
        peak_risk_with: risk_badge(with_peak.map_or(RiskLevel::Safe, |month| month.risk_level)),
        fixed_period_used_without: without.fixed_period.used,
        fixed_period_used_with: with.fixed_period.used,
        after_plan_remaining_with: with.summary.after_plan_remaining,
        over_limit_with: with.summary.over_limit,
        pace_verdict_with: with.pace.verdict.as_str().to_string(),
    };

    let data = CheckData {
        policy_version: ABSENCE_POLICY_VERSION.to_string(),
        records_path: scope.records_path_display(),
        person: scope.person.as_str().to_string(),
        as_of: format_iso_date(&scope.today),
        candidate: CandidateRow {
            departure_date: format_iso_date(&admitted.departure_date),
            return_date: format_iso_date(&admitted.return_date),
            days_official: admitted.days_official,
            days_conservative: admitted.days_conservative,
            calendar_span: admitted.calendar_span(),
            status: trip_status(&admitted, scope.today).as_str().to_string(),
            notes: admitted.notes.clone(),
        },
        without_trip: projection_data(&without),
        with_trip: projection_data(&with),
        impact,
    };

    success("check", data)
}

fn project(
    records: &[TravelRecord],
    person: Person,
    today: chrono::NaiveDate,
    policy: &AbsencePolicy,
) -> Forecast {
    let partition = partition_trips(records, person, today);
    let upcoming = partition.upcoming();
    forecast(
        ForecastInput::new(&partition.completed, &upcoming, today),
        policy,
    )
}

/// Earliest month with the highest rolling usage.
fn peak_month(months: &[MonthlyProjection]) -> Option<&MonthlyProjection> {
    months.iter().fold(None, |peak, month| match peak {
        Some(current) if current.used >= month.used => Some(current),
        _ => Some(month),
    })
}

#[cfg(test)]
mod tests {
    use super::peak_month;
    use crate::engine::forecast::MonthlyProjection;
    use crate::engine::risk::RiskLevel;
    use crate::engine::testkit::date;

    fn month(label: &str, used: i64) -> MonthlyProjection {
        MonthlyProjection {
            label: label.to_string(),
            month_end: date("2027-01-31"),
            used,
            remaining: 180 - used,
            percentage: 0,
            risk_level: RiskLevel::Safe,
        }
    }

    #[test]
    fn peak_prefers_the_earliest_maximum() {
        let months = vec![month("2026-11", 10), month("2026-12", 40), month("2027-01", 40)];
        assert_eq!(peak_month(&months).map(|peak| peak.label.as_str()), Some("2026-12"));
        assert!(peak_month(&[]).is_none());
    }
}
