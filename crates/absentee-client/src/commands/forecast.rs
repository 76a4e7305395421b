use crate::ClientResult;
use crate::commands::common::{ScopeOptions, projection_data, resolve_scope};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ForecastData;
use crate::engine::date::format_iso_date;
use crate::engine::forecast::{ForecastInput, forecast};
use crate::engine::partition::partition_trips;
use crate::engine::policy::ABSENCE_POLICY_VERSION;

pub fn run(person: Option<&str>, today: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ScopeOptions {
        person: person.map(std::string::ToString::to_string),
        today: today.map(std::string::ToString::to_string),
        ..ScopeOptions::default()
    })
}

/// Ongoing trips are projected together with planned ones.
#[doc(hidden)]
pub fn run_with_options(options: ScopeOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let scope = resolve_scope(&options, "forecast")?;
    let partition = partition_trips(&scope.records, scope.person, scope.today);
    let upcoming = partition.upcoming();
    let input = ForecastInput::new(&partition.completed, &upcoming, scope.today);
    let projection = forecast(input, &scope.policy);

    let data = ForecastData {
        policy_version: ABSENCE_POLICY_VERSION.to_string(),
        records_path: scope.records_path_display(),
        person: scope.person.as_str().to_string(),
        as_of: format_iso_date(&scope.today),
        completed_trip_count: partition.completed.len(),
        upcoming_trip_count: upcoming.len(),
        projection: projection_data(&projection),
    };

    success("forecast", data)
}
