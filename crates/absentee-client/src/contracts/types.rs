use serde::Serialize;

/// One problem found while loading the records document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub index: usize,
    pub field: String,
    pub message: String,
}

impl RecordIssue {
    pub fn new(index: usize, field: &str, message: &str) -> Self {
        Self {
            index,
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBadge {
    pub level: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    pub policy_version: String,
    pub records_path: String,
    pub person: String,
    pub as_of: String,
    pub trip_count: usize,
    pub earliest_date: Option<String>,
    pub latest_departure_date: Option<String>,
    pub latest_return_date: Option<String>,
    pub rolling_window: WindowRange,
    pub rolling_max_days: i64,
    pub fixed_window: WindowRange,
    pub fixed_period_max_days: i64,
    pub modes: Vec<ModeStatsRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModeStatsRow {
    pub mode: String,
    pub total_days: i64,
    pub rolling_days: i64,
    pub rolling_remaining: i64,
    pub rolling_percentage: u32,
    pub exceeds_rolling_limit: bool,
    pub fixed_period_days: i64,
    pub fixed_period_remaining: i64,
    pub fixed_period_percentage: u32,
    pub exceeds_fixed_period_limit: bool,
    pub risk: RiskBadge,
    pub rule_risk: RiskBadge,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripsData {
    pub records_path: String,
    pub person: String,
    pub as_of: String,
    pub trip_count: usize,
    pub history: Vec<TripRow>,
    pub planned: Vec<TripRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripRow {
    pub id: String,
    pub departure_date: String,
    pub return_date: String,
    pub days_official: i64,
    pub days_conservative: i64,
    pub calendar_span: i64,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastData {
    pub policy_version: String,
    pub records_path: String,
    pub person: String,
    pub as_of: String,
    pub completed_trip_count: usize,
    pub upcoming_trip_count: usize,
    pub projection: ProjectionData,
}

/// Everything projected from one set of completed and upcoming trips.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionData {
    pub summary: PlanningSummaryRow,
    pub monthly: Vec<MonthlyRow>,
    pub daily: Vec<DailyRow>,
    pub fixed_period: FixedPeriodRow,
    pub pace: PaceRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanningSummaryRow {
    pub current_used: i64,
    pub current_remaining: i64,
    pub current_percentage: u32,
    pub current_risk: RiskBadge,
    pub planned_trip_count: usize,
    pub planned_days: i64,
    pub after_plan_remaining: i64,
    pub after_plan_percentage: u32,
    pub after_plan_risk: RiskBadge,
    pub over_limit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub month_end: String,
    pub used: i64,
    pub remaining: i64,
    pub percentage: u32,
    pub risk: RiskBadge,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyRow {
    pub date: String,
    pub used: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedPeriodRow {
    pub window: WindowRange,
    pub max_days: i64,
    pub used: i64,
    pub remaining: i64,
    pub percentage: u32,
    pub risk: RiskBadge,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaceRow {
    pub effective_date: String,
    pub includes_planned: bool,
    pub elapsed_days: i64,
    pub period_days: i64,
    pub time_percent: f64,
    pub usage_percent: f64,
    pub gap_percent: f64,
    pub verdict: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckData {
    pub policy_version: String,
    pub records_path: String,
    pub person: String,
    pub as_of: String,
    pub candidate: CandidateRow,
    pub without_trip: ProjectionData,
    pub with_trip: ProjectionData,
    pub impact: CheckImpact,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub departure_date: String,
    pub return_date: String,
    pub days_official: i64,
    pub days_conservative: i64,
    pub calendar_span: i64,
    pub status: String,
    pub notes: Option<String>,
}

/// Headline deltas between the two projections.
#[derive(Debug, Clone, Serialize)]
pub struct CheckImpact {
    pub peak_rolling_used_without: i64,
    pub peak_rolling_used_with: i64,
    pub peak_month_with: Option<String>,
    pub peak_risk_with: RiskBadge,
    pub fixed_period_used_without: i64,
    pub fixed_period_used_with: i64,
    pub after_plan_remaining_with: i64,
    pub over_limit_with: bool,
    pub pace_verdict_with: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaysData {
    pub departure_date: String,
    pub return_date: String,
    pub days_official: i64,
    pub days_conservative: i64,
    pub calendar_span: i64,
}
