use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DaysData;
use crate::engine::date::{calendar_span, compute_days, format_iso_date, parse_iso_date_strict};
use crate::engine::types::CountingMode;
use crate::engine::validate::RETURN_BEFORE_DEPARTURE;
use crate::{ClientError, ClientResult};

/// Day-count preview for a date pair. Reads no records.
pub fn run(departure_date: &str, return_date: &str) -> ClientResult<SuccessEnvelope> {
    let departure = parse_iso_date_strict(departure_date, "departure_date", "days")?;
    let returned = parse_iso_date_strict(return_date, "return_date", "days")?;
    if returned < departure {
        return Err(ClientError::invalid_argument_for_command(
            RETURN_BEFORE_DEPARTURE,
            Some("days"),
        ));
    }

    let data = DaysData {
        departure_date: format_iso_date(&departure),
        return_date: format_iso_date(&returned),
        days_official: compute_days(departure, returned, CountingMode::Official),
        days_conservative: compute_days(departure, returned, CountingMode::Conservative),
        calendar_span: calendar_span(departure, returned),
    };

    success("days", data)
}
