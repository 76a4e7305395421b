use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_person(value: &str) -> Result<String, String> {
    match value {
        "self" | "spouse" => Ok(value.to_string()),
        _ => Err("person must be one of: self, spouse".to_string()),
    }
}

/// Extended help shown after `absentee stats --help`.
pub const RECORDS_AFTER_HELP: &str = "\
Where trips are read from:
  1. `--records <path>` when given.
  2. `$ABSENTEE_HOME/records.json` when ABSENTEE_HOME is set.
  3. `~/.absentee/records.json` otherwise.

Records document:
  {
    \"records\": [
      {
        \"id\": \"trip_01J...\",
        \"person\": \"self\",
        \"departureDate\": \"2025-03-01\",
        \"returnDate\": \"2025-03-15\",
        \"notes\": \"optional\"
      }
    ]
  }

  daysOfficial and daysConservative are optional; they are derived from the
  dates when missing.

How days are counted:
  official      days strictly between departure and return
  conservative  official days plus one boundary day
";

#[derive(Debug, Parser)]
#[command(
    name = "absentee",
    version,
    about = "absence-day tracking for settlement applications",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that reads the records document.
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// Whose trips to evaluate: self or spouse
    #[arg(long, value_parser = parse_person)]
    pub person: Option<String>,
    /// Evaluation date (YYYY-MM-DD), defaults to the local date
    #[arg(long, value_parser = parse_iso_date)]
    pub today: Option<IsoDate>,
    /// Path to the records document
    #[arg(long)]
    pub records: Option<PathBuf>,
    /// Start of the fixed five-year window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub period_start: Option<IsoDate>,
    /// End of the fixed five-year window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub period_end: Option<IsoDate>,
    /// Emit structured JSON object output for machine parsing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show rolling, fixed-period and lifetime absence totals
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Stats {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Project rolling usage over the next twelve months
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Forecast {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// List trips, newest first, split into history and planned
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Trips {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Show how a hypothetical trip would change the forecast
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Check {
        /// Departure date of the hypothetical trip (YYYY-MM-DD)
        #[arg(value_parser = parse_iso_date)]
        departure: IsoDate,
        /// Return date of the hypothetical trip (YYYY-MM-DD)
        #[arg(value_parser = parse_iso_date)]
        return_date: IsoDate,
        /// Free-text note attached to the hypothetical trip
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Preview official and conservative day counts for a date pair
    Days {
        /// Departure date (YYYY-MM-DD)
        #[arg(value_parser = parse_iso_date)]
        departure: IsoDate,
        /// Return date (YYYY-MM-DD)
        #[arg(value_parser = parse_iso_date)]
        return_date: IsoDate,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn json_requested(&self) -> bool {
        match self {
            Self::Stats { scope }
            | Self::Forecast { scope }
            | Self::Trips { scope }
            | Self::Check { scope, .. } => scope.json,
            Self::Days { json, .. } => *json,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
