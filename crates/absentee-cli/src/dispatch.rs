use absentee_client::commands;
use absentee_client::commands::check::CheckRunOptions;
use absentee_client::commands::common::ScopeOptions;
use absentee_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, IsoDate, ScopeArgs};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Stats { scope } => commands::stats::run_with_options(scope_options(scope)),
        Commands::Forecast { scope } => commands::forecast::run_with_options(scope_options(scope)),
        Commands::Trips { scope } => commands::trips::run_with_options(scope_options(scope)),
        Commands::Check {
            departure,
            return_date,
            notes,
            scope,
        } => commands::check::run_with_options(CheckRunOptions {
            scope: scope_options(scope),
            departure_date: departure.as_str().to_string(),
            return_date: return_date.as_str().to_string(),
            notes: notes.clone(),
        }),
        Commands::Days {
            departure,
            return_date,
            ..
        } => commands::days::run(departure.as_str(), return_date.as_str()),
    }
}

fn scope_options(args: &ScopeArgs) -> ScopeOptions<'_> {
    ScopeOptions {
        person: args.person.clone(),
        today: iso_string(args.today.as_ref()),
        period_start: iso_string(args.period_start.as_ref()),
        period_end: iso_string(args.period_end.as_ref()),
        records_override: args.records.as_deref(),
    }
}

fn iso_string(value: Option<&IsoDate>) -> Option<String> {
    value.map(|date| date.as_str().to_string())
}
