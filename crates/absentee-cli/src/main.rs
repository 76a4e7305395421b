mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use absentee_client::ClientError;
use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Absentee - absence-day tracking for settlement applications

Usage:
  absentee <command>

Start here:
  absentee stats
  absentee forecast
  absentee --help
";

const TOP_LEVEL_HELP: &str = "Absentee - absence-day tracking for settlement applications

USAGE: absentee <command> [--person self|spouse] [--today YYYY-MM-DD] [--json]

Where do I stand?
  absentee stats                                  Rolling 12-month, fixed-period and lifetime totals
  absentee trips                                  Recorded trips, newest first

Planning ahead:
  absentee forecast                               Rolling usage at each of the next 12 month ends
  absentee check <departure> <return>             Impact of a hypothetical trip
  absentee days <departure> <return>              Official and conservative day counts

Limits:
  180 days in any rolling 12-month window.
  450 days inside the fixed five-year window (default 2025-10-15 to 2030-10-15).

Trips are read from `--records <path>`, `$ABSENTEE_HOME/records.json`,
or `~/.absentee/records.json`. Run `absentee <command> --help` for details.
";

fn main() -> ExitCode {
    logging::init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&text).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error = ClientError::invalid_argument_for_command(
                &clean_message,
                command_from_args(raw_args),
            );
            let mode = infer_requested_output_mode(raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(ExitCode::from(1))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage line and "For more information" hint so the
/// recovery steps are the only guidance shown.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    let first = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;
    match first.as_str() {
        "stats" => Some("stats"),
        "forecast" => Some("forecast"),
        "trips" => Some("trips"),
        "check" => Some("check"),
        "days" => Some("days"),
        _ => None,
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
