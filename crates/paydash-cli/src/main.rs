mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use paydash_client::ClientError;
use stdout_io::write_stdout_line;

const ROOT_HELP: &str = "Paydash - payment tracking dashboard

Usage:
  paydash <command>

Start here:
  paydash dash
  paydash transactions list
  paydash --help";

const TOP_LEVEL_HELP: &str = "Paydash: payment tracking dashboard

USAGE: paydash <command>

Dashboard:
  paydash dash                                            Stat cards, revenue series, status split, all payments
  paydash stats                                           Stat cards only
  paydash report [--limit N]                              Stats plus the twelve-month collection breakdown
  paydash charts                                          Revenue, weekly collections and status chart series

Payments and transactions:
  paydash payment add --user <name> --amount <n> --date <YYYY-MM-DD> --status <status>
  paydash transactions list [--status <tab>] [--search <term>]
  paydash transactions export [--output <path>]           CSV export (stdout by default)
  paydash transactions remove <id>

Users:
  paydash users list [--search <term>]
  paydash users add --name <name> --email <email>
  paydash users remove <id>                               Also removes their transactions

Session:
  paydash session login --email <email>
  paydash session show
  paydash session update [--name] [--email] [--phone] [--role] [--avatar]
  paydash session logout

Snapshots are JSON arrays read from PAYDASH_HOME (default ~/.paydash), or from
--transactions/--users. Add --json to any command for machine-readable output.
Run `paydash <command> --help` for command usage.";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_line(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return help_is_success(report_parse_error(&err, &raw_args)),
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

enum ParseOutcome {
    HelpShown,
    Failed(ExitCode),
}

fn help_is_success(outcome: ParseOutcome) -> Result<ExitCode, ExitCode> {
    match outcome {
        ParseOutcome::HelpShown => Ok(ExitCode::SUCCESS),
        ParseOutcome::Failed(code) => Err(code),
    }
}

fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ParseOutcome {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string().trim_end().to_string()
        };
        if write_stdout_line(&text).is_err() {
            return ParseOutcome::Failed(ExitCode::from(2));
        }
        return ParseOutcome::HelpShown;
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::ArgumentConflict
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = output::infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ParseOutcome::Failed(ExitCode::from(2));
    }
    ParseOutcome::Failed(ExitCode::from(1))
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block so "What to do next" is the only
/// guidance shown.
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

/// Maps the leading words of the argument list onto a known command path
/// for the `--help` hint.
fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let words = raw_args
        .iter()
        .skip(1)
        .take_while(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<&str>>();

    match words.as_slice() {
        ["transactions", "list", ..] => Some("transactions list"),
        ["transactions", "export", ..] => Some("transactions export"),
        ["transactions", "remove", ..] => Some("transactions remove"),
        ["transactions", ..] => Some("transactions"),
        ["payment", "add", ..] => Some("payment add"),
        ["payment", ..] => Some("payment"),
        ["users", "list", ..] => Some("users list"),
        ["users", "add", ..] => Some("users add"),
        ["users", "remove", ..] => Some("users remove"),
        ["users", ..] => Some("users"),
        ["session", "login", ..] => Some("session login"),
        ["session", "update", ..] => Some("session update"),
        ["session", ..] => Some("session"),
        ["dash", ..] => Some("dash"),
        ["stats", ..] => Some("stats"),
        ["report", ..] => Some("report"),
        ["charts", ..] => Some("charts"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "session_store_failed" | "snapshot_write_failed" | "home_unresolved"
        )
}
