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
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_status_tab(value: &str) -> Result<String, String> {
    match value {
        "All" | "Completed" | "Pending" | "Failed" => Ok(value.to_string()),
        _ => Err("status must be one of: All, Completed, Pending, Failed".to_string()),
    }
}

pub const SNAPSHOT_AFTER_HELP: &str = "\
Snapshots:
  Transactions and users are read from JSON arrays, one object per record.
  Without --transactions/--users, PAYDASH_TRANSACTIONS/PAYDASH_USERS are used,
  then transactions.json/users.json under PAYDASH_HOME (default ~/.paydash).
  Pass `-` to read one snapshot from stdin.

Transaction fields:
  id (or _id), user, amount, status, date          required
  interestType, interestPercentage, interestAmount optional
  phone, city, address, interestFrequency, img     optional
";

#[derive(Debug, Parser)]
#[command(
    name = "paydash",
    version,
    about = "payment tracking dashboard for lending ledgers",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Transactions snapshot path (use `-` for stdin)
    #[arg(long)]
    pub transactions: Option<String>,
    /// Users snapshot path (use `-` for stdin)
    #[arg(long)]
    pub users: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MetricArgs {
    /// Reference date for month-over-month trends (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_iso_date)]
    pub as_of: Option<IsoDate>,
    /// Seed for the decorative monthly trend percentages
    #[arg(long)]
    pub trend_seed: Option<u64>,
    /// Show this fixed percentage as every monthly trend instead
    #[arg(long, conflicts_with = "trend_seed")]
    pub fixed_trend: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show stat cards, revenue series, status split and every payment
    #[command(after_long_help = SNAPSHOT_AFTER_HELP)]
    Dash {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        metrics: MetricArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the stat cards only
    Stats {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        metrics: MetricArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show stats, the revenue series and the monthly collection breakdown
    Report {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        metrics: MetricArgs,
        /// Show only the first N months of the breakdown
        #[arg(long)]
        limit: Option<usize>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show chart series: revenue, weekly collections and status split
    Charts {
        #[command(flatten)]
        sources: SourceArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List, export and remove transactions
    #[command(arg_required_else_help = true)]
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommand,
    },
    /// Record payments
    #[command(arg_required_else_help = true)]
    Payment {
        #[command(subcommand)]
        command: PaymentCommand,
    },
    /// List, add and remove users
    #[command(arg_required_else_help = true)]
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Sign in, inspect, edit or end the dashboard session
    #[command(arg_required_else_help = true)]
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TransactionsCommand {
    /// List transactions, optionally narrowed by status tab and search term
    #[command(after_long_help = SNAPSHOT_AFTER_HELP)]
    List {
        #[command(flatten)]
        sources: SourceArgs,
        /// Status tab: All, Completed, Pending or Failed
        #[arg(long, value_parser = parse_status_tab)]
        status: Option<String>,
        /// Match payer or status (any case) or amount text
        #[arg(long)]
        search: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Export transactions as CSV
    Export {
        #[command(flatten)]
        sources: SourceArgs,
        /// Export only transactions matching this search term
        #[arg(long)]
        search: Option<String>,
        /// Write the CSV to this path instead of stdout
        #[arg(long)]
        output: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove a transaction by id
    Remove {
        /// The transaction id (e.g. txn_01J...)
        id: String,
        #[command(flatten)]
        sources: SourceArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PaymentCommand {
    /// Record a payment; unknown payers are added as Standard users
    Add {
        #[command(flatten)]
        sources: SourceArgs,
        /// Payer display name
        #[arg(long)]
        user: String,
        /// Principal amount, e.g. 1500 or 1500.50
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// Payment date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        date: IsoDate,
        /// Completed, Pending or Failed
        #[arg(long)]
        status: String,
        /// Percentage, Fixed Amount, Interest or Fixed
        #[arg(long)]
        interest_type: Option<String>,
        /// Interest rate for Percentage interest
        #[arg(long)]
        interest_percentage: Option<String>,
        /// Interest sum for fixed-amount interest
        #[arg(long)]
        interest_amount: Option<String>,
        /// How often interest is charged, e.g. Monthly
        #[arg(long)]
        interest_frequency: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List users, optionally filtered by name or email
    List {
        #[command(flatten)]
        sources: SourceArgs,
        /// Match name or email (any case)
        #[arg(long)]
        search: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Add a user
    Add {
        #[command(flatten)]
        sources: SourceArgs,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Defaults to Standard
        #[arg(long)]
        role: Option<String>,
        /// Defaults to Active
        #[arg(long)]
        status: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove a user and every transaction recorded under their name
    Remove {
        /// The user id (e.g. usr_01J...)
        id: String,
        #[command(flatten)]
        sources: SourceArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SessionCommand {
    /// Sign in as the user with this email
    Login {
        #[arg(long)]
        email: String,
        #[command(flatten)]
        sources: SourceArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the signed-in user
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Edit the signed-in user's profile and their users.json row
    Update {
        #[command(flatten)]
        sources: SourceArgs,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Sign out
    Logout {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn wants_json(&self) -> bool {
        match self {
            Self::Dash { json, .. }
            | Self::Stats { json, .. }
            | Self::Report { json, .. }
            | Self::Charts { json, .. } => *json,
            Self::Transactions { command } => match command {
                TransactionsCommand::List { json, .. }
                | TransactionsCommand::Export { json, .. }
                | TransactionsCommand::Remove { json, .. } => *json,
            },
            Self::Payment {
                command: PaymentCommand::Add { json, .. },
            } => *json,
            Self::Users { command } => match command {
                UsersCommand::List { json, .. }
                | UsersCommand::Add { json, .. }
                | UsersCommand::Remove { json, .. } => *json,
            },
            Self::Session { command } => match command {
                SessionCommand::Login { json, .. }
                | SessionCommand::Update { json, .. }
                | SessionCommand::Show { json }
                | SessionCommand::Logout { json } => *json,
            },
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

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{
        Commands, PaymentCommand, SessionCommand, TransactionsCommand, parse_from, parse_iso_date,
    };

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 17] = [
            vec!["paydash", "dash"],
            vec!["paydash", "dash", "--as-of", "2026-10-18", "--trend-seed", "7"],
            vec!["paydash", "stats", "--json"],
            vec!["paydash", "report", "--limit", "3", "--fixed-trend", "2.5"],
            vec!["paydash", "charts", "--transactions", "-"],
            vec!["paydash", "transactions", "list", "--status", "Pending"],
            vec!["paydash", "transactions", "list", "--search", "rao", "--json"],
            vec!["paydash", "transactions", "export", "--output", "out.csv"],
            vec!["paydash", "transactions", "remove", "txn_1"],
            vec![
                "paydash", "payment", "add", "--user", "Asha Rao", "--amount", "1500", "--date",
                "2026-10-18", "--status", "Pending",
            ],
            vec!["paydash", "users", "list", "--users", "./users.json"],
            vec!["paydash", "users", "add", "--name", "Meera", "--email", "m@example.com"],
            vec!["paydash", "users", "remove", "usr_1", "--json"],
            vec!["paydash", "session", "login", "--email", "m@example.com"],
            vec!["paydash", "session", "show"],
            vec!["paydash", "session", "update", "--phone", "+91 98450 00000", "--json"],
            vec!["paydash", "session", "logout", "--json"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn unknown_status_tab_is_rejected() {
        let parsed = parse_from(["paydash", "transactions", "list", "--status", "Overdue"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn trend_seed_and_fixed_trend_conflict() {
        let parsed = parse_from([
            "paydash",
            "report",
            "--trend-seed",
            "1",
            "--fixed-trend",
            "2",
        ]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn payment_add_accepts_negative_amounts_and_optional_interest() {
        let parsed = parse_from([
            "paydash",
            "payment",
            "add",
            "--user",
            "Asha Rao",
            "--amount",
            "-20",
            "--date",
            "2026-10-18",
            "--status",
            "Pending",
            "--interest-type",
            "Percentage",
            "--interest-percentage",
            "2",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Payment {
                    command: PaymentCommand::Add { ref amount, ref interest_type, .. }
                } if amount == "-20" && interest_type.as_deref() == Some("Percentage")
            ));
        }
    }

    #[test]
    fn session_update_keeps_only_the_given_fields() {
        let parsed = parse_from([
            "paydash", "session", "update", "--name", "Asha R", "--role", "Owner",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Session {
                    command: SessionCommand::Update { ref name, ref email, ref phone, ref role, .. }
                } if name.as_deref() == Some("Asha R")
                    && email.is_none()
                    && phone.is_none()
                    && role.as_deref() == Some("Owner")
            ));
        }
    }

    #[test]
    fn json_flag_is_detected_per_command() {
        let parsed = parse_from(["paydash", "transactions", "remove", "txn_1", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.command.wants_json());
            assert!(matches!(
                cli.command,
                Commands::Transactions {
                    command: TransactionsCommand::Remove { .. }
                }
            ));
        }

        let parsed = parse_from(["paydash", "dash"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(!cli.command.wants_json());
        }
    }

    #[test]
    fn group_commands_require_a_subcommand() {
        let parsed = parse_from(["paydash", "users"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(
                error.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    #[test]
    fn iso_date_parser_rejects_non_calendar_values() {
        assert!(parse_iso_date("2026-10-18").is_ok());
        assert!(parse_iso_date("2026-13-01").is_err());
        assert!(parse_iso_date("18-10-2026").is_err());
    }
}
