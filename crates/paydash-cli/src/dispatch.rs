use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use paydash_client::commands::{self, MetricOptions, SnapshotOptions};
use paydash_client::ledger::{PaymentDraft, ProfilePatch, UserDraft};
use paydash_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    Cli, Commands, MetricArgs, PaymentCommand, SessionCommand, SourceArgs, TransactionsCommand,
    UsersCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    dispatch_on(cli, Local::now().date_naive())
}

pub(crate) fn dispatch_on(cli: &Cli, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Dash {
            sources, metrics, ..
        } => commands::dash::run_with_options(commands::dash::DashRunOptions {
            snapshot: snapshot_options(sources),
            metrics: metric_options(metrics, today),
        }),
        Commands::Stats {
            sources, metrics, ..
        } => commands::stats::run_with_options(commands::stats::StatsRunOptions {
            snapshot: snapshot_options(sources),
            metrics: metric_options(metrics, today),
        }),
        Commands::Report {
            sources,
            metrics,
            limit,
            ..
        } => commands::report::run_with_options(commands::report::ReportRunOptions {
            snapshot: snapshot_options(sources),
            metrics: metric_options(metrics, today),
            limit: *limit,
        }),
        Commands::Charts { sources, .. } => {
            commands::charts::run_with_options(snapshot_options(sources))
        }
        Commands::Transactions { command } => dispatch_transactions(command),
        Commands::Payment { command } => dispatch_payment(command),
        Commands::Users { command } => dispatch_users(command),
        Commands::Session { command } => dispatch_session(command),
    }
}

fn dispatch_transactions(command: &TransactionsCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        TransactionsCommand::List {
            sources,
            status,
            search,
            ..
        } => commands::transactions::list(commands::transactions::ListOptions {
            snapshot: snapshot_options(sources),
            status: status.clone(),
            search: search.clone(),
        }),
        TransactionsCommand::Export {
            sources,
            search,
            output,
            ..
        } => commands::transactions::export(commands::transactions::ExportOptions {
            snapshot: snapshot_options(sources),
            search: search.clone(),
            output: output.as_ref().map(PathBuf::from),
        }),
        TransactionsCommand::Remove { id, sources, .. } => {
            commands::transactions::remove(commands::transactions::RemoveOptions {
                snapshot: snapshot_options(sources),
                id: id.clone(),
            })
        }
    }
}

fn dispatch_payment(command: &PaymentCommand) -> ClientResult<SuccessEnvelope> {
    let PaymentCommand::Add {
        sources,
        user,
        amount,
        date,
        status,
        interest_type,
        interest_percentage,
        interest_amount,
        interest_frequency,
        phone,
        city,
        address,
        ..
    } = command;

    commands::payment::add(commands::payment::AddOptions {
        snapshot: snapshot_options(sources),
        draft: PaymentDraft {
            user: user.clone(),
            amount: amount.clone(),
            status: status.clone(),
            date: date.as_str().to_string(),
            interest_type: interest_type.clone().unwrap_or_default(),
            interest_percentage: interest_percentage.clone().unwrap_or_default(),
            interest_amount: interest_amount.clone().unwrap_or_default(),
            interest_frequency: interest_frequency.clone(),
            phone: phone.clone(),
            city: city.clone(),
            address: address.clone(),
        },
    })
}

fn dispatch_users(command: &UsersCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        UsersCommand::List {
            sources, search, ..
        } => commands::users::list(commands::users::ListOptions {
            snapshot: snapshot_options(sources),
            search: search.clone(),
        }),
        UsersCommand::Add {
            sources,
            name,
            email,
            role,
            status,
            ..
        } => commands::users::add(commands::users::AddOptions {
            snapshot: snapshot_options(sources),
            draft: UserDraft {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                status: status.clone(),
            },
        }),
        UsersCommand::Remove { id, sources, .. } => {
            commands::users::remove(commands::users::RemoveOptions {
                snapshot: snapshot_options(sources),
                id: id.clone(),
            })
        }
    }
}

fn dispatch_session(command: &SessionCommand) -> ClientResult<SuccessEnvelope> {
    match command {
        SessionCommand::Login { email, sources, .. } => {
            commands::session::login(commands::session::LoginOptions {
                snapshot: snapshot_options(sources),
                email: email.clone(),
            })
        }
        SessionCommand::Show { .. } => commands::session::show(SnapshotOptions::default()),
        SessionCommand::Update {
            sources,
            name,
            email,
            phone,
            role,
            avatar,
            ..
        } => commands::session::update(commands::session::UpdateOptions {
            snapshot: snapshot_options(sources),
            profile: ProfilePatch {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                role: role.clone(),
                avatar: avatar.clone(),
            },
        }),
        SessionCommand::Logout { .. } => commands::session::logout(SnapshotOptions::default()),
    }
}

fn snapshot_options(sources: &SourceArgs) -> SnapshotOptions<'static> {
    SnapshotOptions {
        transactions: sources.transactions.clone(),
        users: sources.users.clone(),
        ..SnapshotOptions::default()
    }
}

fn metric_options(metrics: &MetricArgs, today: NaiveDate) -> MetricOptions {
    MetricOptions {
        as_of: metrics.as_of.as_ref().map(|date| date.as_str().to_string()),
        today,
        trend_seed: metrics.trend_seed,
        fixed_trend: metrics.fixed_trend,
    }
}
