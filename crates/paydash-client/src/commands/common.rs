use std::path::Path;

use chrono::NaiveDate;

use crate::contracts::types::SnapshotSources;
use crate::metrics::{FixedTrend, SeededTrend, TrendDecoration, UlidTrend};
use crate::records::date::looks_like_iso_date;
use crate::records::input::{SnapshotSource, read_source};
use crate::records::parse::{parse_transactions, parse_users};
use crate::records::{TransactionRecord, UserRecord};
use crate::state::{SnapshotPaths, resolve_home, resolve_snapshot_paths};
use crate::{ClientError, ClientResult};

/// Where a command reads its snapshots from.
#[derive(Debug, Default, Clone)]
pub struct SnapshotOptions<'a> {
    pub transactions: Option<String>,
    pub users: Option<String>,
    pub home_override: Option<&'a Path>,
    #[doc(hidden)]
    pub stdin_override: Option<&'a str>,
}

/// Reference date and monthly-trend decoration for metric commands.
/// `today` is supplied by the caller; the library never reads the clock.
#[derive(Debug, Default, Clone)]
pub struct MetricOptions {
    pub as_of: Option<String>,
    pub today: NaiveDate,
    pub trend_seed: Option<u64>,
    pub fixed_trend: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedSnapshot {
    pub(crate) paths: SnapshotPaths,
    pub(crate) transactions: Vec<TransactionRecord>,
    pub(crate) users: Vec<UserRecord>,
}

impl LoadedSnapshot {
    pub(crate) fn sources(&self) -> SnapshotSources {
        SnapshotSources {
            transactions: self.paths.transactions.describe(),
            users: self.paths.users.describe(),
        }
    }
}

pub(crate) fn load_snapshot(options: &SnapshotOptions<'_>) -> ClientResult<LoadedSnapshot> {
    let home = resolve_home(options.home_override)?;
    let paths = resolve_snapshot_paths(
        &home,
        options.transactions.as_deref(),
        options.users.as_deref(),
    )?;

    let transactions = parse_transactions(&read_source(
        &paths.transactions,
        stdin_for(&paths.transactions, options.stdin_override),
    )?)?;
    let users = parse_users(&read_source(
        &paths.users,
        stdin_for(&paths.users, options.stdin_override),
    )?)?;

    tracing::debug!(
        transactions = transactions.len(),
        users = users.len(),
        home = %home.display(),
        "snapshot loaded"
    );
    Ok(LoadedSnapshot {
        paths,
        transactions,
        users,
    })
}

pub(crate) fn resolve_reference(options: &MetricOptions, command: &str) -> ClientResult<NaiveDate> {
    match options.as_of.as_deref() {
        Some(value) => parse_as_of(value, command),
        None => Ok(options.today),
    }
}

pub(crate) fn build_decoration(options: &MetricOptions) -> Box<dyn TrendDecoration> {
    if let Some(percent) = options.fixed_trend {
        return Box::new(FixedTrend(percent));
    }
    match options.trend_seed {
        Some(seed) => Box::new(SeededTrend::new(seed)),
        None => Box::new(UlidTrend),
    }
}

/// Strict `YYYY-MM-DD`; record dates are parsed more leniently.
pub(crate) fn parse_as_of(value: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value.as_bytes()) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{value}` is not a YYYY-MM-DD date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{value}` is not a calendar date."),
            Some(command),
        )
    })
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn stdin_for<'a>(source: &SnapshotSource, stdin_override: Option<&'a str>) -> Option<&'a str> {
    match source {
        SnapshotSource::Stdin => stdin_override,
        SnapshotSource::File(_) => None,
    }
}
