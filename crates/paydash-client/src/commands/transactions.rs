use std::fs;
use std::path::PathBuf;

use crate::commands::common::{SnapshotOptions, load_snapshot, non_empty};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TransactionExportData, TransactionListData, TransactionRemoveData};
use crate::ledger::{StatusTab, export_csv, filter_by_status, remove_transaction, search_transactions};
use crate::records::TransactionRecord;
use crate::state::write_snapshot;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default, Clone)]
pub struct ListOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ExportOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub search: Option<String>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, Clone)]
pub struct RemoveOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub id: String,
}

pub fn list(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let tab = parse_tab(options.status.as_deref())?;
    let search = non_empty(options.search.as_deref());
    let snapshot = load_snapshot(&options.snapshot)?;

    let matched = narrow(&snapshot.transactions, search.as_deref());
    let transactions = filter_by_status(matched, tab)
        .into_iter()
        .cloned()
        .collect::<Vec<TransactionRecord>>();

    success(
        "transactions list",
        TransactionListData {
            status: tab.as_str().to_string(),
            search,
            total: snapshot.transactions.len(),
            transactions,
        },
    )
}

/// Without `output` the CSV body is returned in the envelope for the caller
/// to print.
pub fn export(options: ExportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let search = non_empty(options.search.as_deref());
    let snapshot = load_snapshot(&options.snapshot)?;
    let matched = narrow(&snapshot.transactions, search.as_deref());
    let body = export_csv(&matched)?;

    let data = match options.output {
        Some(path) => {
            fs::write(&path, &body)
                .map_err(|error| ClientError::snapshot_write_failed(&path, &error.to_string()))?;
            tracing::info!(path = %path.display(), rows = matched.len(), "csv export written");
            TransactionExportData {
                rows: matched.len(),
                output: Some(path.display().to_string()),
                csv: None,
            }
        }
        None => TransactionExportData {
            rows: matched.len(),
            output: None,
            csv: Some(body),
        },
    };

    success("transactions export", data)
}

pub fn remove(options: RemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let id = options.id.trim().to_string();
    let snapshot = load_snapshot(&options.snapshot)?;
    let Some(remaining) = remove_transaction(&snapshot.transactions, &id) else {
        return Err(ClientError::record_not_found("transaction", &id));
    };

    write_snapshot(&snapshot.paths.transactions, &remaining)?;
    success(
        "transactions remove",
        TransactionRemoveData {
            id,
            remaining: remaining.len(),
            path: snapshot.paths.transactions.describe(),
        },
    )
}

fn narrow<'a>(transactions: &'a [TransactionRecord], search: Option<&str>) -> Vec<&'a TransactionRecord> {
    match search {
        Some(term) => search_transactions(transactions, term),
        None => transactions.iter().collect(),
    }
}

fn parse_tab(value: Option<&str>) -> ClientResult<StatusTab> {
    let Some(raw) = value else {
        return Ok(StatusTab::All);
    };
    StatusTab::parse(raw).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("Unknown status `{raw}`. Use All, Completed, Pending or Failed."),
            Some("transactions list"),
        )
    })
}
