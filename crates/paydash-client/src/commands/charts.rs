use crate::ClientResult;
use crate::commands::common::{SnapshotOptions, load_snapshot};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ChartsData;
use crate::metrics::{compute_revenue_series, compute_status_distribution};

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(SnapshotOptions::default())
}

/// The weekly collections chart plots the same completed-by-date series as
/// the revenue chart.
#[doc(hidden)]
pub fn run_with_options(options: SnapshotOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let snapshot = load_snapshot(&options)?;
    let revenue_series = compute_revenue_series(&snapshot.transactions);

    let data = ChartsData {
        weekly_collections: revenue_series.clone(),
        revenue_series,
        status_distribution: compute_status_distribution(&snapshot.transactions),
    };

    success("charts", data)
}
