use crate::ClientResult;
use crate::commands::common::{MetricOptions, SnapshotOptions, load_snapshot, resolve_reference};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::StatsData;
use crate::metrics::compute_stats;
use crate::records::date::format_iso_date;

#[derive(Debug, Default, Clone)]
pub struct StatsRunOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub metrics: MetricOptions,
}

pub fn run(metrics: MetricOptions) -> ClientResult<SuccessEnvelope> {
    run_with_options(StatsRunOptions {
        snapshot: SnapshotOptions::default(),
        metrics,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: StatsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let reference = resolve_reference(&options.metrics, "stats")?;
    let snapshot = load_snapshot(&options.snapshot)?;
    let stats = compute_stats(&snapshot.transactions, &snapshot.users, reference);

    success(
        "stats",
        StatsData {
            reference_date: format_iso_date(&reference),
            stats,
        },
    )
}
