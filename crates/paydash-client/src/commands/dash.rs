use crate::ClientResult;
use crate::commands::common::{
    MetricOptions, SnapshotOptions, build_decoration, load_snapshot, resolve_reference,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashData;
use crate::metrics::compute_dashboard;
use crate::records::date::format_iso_date;

#[derive(Debug, Default, Clone)]
pub struct DashRunOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub metrics: MetricOptions,
}

pub fn run(metrics: MetricOptions) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashRunOptions {
        snapshot: SnapshotOptions::default(),
        metrics,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: DashRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let reference = resolve_reference(&options.metrics, "dash")?;
    let snapshot = load_snapshot(&options.snapshot)?;
    let mut decoration = build_decoration(&options.metrics);
    let metrics = compute_dashboard(
        &snapshot.transactions,
        &snapshot.users,
        reference,
        decoration.as_mut(),
    );

    let data = DashData {
        reference_date: format_iso_date(&reference),
        stats: metrics.stats,
        revenue_series: metrics.revenue_series,
        status_distribution: metrics.status_distribution,
        sources: snapshot.sources(),
        transactions: snapshot.transactions,
    };

    success("dash", data)
}
