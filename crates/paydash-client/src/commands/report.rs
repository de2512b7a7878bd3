use crate::commands::common::{
    MetricOptions, SnapshotOptions, build_decoration, load_snapshot, resolve_reference,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::metrics::monthly::BREAKDOWN_MONTHS;
use crate::metrics::{compute_monthly_breakdown, compute_revenue_series, compute_stats};
use crate::records::date::{format_iso_date, month_name};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default, Clone)]
pub struct ReportRunOptions<'a> {
    pub snapshot: SnapshotOptions<'a>,
    pub metrics: MetricOptions,
    pub limit: Option<usize>,
}

pub fn run(metrics: MetricOptions, limit: Option<usize>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ReportRunOptions {
        snapshot: SnapshotOptions::default(),
        metrics,
        limit,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ReportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let months_shown = match options.limit {
        Some(0) => {
            return Err(ClientError::invalid_argument_for_command(
                "--limit must be at least 1.",
                Some("report"),
            ));
        }
        Some(limit) => limit.min(BREAKDOWN_MONTHS),
        None => BREAKDOWN_MONTHS,
    };
    let reference = resolve_reference(&options.metrics, "report")?;
    let snapshot = load_snapshot(&options.snapshot)?;
    let mut decoration = build_decoration(&options.metrics);

    let mut monthly_breakdown =
        compute_monthly_breakdown(&snapshot.transactions, reference, decoration.as_mut());
    monthly_breakdown.truncate(months_shown);

    let data = ReportData {
        reference_date: format_iso_date(&reference),
        reference_month: month_name(&reference).to_string(),
        stats: compute_stats(&snapshot.transactions, &snapshot.users, reference),
        revenue_series: compute_revenue_series(&snapshot.transactions),
        monthly_breakdown,
        months_total: BREAKDOWN_MONTHS,
    };

    success("report", data)
}
