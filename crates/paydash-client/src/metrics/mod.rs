//! Dashboard metrics derived from a snapshot of transaction and user records.
//!
//! Every function here is pure: inputs are only read, outputs are freshly
//! allocated, and the reference date is always passed in. Malformed amounts
//! count as zero and unparseable dates drop out of date-keyed buckets, so
//! none of these computations can fail.

pub mod charts;
pub mod decoration;
pub mod monthly;
pub mod stats;
pub mod trend;

use chrono::NaiveDate;
use serde::Serialize;

use crate::records::{TransactionRecord, UserRecord};

pub use charts::{SeriesPoint, StatusSlice, compute_revenue_series, compute_status_distribution};
pub use decoration::{FixedTrend, SeededTrend, TrendDecoration, UlidTrend};
pub use monthly::{MonthBucket, compute_monthly_breakdown};
pub use stats::{Stats, compute_stats};
pub use trend::{Trend, TrendDirection};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub stats: Stats,
    pub revenue_series: Vec<SeriesPoint>,
    pub status_distribution: Vec<StatusSlice>,
    pub monthly_breakdown: Vec<MonthBucket>,
}

pub fn compute_dashboard(
    transactions: &[TransactionRecord],
    users: &[UserRecord],
    reference: NaiveDate,
    decoration: &mut dyn TrendDecoration,
) -> DashboardMetrics {
    DashboardMetrics {
        stats: compute_stats(transactions, users, reference),
        revenue_series: compute_revenue_series(transactions),
        status_distribution: compute_status_distribution(transactions),
        monthly_breakdown: compute_monthly_breakdown(transactions, reference, decoration),
    }
}
