use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::date::weekday_short;
use crate::records::{TransactionRecord, TransactionStatus, parse_record_date};

pub const REVENUE_SERIES_POINTS: usize = 7;

const INVALID_DATE_LABEL: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub date: String,
    pub value: f64,
}

/// Record counts per payment status, in Paid / Pending / Overdue order.
/// Empty slices are left out.
pub fn compute_status_distribution(transactions: &[TransactionRecord]) -> Vec<StatusSlice> {
    let mut paid = 0usize;
    let mut pending = 0usize;
    let mut overdue = 0usize;
    for transaction in transactions {
        match transaction.status {
            TransactionStatus::Completed => paid += 1,
            TransactionStatus::Pending => pending += 1,
            TransactionStatus::Failed => overdue += 1,
            TransactionStatus::Other(_) => {}
        }
    }

    [
        StatusSlice {
            name: "Paid",
            value: paid,
            color: "#10b981",
        },
        StatusSlice {
            name: "Pending",
            value: pending,
            color: "#f59e0b",
        },
        StatusSlice {
            name: "Overdue",
            value: overdue,
            color: "#ef4444",
        },
    ]
    .into_iter()
    .filter(|slice| slice.value > 0)
    .collect()
}

/// Completed amounts summed per exact date string, keeping the last
/// `REVENUE_SERIES_POINTS` dates in ascending order.
pub fn compute_revenue_series(transactions: &[TransactionRecord]) -> Vec<SeriesPoint> {
    let mut by_date: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in transactions {
        if !transaction.status.is_completed() {
            continue;
        }
        *by_date.entry(transaction.date.as_str()).or_insert(0.0) += transaction.principal();
    }

    let skip = by_date.len().saturating_sub(REVENUE_SERIES_POINTS);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, value)| SeriesPoint {
            label: parse_record_date(date)
                .map(|parsed| weekday_short(&parsed))
                .unwrap_or_else(|| INVALID_DATE_LABEL.to_string()),
            date: date.to_string(),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{REVENUE_SERIES_POINTS, compute_revenue_series, compute_status_distribution};
    use crate::records::fixtures::transaction;

    #[test]
    fn distribution_maps_statuses_and_drops_empty_slices() {
        let rows = vec![
            transaction("t1", "₹1", "Completed", "2026-10-01"),
            transaction("t2", "₹1", "Completed", "2026-10-02"),
            transaction("t3", "₹1", "Failed", "2026-10-03"),
            transaction("t4", "₹1", "Refunded", "2026-10-03"),
        ];

        let slices = compute_status_distribution(&rows);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "Paid");
        assert_eq!(slices[0].value, 2);
        assert_eq!(slices[0].color, "#10b981");
        assert_eq!(slices[1].name, "Overdue");
        assert_eq!(slices[1].value, 1);
        assert!(slices.iter().all(|slice| slice.value > 0));
    }

    #[test]
    fn distribution_of_nothing_is_empty() {
        assert!(compute_status_distribution(&[]).is_empty());
    }

    #[test]
    fn series_sums_completed_per_date_and_keeps_last_seven() {
        let mut rows = (1..=9)
            .map(|day| {
                transaction(
                    &format!("t{day}"),
                    "₹10",
                    "Completed",
                    &format!("2026-10-0{day}"),
                )
            })
            .collect::<Vec<_>>();
        rows.push(transaction("t10", "₹5", "Completed", "2026-10-09"));
        rows.push(transaction("t11", "₹500", "Pending", "2026-10-09"));

        let series = compute_revenue_series(&rows);
        assert_eq!(series.len(), REVENUE_SERIES_POINTS);
        assert_eq!(series[0].date, "2026-10-03");
        assert_eq!(series[6].date, "2026-10-09");
        assert_eq!(series[6].value, 15.0);
        assert_eq!(series[6].label, "Fri");
        assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn unparseable_dates_keep_their_own_bucket() {
        let rows = vec![
            transaction("t1", "₹10", "Completed", "someday"),
            transaction("t2", "₹10", "Completed", "2026-10-18"),
        ];

        let series = compute_revenue_series(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Sun");
        assert_eq!(series[1].label, "Invalid Date");
    }

    #[test]
    fn series_of_nothing_is_empty() {
        assert!(compute_revenue_series(&[]).is_empty());
    }
}
