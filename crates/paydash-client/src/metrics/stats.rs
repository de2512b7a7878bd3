use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::metrics::trend::Trend;
use crate::records::date::previous_month;
use crate::records::{TransactionRecord, TransactionStatus, UserRecord, parse_record_date};

/// Headline figures for the stat cards.
///
/// `principal_trend` and `interest_trend` are not measured on their own: they
/// repeat `revenue_trend` whenever their figure is positive and read `0%`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_revenue: f64,
    pub revenue_trend: Trend,
    pub active_principal: f64,
    pub principal_trend: Trend,
    pub projected_interest: f64,
    pub interest_trend: Trend,
    pub pending_count: usize,
    pub active_user_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MonthOverMonth {
    pub current: f64,
    pub previous: f64,
}

pub fn compute_stats(
    transactions: &[TransactionRecord],
    users: &[UserRecord],
    reference: NaiveDate,
) -> Stats {
    let mut total_revenue = 0.0;
    let mut active_principal = 0.0;
    let mut projected_interest = 0.0;
    let mut pending_count = 0usize;

    for transaction in transactions {
        let principal = transaction.principal();
        active_principal += principal;
        if transaction.status.is_completed() {
            total_revenue += principal;
        } else {
            projected_interest += transaction.projected_interest();
        }
        if transaction.status == TransactionStatus::Pending {
            pending_count += 1;
        }
    }

    let totals = completed_month_totals(transactions, reference);
    let revenue_trend = Trend::between(totals.current, totals.previous);
    let principal_trend = revenue_trend.mirror(active_principal);
    let interest_trend = revenue_trend.mirror(projected_interest);

    tracing::debug!(
        records = transactions.len(),
        users = users.len(),
        total_revenue,
        active_principal,
        projected_interest,
        revenue_trend = %revenue_trend.value,
        "stats computed"
    );

    Stats {
        total_revenue,
        revenue_trend,
        active_principal,
        principal_trend,
        projected_interest,
        interest_trend,
        pending_count,
        active_user_count: users.len(),
    }
}

/// Completed amounts in the reference month and the calendar month before it.
pub(crate) fn completed_month_totals(
    transactions: &[TransactionRecord],
    reference: NaiveDate,
) -> MonthOverMonth {
    let current_key = (reference.year(), reference.month());
    let previous_key = previous_month(&reference);

    let mut totals = MonthOverMonth::default();
    for transaction in transactions {
        if !transaction.status.is_completed() {
            continue;
        }
        let Some(date) = parse_record_date(&transaction.date) else {
            continue;
        };
        let key = (date.year(), date.month());
        if key == current_key {
            totals.current += transaction.principal();
        } else if key == previous_key {
            totals.previous += transaction.principal();
        }
    }
    totals
}
