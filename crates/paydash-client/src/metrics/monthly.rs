use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::metrics::decoration::TrendDecoration;
use crate::records::date::month_name_at;
use crate::records::{TransactionRecord, parse_record_date};

pub const BREAKDOWN_MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: &'static str,
    pub collected: f64,
    pub trend: String,
    pub growth: bool,
}

/// Twelve month buckets, reference month first, walking backwards.
///
/// Only records dated in the reference year are summed, regardless of
/// status. Buckets are keyed by month name alone, so the months that wrap
/// into the prior year show this year's total for that name, or zero.
pub fn compute_monthly_breakdown(
    transactions: &[TransactionRecord],
    reference: NaiveDate,
    decoration: &mut dyn TrendDecoration,
) -> Vec<MonthBucket> {
    let mut collected_by_month = [0.0_f64; BREAKDOWN_MONTHS];
    for transaction in transactions {
        let Some(date) = parse_record_date(&transaction.date) else {
            continue;
        };
        if date.year() != reference.year() {
            continue;
        }
        collected_by_month[date.month0() as usize] += transaction.principal();
    }

    let reference_index = reference.month0() as usize;
    let buckets = (0..BREAKDOWN_MONTHS)
        .map(|offset| {
            let index = (reference_index + BREAKDOWN_MONTHS - offset) % BREAKDOWN_MONTHS;
            let collected = collected_by_month[index];
            let growth = collected > 0.0;
            let trend = if growth {
                format!("+{:.1}%", decoration.next_percent())
            } else {
                "0%".to_string()
            };
            MonthBucket {
                month: month_name_at(index),
                collected,
                trend,
                growth,
            }
        })
        .collect::<Vec<MonthBucket>>();

    tracing::debug!(
        records = transactions.len(),
        months_with_collections = buckets.iter().filter(|bucket| bucket.growth).count(),
        "monthly breakdown computed"
    );
    buckets
}
