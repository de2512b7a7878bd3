use serde::Serialize;

use crate::metrics::{MonthBucket, SeriesPoint, Stats, StatusSlice};
use crate::records::{TransactionRecord, UserRecord};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    pub row: usize,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSources {
    pub transactions: String,
    pub users: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashData {
    pub reference_date: String,
    pub stats: Stats,
    pub revenue_series: Vec<SeriesPoint>,
    pub status_distribution: Vec<StatusSlice>,
    pub sources: SnapshotSources,
    /// Every transaction, in snapshot order (newest first).
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    pub reference_date: String,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub reference_date: String,
    pub reference_month: String,
    pub stats: Stats,
    pub revenue_series: Vec<SeriesPoint>,
    pub monthly_breakdown: Vec<MonthBucket>,
    pub months_total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartsData {
    pub revenue_series: Vec<SeriesPoint>,
    pub weekly_collections: Vec<SeriesPoint>,
    pub status_distribution: Vec<StatusSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub status: String,
    pub search: Option<String>,
    pub total: usize,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionExportData {
    pub rows: usize,
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRemoveData {
    pub id: String,
    pub remaining: usize,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentAddData {
    pub transaction: TransactionRecord,
    pub created_user: Option<UserRecord>,
    pub transaction_count: usize,
    pub transactions_path: String,
    pub users_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListData {
    pub search: Option<String>,
    pub total: usize,
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAddData {
    pub user: UserRecord,
    pub user_count: usize,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRemoveData {
    pub user: UserRecord,
    pub transactions_removed: usize,
    pub remaining_users: usize,
    pub remaining_transactions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    pub signed_in: bool,
    pub session: Option<Session>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionLogoutData {
    pub cleared: bool,
}
