#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use paydash_client::commands::{MetricOptions, SnapshotOptions};
use serde_json::Value;
use tempfile::{TempDir, tempdir};

pub const TRANSACTIONS: &str = r#"[
  {"id": "txn_1", "user": "Asha Rao", "amount": "₹1200.00", "status": "Completed", "date": "2026-10-02"},
  {"id": "txn_2", "user": "Ravi Menon", "amount": "₹800.00", "status": "Pending", "date": "2026-10-09",
   "interestType": "Percentage", "interestPercentage": 10},
  {"id": "txn_3", "user": "Asha Rao", "amount": "₹500.00", "status": "Failed", "date": "2026-09-20",
   "branch": "Kochi"}
]"#;

pub const USERS: &str = r#"[
  {"id": "usr_1", "name": "Asha Rao", "email": "asha@example.com", "role": "Admin", "status": "Active"},
  {"id": "usr_2", "name": "Ravi Menon", "email": "ravi@example.com", "role": "Standard", "status": "Active"}
]"#;

/// A temporary paydash home seeded with the fixture snapshots.
pub struct Home {
    dir: TempDir,
}

impl Home {
    pub fn seeded() -> Self {
        let home = Self::empty();
        home.write("transactions.json", TRANSACTIONS);
        home.write("users.json", USERS);
        home
    }

    pub fn empty() -> Self {
        let dir = tempdir();
        assert!(dir.is_ok());
        match dir {
            Ok(dir) => Self { dir },
            Err(error) => panic!("tempdir failed: {error}"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, body: &str) {
        assert!(fs::write(self.file(name), body).is_ok());
    }

    pub fn read_json(&self, name: &str) -> Value {
        let body = fs::read_to_string(self.file(name)).unwrap_or_default();
        serde_json::from_str(&body).unwrap_or(Value::Null)
    }

    pub fn snapshot(&self) -> SnapshotOptions<'_> {
        SnapshotOptions {
            transactions: Some(self.file("transactions.json").display().to_string()),
            users: Some(self.file("users.json").display().to_string()),
            home_override: Some(self.path()),
            ..SnapshotOptions::default()
        }
    }
}

pub fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or(NaiveDate::MIN)
}

pub fn pinned_metrics() -> MetricOptions {
    MetricOptions {
        today: reference_day(),
        fixed_trend: Some(2.5),
        ..MetricOptions::default()
    }
}
