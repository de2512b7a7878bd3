pub mod charts;
pub mod common;
pub mod dash;
pub mod payment;
pub mod report;
pub mod session;
pub mod stats;
pub mod transactions;
pub mod users;

pub use common::{MetricOptions, SnapshotOptions};
