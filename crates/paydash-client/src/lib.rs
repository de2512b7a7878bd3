pub mod commands;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod records;
pub mod session;
pub mod state;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
