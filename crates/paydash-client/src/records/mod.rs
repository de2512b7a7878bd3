pub(crate) mod date;
pub mod input;
pub mod number;
pub mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::number::{lenient_number, lenient_text, parse_amount};

pub use date::parse_record_date;

/// Opaque record identifier. The REST layer hands out both numeric
/// (`Date.now()`-style) and string ids, so the original JSON type is kept
/// for write-back while comparisons go through the text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl RecordId {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Text(value) => value == candidate,
            Self::Number(value) => value.to_string() == candidate,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Other(value) => value,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Completed" => Self::Completed,
            "Pending" => Self::Pending,
            "Failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.as_str().to_string()
    }
}

/// How a transaction accrues interest. The REST data carries three spellings
/// for a fixed sum; each is kept so snapshots round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterestType {
    Percentage,
    FixedAmount,
    Interest,
    Fixed,
    Unrecognized(String),
}

impl InterestType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Percentage => "Percentage",
            Self::FixedAmount => "Fixed Amount",
            Self::Interest => "Interest",
            Self::Fixed => "Fixed",
            Self::Unrecognized(value) => value,
        }
    }

    pub fn is_fixed_amount(&self) -> bool {
        matches!(self, Self::FixedAmount | Self::Interest | Self::Fixed)
    }
}

impl Default for InterestType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for InterestType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Percentage" => Self::Percentage,
            "Fixed Amount" => Self::FixedAmount,
            "Interest" => Self::Interest,
            "Fixed" => Self::Fixed,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<InterestType> for String {
    fn from(value: InterestType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub user: String,
    #[serde(deserialize_with = "lenient_text")]
    pub amount: String,
    pub status: TransactionStatus,
    pub date: String,
    #[serde(default)]
    pub interest_type: InterestType,
    #[serde(default, deserialize_with = "lenient_number")]
    pub interest_percentage: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub interest_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionRecord {
    /// Parsed `amount`; malformed text counts as zero.
    pub fn principal(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// Interest still expected on this record, by its own rate or fixed sum.
    pub fn projected_interest(&self) -> f64 {
        if self.interest_type == InterestType::Percentage {
            return self.principal() * (self.interest_percentage / 100.0);
        }
        if self.interest_type.is_fixed_amount() {
            return self.interest_amount;
        }
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
