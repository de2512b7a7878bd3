use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::contracts::types::RecordIssue;
use crate::records::{TransactionRecord, UserRecord};
use crate::{ClientError, ClientResult};

pub const TRANSACTION_REQUIRED_FIELDS: [&str; 5] = ["id", "user", "amount", "status", "date"];
pub const USER_REQUIRED_FIELDS: [&str; 2] = ["id", "name"];

pub fn parse_transactions(content: &str) -> ClientResult<Vec<TransactionRecord>> {
    parse_records(content, "transaction", &TRANSACTION_REQUIRED_FIELDS)
}

pub fn parse_users(content: &str) -> ClientResult<Vec<UserRecord>> {
    parse_records(content, "user", &USER_REQUIRED_FIELDS)
}

fn parse_records<T>(content: &str, kind: &str, required: &[&str]) -> ClientResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let parsed = serde_json::from_str::<Value>(trimmed).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("The {kind} snapshot is not valid JSON: {error}"),
            vec![format!("Provide a JSON array of {kind} objects.")],
        )
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!("The {kind} snapshot must be a top-level JSON array."),
            vec![format!("Provide a JSON array of {kind} objects.")],
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let row = index + 1;
        let Some(object) = item.as_object() else {
            issues.push(issue(row, "", &format!("{kind} entries must be JSON objects")));
            continue;
        };

        let missing = missing_required_fields(object, required);
        if !missing.is_empty() {
            issues.extend(
                missing
                    .into_iter()
                    .map(|field| issue(row, field, "missing required field")),
            );
            continue;
        }

        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => records.push(record),
            Err(error) => issues.push(issue(row, "", &error.to_string())),
        }
    }

    if !issues.is_empty() {
        tracing::warn!(kind, issue_count = issues.len(), "snapshot rejected at the boundary");
        return Err(ClientError::invalid_records(kind, issues));
    }

    tracing::debug!(kind, count = records.len(), "snapshot parsed");
    Ok(records)
}

fn missing_required_fields<'a>(object: &Map<String, Value>, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|field| {
            let present = |key: &str| object.get(key).is_some_and(|value| !value.is_null());
            if *field == "id" {
                return !(present("id") || present("_id"));
            }
            !present(field)
        })
        .collect()
}

fn issue(row: usize, field: &str, message: &str) -> RecordIssue {
    RecordIssue {
        row,
        field: field.to_string(),
        message: message.to_string(),
    }
}
