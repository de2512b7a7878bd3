use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::RecordIssue;

pub(crate) const RECORDS_HELP_COMMAND: &str = "paydash transactions list --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `paydash {cmd} --help` for usage."),
            None => "Run `paydash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_records(kind: &str, issues: Vec<RecordIssue>) -> Self {
        let issue_count = issues.len();
        Self::new(
            "invalid_records",
            &format!("The {kind} snapshot has {issue_count} issues. Nothing was computed."),
            vec![
                format!("Fix the listed {kind} fields in the source file."),
                format!("Run `{RECORDS_HELP_COMMAND}` to review the expected fields."),
            ],
        )
        .with_data(json!({
            "kind": kind,
            "issues": issues,
        }))
    }

    pub fn source_unreadable(source: &str, detail: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Could not read snapshot source `{source}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Or set PAYDASH_TRANSACTIONS / PAYDASH_USERS to a readable file.".to_string(),
            ],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn snapshot_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "snapshot_write_failed",
            &format!("Could not write snapshot `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or point the command at a writable copy."
            )],
        )
    }

    pub fn session_store_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "session_store_failed",
            &format!("Session store at `{location}` failed: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `PAYDASH_HOME` to a writable directory."
            )],
        )
    }

    pub fn session_missing() -> Self {
        Self::new(
            "session_missing",
            "No active session.",
            vec!["Run `paydash session login --email <email>` to sign in.".to_string()],
        )
    }

    pub fn user_not_found(email: &str) -> Self {
        Self::new(
            "user_not_found",
            &format!("No user with email `{email}` exists in the users snapshot."),
            vec![
                "Run `paydash users list` to see known users.".to_string(),
                "Or add one with `paydash users add --name <name> --email <email>`.".to_string(),
            ],
        )
        .with_data(json!({
            "email": email,
        }))
    }

    pub fn record_not_found(kind: &str, id: &str) -> Self {
        Self::new(
            "record_not_found",
            &format!("No {kind} with id `{id}` was found."),
            vec![format!("Run `paydash {kind}s list` to find a valid id.")],
        )
        .with_data(json!({
            "kind": kind,
            "id": id,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn home_unresolved(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "home_unresolved",
            &format!("Cannot resolve the paydash home at `{location}`: {detail}"),
            vec!["Set `PAYDASH_HOME` to a writable directory.".to_string()],
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;
    use crate::contracts::types::RecordIssue;

    #[test]
    fn invalid_argument_for_command_carries_hint() {
        let error = ClientError::invalid_argument_for_command("bad", Some("stats"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `paydash stats --help` for usage.".to_string()]
        );
        assert!(error.data.is_some());
    }

    #[test]
    fn invalid_records_counts_issues() {
        let error = ClientError::invalid_records(
            "transaction",
            vec![RecordIssue {
                row: 2,
                field: "amount".to_string(),
                message: "missing required field".to_string(),
            }],
        );
        assert_eq!(error.code, "invalid_records");
        assert!(error.message.contains("1 issues"));
        let issues = error
            .data
            .as_ref()
            .and_then(|data| data.get("issues"))
            .and_then(|value| value.as_array())
            .map(Vec::len);
        assert_eq!(issues, Some(1));
    }
}
