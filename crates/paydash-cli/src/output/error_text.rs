use paydash_client::ClientError;
use serde_json::Value;

/// Row issues are listed when the data carries them, capped so a badly
/// broken snapshot does not flood the terminal.
const MAX_LISTED_ISSUES: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues.filter(|issues| !issues.is_empty()) {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        for issue in issues.iter().take(MAX_LISTED_ISSUES) {
            let row = issue.get("row").and_then(Value::as_u64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("");
            let message = issue.get("message").and_then(Value::as_str).unwrap_or("");
            if field.is_empty() {
                lines.push(format!("  row {row}: {message}"));
            } else {
                lines.push(format!("  row {row}, `{field}`: {message}"));
            }
        }
        if issues.len() > MAX_LISTED_ISSUES {
            lines.push(format!("  ... and {} more", issues.len() - MAX_LISTED_ISSUES));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
