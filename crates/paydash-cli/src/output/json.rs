use std::io;

use paydash_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

/// List commands emit their rows as a bare array; everything else is wrapped
/// with the command path and contract version.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "transactions list" => rows_array(&success.data, "transactions"),
        "users list" => rows_array(&success.data, "users"),
        _ => json!({
            "ok": true,
            "command": success.command,
            "version": JSON_VERSION,
            "data": success.data,
        }),
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut body = json!({
        "code": error.code,
        "message": error.message,
        "recovery_steps": error.recovery_steps,
    });
    if let Some(issues) = error.data.as_ref().and_then(|data| data.get("issues")) {
        body["issues"] = issues.clone();
    }
    serialize_json_pretty(&json!({ "error": body }))
}

fn rows_array(data: &Value, key: &str) -> Value {
    data.get(key)
        .cloned()
        .filter(Value::is_array)
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
