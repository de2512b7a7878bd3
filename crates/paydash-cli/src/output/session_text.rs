use std::io;

use serde_json::Value;

use super::format::{key_value_rows, value_str};

pub fn render_session(command: &str, data: &Value) -> io::Result<String> {
    let user = data
        .get("session")
        .and_then(|session| session.get("user"))
        .ok_or_else(|| io::Error::other(format!("{command} output requires session.user")))?;
    let signed_in_at = data
        .get("session")
        .map(|session| value_str(session, "signed_in_at"))
        .unwrap_or("");

    let name = value_str(user, "name");
    let heading = match command {
        "session login" => format!("Signed in as {name}."),
        "session update" => format!("Profile updated for {name}."),
        _ => format!("Signed in as {name} since {signed_in_at}."),
    };
    let mut rows = vec![
        ("Email:", value_str(user, "email").to_string()),
        ("Role:", value_str(user, "role").to_string()),
    ];
    let phone = value_str(user, "phone");
    if !phone.is_empty() {
        rows.push(("Phone:", phone.to_string()));
    }
    let mut lines = vec![heading, String::new()];
    lines.extend(key_value_rows(&rows, 2));
    Ok(lines.join("\n"))
}

pub fn render_logout(data: &Value) -> String {
    let cleared = data.get("cleared").and_then(Value::as_bool).unwrap_or(false);
    if cleared {
        "Signed out.".to_string()
    } else {
        "No active session; nothing to sign out of.".to_string()
    }
}
