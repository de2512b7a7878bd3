use std::io;

use serde_json::Value;

use super::format::{
    Column, key_value_rows, render_table, terminal_width, value_array, value_str, value_text,
    value_u64,
};

pub(super) fn transaction_table(rows: &[Value]) -> Vec<String> {
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                value_text(row, "id"),
                value_str(row, "user").to_string(),
                value_str(row, "date").to_string(),
                value_text(row, "amount"),
                value_str(row, "status").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    render_table(
        &[
            Column::left("ID"),
            Column::left("User"),
            Column::left("Date"),
            Column::right("Amount"),
            Column::left("Status"),
        ],
        &cells,
        terminal_width(),
        "Transaction",
    )
}

fn user_table(rows: &[Value]) -> Vec<String> {
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                value_text(row, "id"),
                value_str(row, "name").to_string(),
                value_str(row, "email").to_string(),
                value_str(row, "role").to_string(),
                value_str(row, "status").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    render_table(
        &[
            Column::left("ID"),
            Column::left("Name"),
            Column::left("Email"),
            Column::left("Role"),
            Column::left("Status"),
        ],
        &cells,
        terminal_width(),
        "User",
    )
}

pub fn render_transaction_list(data: &Value) -> io::Result<String> {
    let rows = value_array(data, "transactions");
    let mut heading = format!(
        "Transactions: {} of {} (status: {}",
        rows.len(),
        value_u64(data, "total"),
        value_str(data, "status")
    );
    if let Some(term) = data.get("search").and_then(Value::as_str) {
        heading.push_str(&format!(", search: \"{term}\""));
    }
    heading.push(')');

    let mut lines = vec![heading, String::new()];
    if rows.is_empty() {
        lines.push("  No transactions match.".to_string());
    } else {
        lines.extend(transaction_table(rows));
    }
    Ok(lines.join("\n"))
}

/// Without an output path the CSV body itself is the output.
pub fn render_transaction_export(data: &Value) -> io::Result<String> {
    if let Some(csv) = data.get("csv").and_then(Value::as_str) {
        return Ok(csv.trim_end().to_string());
    }
    let output = data
        .get("output")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("transactions export output requires csv or output"))?;
    Ok(format!(
        "Exported {} transactions to {output}",
        value_u64(data, "rows")
    ))
}

pub fn render_transaction_remove(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!("Removed transaction {}.", value_str(data, "id")),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Remaining:", value_u64(data, "remaining").to_string()),
            ("Saved to:", value_str(data, "path").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_payment_add(data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .ok_or_else(|| io::Error::other("payment add output requires transaction"))?;

    let mut lines = vec![
        format!(
            "Recorded {} from {} ({}).",
            value_text(transaction, "amount"),
            value_str(transaction, "user"),
            value_str(transaction, "status")
        ),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("ID:", value_text(transaction, "id")),
            ("Date:", value_str(transaction, "date").to_string()),
            ("Transactions:", value_u64(data, "transaction_count").to_string()),
            ("Saved to:", value_str(data, "transactions_path").to_string()),
        ],
        2,
    ));

    if let Some(user) = data.get("created_user").filter(|user| !user.is_null()) {
        lines.push(String::new());
        lines.push(format!(
            "New user {} <{}> added to {}.",
            value_str(user, "name"),
            value_str(user, "email"),
            value_str(data, "users_path")
        ));
    }
    Ok(lines.join("\n"))
}

pub fn render_user_list(data: &Value) -> io::Result<String> {
    let rows = value_array(data, "users");
    let mut heading = format!("Users: {} of {}", rows.len(), value_u64(data, "total"));
    if let Some(term) = data.get("search").and_then(Value::as_str) {
        heading.push_str(&format!(" (search: \"{term}\")"));
    }

    let mut lines = vec![heading, String::new()];
    if rows.is_empty() {
        lines.push("  No users match.".to_string());
    } else {
        lines.extend(user_table(rows));
    }
    Ok(lines.join("\n"))
}

pub fn render_user_add(data: &Value) -> io::Result<String> {
    let user = data
        .get("user")
        .ok_or_else(|| io::Error::other("users add output requires user"))?;
    let mut lines = vec![
        format!(
            "Added {} <{}>.",
            value_str(user, "name"),
            value_str(user, "email")
        ),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("ID:", value_text(user, "id")),
            ("Role:", value_str(user, "role").to_string()),
            ("Status:", value_str(user, "status").to_string()),
            ("Users:", value_u64(data, "user_count").to_string()),
            ("Saved to:", value_str(data, "path").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_user_remove(data: &Value) -> io::Result<String> {
    let user = data
        .get("user")
        .ok_or_else(|| io::Error::other("users remove output requires user"))?;
    let mut lines = vec![format!("Removed user {}.", value_str(user, "name")), String::new()];
    lines.extend(key_value_rows(
        &[
            (
                "Their transactions removed:",
                value_u64(data, "transactions_removed").to_string(),
            ),
            ("Users left:", value_u64(data, "remaining_users").to_string()),
            (
                "Transactions left:",
                value_u64(data, "remaining_transactions").to_string(),
            ),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        render_payment_add, render_transaction_export, render_transaction_list,
        render_user_remove,
    };

    #[test]
    fn transaction_list_shows_filters_and_numeric_ids() {
        let rendered = render_transaction_list(&json!({
            "status": "Pending",
            "search": "rao",
            "total": 4,
            "transactions": [
                { "id": 1717000000000_u64, "user": "Asha Rao", "amount": "₹300", "status": "Pending", "date": "2026-10-02" }
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Transactions: 1 of 4 (status: Pending, search: \"rao\")"));
            assert!(text.contains("1717000000000"));
            assert!(text.contains("₹300"));
        }
    }

    #[test]
    fn empty_transaction_list_says_so() {
        let rendered = render_transaction_list(&json!({
            "status": "All",
            "search": null,
            "total": 0,
            "transactions": []
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Transactions: 0 of 0 (status: All)"));
            assert!(text.contains("No transactions match."));
        }
    }

    #[test]
    fn export_prints_csv_body_or_destination() {
        let inline = render_transaction_export(&json!({
            "rows": 1,
            "output": null,
            "csv": "ID,User,Date,Amount,Status\nt1,Asha,2026-10-01,₹10,Completed\n"
        }));
        assert!(matches!(inline, Ok(ref text) if text.ends_with("Completed")));

        let written = render_transaction_export(&json!({ "rows": 3, "output": "out.csv" }));
        assert!(matches!(written, Ok(ref text) if text == "Exported 3 transactions to out.csv"));

        assert!(render_transaction_export(&json!({ "rows": 0 })).is_err());
    }

    #[test]
    fn payment_add_mentions_auto_created_user() {
        let rendered = render_payment_add(&json!({
            "transaction": {
                "id": "txn_1", "user": "Asha Rao", "amount": "₹1500.00",
                "status": "Pending", "date": "2026-10-18"
            },
            "created_user": { "name": "Asha Rao", "email": "asha.rao@example.com" },
            "transaction_count": 5,
            "transactions_path": "/tmp/t.json",
            "users_path": "/tmp/u.json"
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Recorded ₹1500.00 from Asha Rao (Pending)."));
            assert!(text.contains("New user Asha Rao <asha.rao@example.com> added to /tmp/u.json."));
        }
    }

    #[test]
    fn user_remove_reports_cascade() {
        let rendered = render_user_remove(&json!({
            "user": { "name": "Vikram" },
            "transactions_removed": 2,
            "remaining_users": 1,
            "remaining_transactions": 3
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Removed user Vikram."));
            assert!(text.contains("Their transactions removed:  2"));
        }
    }
}
