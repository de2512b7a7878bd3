use std::io;

use serde_json::Value;

use super::format::{
    Column, format_currency, key_value_rows, render_table, terminal_width, value_array, value_f64,
    value_str, value_u64,
};
use super::records_text::transaction_table;

pub fn render_dash(data: &Value) -> io::Result<String> {
    let stats = require(data, "stats", "dash")?;
    let mut lines = vec![
        format!("Dashboard as of {}", value_str(data, "reference_date")),
        String::new(),
    ];
    lines.extend(stats_lines(stats));
    lines.push(String::new());
    lines.extend(series_section("Revenue by collection date:", value_array(data, "revenue_series")));
    lines.push(String::new());
    lines.extend(distribution_section(value_array(data, "status_distribution")));
    lines.push(String::new());

    let transactions = value_array(data, "transactions");
    lines.push(format!("Transactions ({}):", transactions.len()));
    if transactions.is_empty() {
        lines.push("  No transactions yet.".to_string());
    } else {
        lines.extend(transaction_table(transactions));
    }

    Ok(lines.join("\n"))
}

pub fn render_stats(data: &Value) -> io::Result<String> {
    let stats = require(data, "stats", "stats")?;
    let mut lines = vec![
        format!("Stats as of {}", value_str(data, "reference_date")),
        String::new(),
    ];
    lines.extend(stats_lines(stats));
    Ok(lines.join("\n"))
}

pub fn render_report(data: &Value) -> io::Result<String> {
    let stats = require(data, "stats", "report")?;
    let mut lines = vec![
        format!(
            "Report for {} (as of {})",
            value_str(data, "reference_month"),
            value_str(data, "reference_date")
        ),
        String::new(),
    ];
    lines.extend(stats_lines(stats));
    lines.push(String::new());
    lines.extend(series_section("Revenue by collection date:", value_array(data, "revenue_series")));
    lines.push(String::new());

    let buckets = value_array(data, "monthly_breakdown");
    lines.push(format!(
        "Monthly collections ({} of {} months):",
        buckets.len(),
        value_u64(data, "months_total")
    ));
    let rows = buckets
        .iter()
        .map(|bucket| {
            vec![
                value_str(bucket, "month").to_string(),
                format_currency(value_f64(bucket, "collected")),
                value_str(bucket, "trend").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(
        &[
            Column::left("Month"),
            Column::right("Collected"),
            Column::right("Trend"),
        ],
        &rows,
        terminal_width(),
        "Month",
    ));

    Ok(lines.join("\n"))
}

pub fn render_charts(data: &Value) -> io::Result<String> {
    let mut lines = series_section("Revenue by collection date:", value_array(data, "revenue_series"));
    lines.push(String::new());
    lines.extend(series_section("Weekly collections:", value_array(data, "weekly_collections")));
    lines.push(String::new());
    lines.extend(distribution_section(value_array(data, "status_distribution")));
    Ok(lines.join("\n"))
}

fn stats_lines(stats: &Value) -> Vec<String> {
    let pending = value_u64(stats, "pending_count");
    let users = value_u64(stats, "active_user_count");
    let mut lines = vec!["Stats:".to_string()];
    lines.extend(key_value_rows(
        &[
            (
                "Total revenue:",
                with_trend(value_f64(stats, "total_revenue"), stats.get("revenue_trend")),
            ),
            (
                "Active principal:",
                with_trend(value_f64(stats, "active_principal"), stats.get("principal_trend")),
            ),
            (
                "Projected interest:",
                with_trend(value_f64(stats, "projected_interest"), stats.get("interest_trend")),
            ),
            ("Pending payments:", pending.to_string()),
            ("Active users:", users.to_string()),
        ],
        2,
    ));
    lines
}

fn with_trend(amount: f64, trend: Option<&Value>) -> String {
    let formatted = format_currency(amount);
    let Some(trend) = trend else {
        return formatted;
    };
    format!(
        "{formatted}  {} ({})",
        value_str(trend, "value"),
        value_str(trend, "direction")
    )
}

fn series_section(title: &str, points: &[Value]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if points.is_empty() {
        lines.push("  No completed payments yet.".to_string());
        return lines;
    }

    let rows = points
        .iter()
        .map(|point| {
            vec![
                value_str(point, "date").to_string(),
                value_str(point, "label").to_string(),
                format_currency(value_f64(point, "value")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(
        &[
            Column::left("Date"),
            Column::left("Day"),
            Column::right("Collected"),
        ],
        &rows,
        terminal_width(),
        "Point",
    ));
    lines
}

fn distribution_section(slices: &[Value]) -> Vec<String> {
    let mut lines = vec!["Payment status:".to_string()];
    if slices.is_empty() {
        lines.push("  No transactions yet.".to_string());
        return lines;
    }

    let rows = slices
        .iter()
        .map(|slice| {
            vec![
                value_str(slice, "name").to_string(),
                value_u64(slice, "value").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(
        &[Column::left("Status"), Column::right("Count")],
        &rows,
        terminal_width(),
        "Status",
    ));
    lines
}

fn require<'a>(data: &'a Value, key: &str, command: &str) -> io::Result<&'a Value> {
    data.get(key)
        .ok_or_else(|| io::Error::other(format!("{command} output requires `{key}`")))
}
