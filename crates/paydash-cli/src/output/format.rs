use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;
const CURRENCY_SYMBOL: char = '₹';

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

/// `₹` followed by the thousands-grouped value with two decimals.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = whole.chars().collect::<Vec<char>>();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{fraction}")
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{}  {value}", pad_right(label, label_width)))
        .collect()
}

/// Lays rows out as an aligned table, or as one labelled block per row when
/// the terminal is too narrow for every column.
pub fn render_table(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let natural = natural_widths(columns, rows);
    let needed = INDENT
        + natural.iter().sum::<usize>()
        + COLUMN_GAP * columns.len().saturating_sub(1);
    let minimum = INDENT + (MIN_COLUMN_WIDTH + COLUMN_GAP) * columns.len();
    if max_width < minimum {
        return render_blocks(columns, rows, block_label);
    }
    if needed > max_width {
        let Some(widths) = shrink_widths(&natural, columns, max_width) else {
            return render_blocks(columns, rows, block_label);
        };
        return render_rows(columns, rows, &widths);
    }

    render_rows(columns, rows, &natural)
}

pub fn value_str<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn value_f64(data: &Value, key: &str) -> f64 {
    data.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn value_u64(data: &Value, key: &str) -> u64 {
    data.get(key).and_then(Value::as_u64).unwrap_or(0)
}

pub fn value_array<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Ids may be JSON numbers or strings.
pub fn value_text(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad_right(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(value));
    format!("{value}{}", " ".repeat(padding))
}

fn pad_left(value: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(value));
    format!("{}{value}", " ".repeat(padding))
}

fn natural_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }

    widths
}

/// Takes width from the widest column first until the row fits.
fn shrink_widths(natural: &[usize], columns: &[Column<'_>], max_width: usize) -> Option<Vec<usize>> {
    let budget = max_width
        .saturating_sub(INDENT)
        .saturating_sub(COLUMN_GAP * columns.len().saturating_sub(1));
    let floors = columns
        .iter()
        .map(|column| cmp::max(display_width(column.name), MIN_COLUMN_WIDTH))
        .collect::<Vec<usize>>();
    if floors.iter().sum::<usize>() > budget {
        return None;
    }

    let mut widths = natural.to_vec();
    let mut total = widths.iter().sum::<usize>();
    while total > budget {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > floors[*index])
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index)?;
        widths[widest] -= 1;
        total -= 1;
    }
    Some(widths)
}

fn render_rows(columns: &[Column<'_>], rows: &[Vec<String>], widths: &[usize]) -> Vec<String> {
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, widths)];

    for row in rows {
        let wrapped = widths
            .iter()
            .enumerate()
            .map(|(index, width)| wrap_cell(row.get(index).map(String::as_str).unwrap_or(""), *width))
            .collect::<Vec<Vec<String>>>();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line in 0..height {
            let cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_row(columns, &cells, widths));
        }
    }

    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => pad_right(value, width),
                Align::Right => pad_left(value, width),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join("  ").trim_end())
}

fn wrap_cell(value: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(value) <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in value.split_whitespace() {
        let needed = if current.is_empty() {
            display_width(word)
        } else {
            display_width(&current) + 1 + display_width(word)
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let mut chunks = split_chars(word, width);
        if let Some(last) = chunks.pop() {
            lines.extend(chunks);
            current = last;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_chars(token: &str, width: usize) -> Vec<String> {
    token
        .chars()
        .collect::<Vec<char>>()
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(|label| display_width(label)).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).map(String::as_str).unwrap_or("");
            output.push(format!("    {}  {value}", pad_right(label, label_width)));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::{Column, format_currency, key_value_rows, render_table, split_chars, wrap_cell};

    #[test]
    fn currency_groups_thousands_with_two_decimals() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(999.5), "₹999.50");
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_currency(-20.0), "-₹20.00");
        assert_eq!(format_currency(-0.001), "₹0.00");
    }

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Total revenue:", "₹1.00".to_string()),
                ("Active users:", "3".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Total revenue:  ₹1.00");
        assert_eq!(rows[1], "  Active users:   3");
    }

    #[test]
    fn table_aligns_multibyte_amounts_by_character() {
        let columns = [Column::left("User"), Column::right("Amount")];
        let rows = vec![
            vec!["Asha".to_string(), "₹1,200.00".to_string()],
            vec!["Vikram".to_string(), "₹5.00".to_string()],
        ];

        let rendered = render_table(&columns, &rows, 80, "Row");
        assert_eq!(rendered[0], "  User       Amount");
        assert_eq!(rendered[1], "  Asha    ₹1,200.00");
        assert_eq!(rendered[2], "  Vikram      ₹5.00");
    }

    #[test]
    fn long_cells_wrap_instead_of_truncating() {
        let columns = [Column::left("Address"), Column::right("Amount")];
        let rows = vec![vec![
            "12 MG Road Bengaluru Karnataka 560001 India".to_string(),
            "₹1.00".to_string(),
        ]];

        let rendered = render_table(&columns, &rows, 30, "Row");
        assert!(rendered.len() > 2);
        assert!(rendered.iter().any(|line| line.contains("India")));
        assert!(rendered.iter().any(|line| line.contains("₹1.00")));
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("ID"),
            Column::left("User"),
            Column::right("Amount"),
            Column::left("Status"),
            Column::left("Date"),
        ];
        let rows = vec![vec![
            "t1".to_string(),
            "Asha".to_string(),
            "₹5.00".to_string(),
            "Pending".to_string(),
            "2026-10-18".to_string(),
        ]];

        let rendered = render_table(&columns, &rows, 40, "Payment");
        assert_eq!(rendered[0], "  Payment 1:");
        assert!(rendered[1].contains("ID:"));
        assert!(rendered[3].contains("₹5.00"));
    }

    #[test]
    fn wrapping_splits_unicode_tokens_safely() {
        assert_eq!(split_chars("₹₹₹₹", 3), vec!["₹₹₹".to_string(), "₹".to_string()]);
        assert_eq!(
            wrap_cell("aaaa bbbbbbb", 5),
            vec!["aaaa".to_string(), "bbbbb".to_string(), "bb".to_string()]
        );
    }
}
