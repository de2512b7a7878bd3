use chrono::{Datelike, Month, NaiveDate};

/// Parses a record date: `YYYY-MM-DD`, or an ISO-8601 date-time whose first
/// ten characters are such a date.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() < 10 || !looks_like_iso_date(&trimmed.as_bytes()[..10]) {
        return None;
    }
    if trimmed.len() > 10 && !matches!(trimmed.as_bytes()[10], b'T' | b' ') {
        return None;
    }
    NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d").ok()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn month_name(date: &NaiveDate) -> &'static str {
    month_name_at(date.month0() as usize)
}

/// English month name for a zero-based month index; out of range is empty.
pub(crate) fn month_name_at(month0: usize) -> &'static str {
    u8::try_from(month0 + 1)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(|month| month.name())
        .unwrap_or_default()
}

/// The calendar month before `date`, as `(year, month)` with `month` in 1..=12.
pub(crate) fn previous_month(date: &NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        return (date.year() - 1, 12);
    }
    (date.year(), date.month() - 1)
}

pub(crate) fn weekday_short(date: &NaiveDate) -> String {
    date.weekday().to_string()
}

pub(crate) fn looks_like_iso_date(bytes: &[u8]) -> bool {
    if bytes.len() != 10 {
        return false;
    }
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
