use chrono::{DateTime, NaiveDate, Utc};

/// Format a date as YYYY-MM-DD.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Timestamp fragment used in report file names.
pub fn report_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d_%H-%M").to_string()
}
