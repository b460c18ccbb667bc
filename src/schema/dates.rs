//! Date parsing and `Date32` conversion helpers.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Date formats tried in order when parsing a cell
    pub date_formats: Vec<String>,
    /// Date-time formats tried after the date formats; only the date is kept
    pub datetime_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%d/%m/%Y".to_string(), // UK: 15/01/2023
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
            ],
            datetime_formats: vec![
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%m/%d/%Y %H:%M".to_string(),
            ],
            enable_format_detection: true,
        }
    }
}

/// A single format used for every cell of a date column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDateFormat {
    Date(String),
    /// Date-time format; only the date is kept
    DateTime(String),
}

impl ColumnDateFormat {
    /// Parse `s` with exactly this format
    #[must_use]
    pub fn parse(&self, s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        match self {
            Self::Date(format) => NaiveDate::parse_from_str(s, format).ok(),
            Self::DateTime(format) => NaiveDateTime::parse_from_str(s, format)
                .ok()
                .map(|datetime| datetime.date()),
        }
    }
}

/// The first configured (or detected) format that parses `sample`
#[must_use]
pub fn infer_column_format(sample: &str, config: &DateFormatConfig) -> Option<ColumnDateFormat> {
    let sample = sample.trim();

    let mut candidates = config
        .date_formats
        .iter()
        .map(|f| ColumnDateFormat::Date(f.clone()))
        .chain(
            config
                .datetime_formats
                .iter()
                .map(|f| ColumnDateFormat::DateTime(f.clone())),
        )
        .chain(
            config
                .enable_format_detection
                .then(|| detect_date_format(sample))
                .flatten()
                .map(|f| ColumnDateFormat::Date(f.to_string())),
        );

    candidates.find(|format| format.parse(sample).is_some())
}

/// Parse a single date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    infer_column_format(s, config)?.parse(s)
}

/// Try to detect the date format based on string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    // YYYY-MM-DD with single-digit parts, e.g. 2024-1-5
    let dashed: Vec<&str> = s.split('-').collect();
    if dashed.len() == 3 && dashed[0].len() == 4 {
        return Some("%Y-%m-%d");
    }

    let slashed: Vec<&str> = s.split('/').collect();
    if slashed.len() == 3 {
        if slashed[0].len() == 4 {
            return Some("%Y/%m/%d");
        }
        if slashed[2].len() == 4 {
            // A first part above 12 can only be a day
            return match slashed[0].parse::<u8>() {
                Ok(first) if first > 12 => Some("%d/%m/%Y"),
                Ok(_) => Some("%m/%d/%Y"),
                Err(_) => None,
            };
        }
    }

    let dotted: Vec<&str> = s.split('.').collect();
    if dotted.len() == 3 && dotted[2].len() == 4 {
        return Some("%d.%m.%Y");
    }

    None
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Days since the Unix epoch, the `Date32` representation
#[must_use]
pub fn date32_from_naive(date: NaiveDate) -> i32 {
    i32::try_from((date - epoch()).num_days()).unwrap_or(i32::MAX)
}

/// Inverse of [`date32_from_naive`]
#[must_use]
pub fn naive_from_date32(days: i32) -> NaiveDate {
    epoch() + chrono::Duration::days(i64::from(days))
}

/// First day of the month containing `days`, as `Date32`
#[must_use]
pub fn month_start_date32(days: i32) -> i32 {
    let date = naive_from_date32(days);
    date.with_day(1).map_or(days, date32_from_naive)
}
