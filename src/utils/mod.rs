//! Logging and formatting helpers shared across the crate

use std::path::Path;
use std::time::Duration;

use num_format::{Locale, ToFormattedString};

/// Log an operation start with consistent format
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} rows from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} rows from {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Format an integer with thousands separators, e.g. `12,345`
#[must_use]
pub fn format_count(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Format an amount as whole dollars, e.g. `$1,234`
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    if rounded < 0 {
        format!("-${}", format_count(-rounded))
    } else {
        format!("${}", format_count(rounded))
    }
}
