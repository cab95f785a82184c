//! Human-readable renderings of file attributes.
//!
//! Every helper here is total: it produces a displayable string for any input.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::models::{file_extension, FileCategory};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a byte count with the largest unit that keeps the unrounded
/// magnitude below 1024.
///
/// Values are rounded to two decimals with trailing zeros dropped, so
/// `1024` renders as `"1 KB"` and `1536` as `"1.5 KB"`. The unit is picked
/// before rounding, so a value just under the next unit can render as
/// `"1024 KB"`. Anything past 1024 GB stays in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimal(size), SIZE_UNITS[unit])
}

/// Byte count expressed in MB without a unit suffix (`5242880` -> `"5"`).
pub fn format_megabytes(bytes: u64) -> String {
    trim_decimal(bytes as f64 / BYTES_PER_MB)
}

/// Category of a filename, `Unknown` when there is no filename at all.
pub fn category_of(filename: Option<&str>) -> FileCategory {
    match filename {
        Some(name) => FileCategory::from_extension(&file_extension(name)),
        None => FileCategory::Unknown,
    }
}

/// Declared content type, or "Unknown" when the picker reported none.
pub fn display_content_type(content_type: Option<&str>) -> &str {
    match content_type {
        Some(ct) if !ct.trim().is_empty() => ct,
        _ => "Unknown",
    }
}

/// Render a server timestamp for display.
///
/// RFC 3339 timestamps are converted to local time. Naive ISO-8601 timestamps
/// carry no zone and are shown as given. Anything unparseable is returned verbatim.
pub fn display_upload_time(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY_TIME_FORMAT).to_string();
    }
    raw.to_string()
}

fn trim_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
