//! Unix timestamp rendering for plot coordinates.

use chrono::DateTime;

/// Format used by pgfplots `date coordinates in=x`.
pub const PLOT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render seconds since the epoch as a UTC `YYYY-MM-DD HH:MM` string.
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn format_timestamp(ts: i64) -> Option<String> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.format(PLOT_DATE_FORMAT).to_string())
}
