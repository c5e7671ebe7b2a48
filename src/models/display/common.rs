//! Common display utilities and helpers

use chrono::{DateTime, Utc};

use crate::client::models::Status;

/// Placeholder for values the API did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder used in key/value views, where a blank status usually means the
/// caller lacks admin rights or the plan lacks the feature
pub const NOT_AVAILABLE_LONG: &str = "disabled/not available";

/// Status text, or [`NOT_AVAILABLE`] when the API left it empty.
pub fn status_or_na(status: &Status) -> String {
    status.state().label_or(NOT_AVAILABLE).to_string()
}

/// Optional text, or `--`.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`; other input is
/// returned unchanged.
pub fn format_datetime(timestamp: &str) -> String {
    match timestamp.parse::<DateTime<Utc>>() {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) if timestamp.is_empty() => "--".to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}
