//! Common display utilities and helpers

/// Placeholder for missing values
pub const DASH: &str = "--";

/// Truncate string to at most `max_len` characters, with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// The value, or `--` when absent or blank
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DASH)
        .to_string()
}
