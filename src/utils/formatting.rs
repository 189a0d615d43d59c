//! Formatting utilities used for CLI and export outputs.

use ansi_term::Style;

/// Render a minute count as `"{hours}h {minutes}m"` (no zero padding).
/// Negative values render as `"0h 0m"`.
pub fn format_hours_label(total_minutes: i64) -> String {
    if total_minutes < 0 {
        return "0h 0m".to_string();
    }
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

/// Minutes as decimal hours rounded to two places (8h 30m → 8.5).
pub fn decimal_hours(total_minutes: i64) -> f64 {
    let hours = total_minutes.max(0) as f64 / 60.0;
    (hours * 100.0).round() / 100.0
}

/// Signed balance, e.g. `+01h 15m` or `-00h 30m`.
pub fn signed_balance(mins: i64) -> String {
    let abs_m = mins.abs();
    let sign = if mins > 0 {
        "+"
    } else if mins < 0 {
        "-"
    } else {
        ""
    };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}

pub fn bold(s: &str) -> String {
    Style::new().bold().paint(s).to_string()
}

/// Shorten `s` to `max` visible characters, ending with `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
