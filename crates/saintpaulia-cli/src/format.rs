//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use owo_colors::OwoColorize;
use time::OffsetDateTime;
use time::macros::format_description;

use saintpaulia_core::{CareLevel, CareStatus};
use saintpaulia_types::timestamp::format_timestamp;

use crate::cli::StyleMode;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            no_header: false,
            compact: false,
            style: StyleMode::Rich,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        let effective_no_color = no_color || style == StyleMode::Plain;
        Self {
            no_color: effective_no_color,
            no_header: false,
            compact: false,
            style,
        }
    }

    /// Check if plain styling is enabled (no decorations).
    pub fn is_plain(&self) -> bool {
        self.style == StyleMode::Plain
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
/// Double quotes are escaped by doubling them.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a care level as a bracketed, colored label
#[must_use]
pub fn format_level(level: CareLevel, no_color: bool) -> String {
    let label = match level {
        CareLevel::Good => "GOOD",
        CareLevel::Soon => "SOON",
        CareLevel::Overdue => "OVERDUE",
    };

    if no_color {
        format!("[{}]", label)
    } else {
        match level {
            CareLevel::Good => format!("[{}]", label.green()),
            CareLevel::Soon => format!("[{}]", label.yellow()),
            CareLevel::Overdue => format!("[{}]", label.red()),
        }
    }
}

/// Days since last care in words
#[must_use]
pub fn format_days_ago(days: Option<i64>) -> String {
    match days {
        None => "Never".to_string(),
        Some(0) => "Today".to_string(),
        Some(1) => "Yesterday".to_string(),
        Some(-1) => "Tomorrow".to_string(),
        Some(d) if d < 0 => format!("In {} days", -d),
        Some(d) => format!("{} days ago", d),
    }
}

/// Short description of a care status, e.g. "3 days ago (due soon)"
#[must_use]
pub fn describe_status(status: &CareStatus) -> String {
    let age = format_days_ago(status.days);
    match status.status {
        CareLevel::Good => age,
        CareLevel::Soon => format!("{} (due soon)", age),
        CareLevel::Overdue => format!("{} (overdue)", age),
    }
}

/// Age of a care log entry relative to `now`
#[must_use]
pub fn format_log_age(at: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = now - at;
    let hours = elapsed.whole_hours();
    let days = elapsed.whole_days();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        at.format(format_description!("[month repr:short] [day padding:none]"))
            .unwrap_or_else(|_| format_date(Some(at)))
    }
}

/// Calendar date (YYYY-MM-DD), or "-" when absent
#[must_use]
pub fn format_date(at: Option<OffsetDateTime>) -> String {
    at.and_then(|at| at.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| "-".to_string())
}

/// RFC 3339 timestamp for CSV and JSON output, empty when absent
#[must_use]
pub fn format_instant(at: Option<OffsetDateTime>) -> String {
    at.and_then(|at| format_timestamp(at).ok())
        .unwrap_or_default()
}

/// Display label for a stored fertilizer key
#[must_use]
pub fn fertilizer_label(key: &str) -> &str {
    match key {
        "balanced" => "Balanced (20-20-20)",
        "bloom" => "Bloom Booster",
        "foliage" => "Foliage/Growth",
        "organic" => "Organic",
        "slow_release" => "Slow Release",
        "other" => "Other",
        _ => key,
    }
}
