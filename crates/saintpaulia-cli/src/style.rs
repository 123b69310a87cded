//! Visual styling utilities for the CLI.
//!
//! Colors for care levels and health bands, the health bar, message
//! prefixes and table styles.

use owo_colors::OwoColorize;

use saintpaulia_core::{CareLevel, HealthBand};

use crate::cli::StyleMode;

// ============================================================================
// Colored Value Formatting
// ============================================================================

/// Color a string by care level.
pub fn paint_level(text: &str, level: CareLevel, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }

    match level {
        CareLevel::Good => format!("{}", text.green()),
        CareLevel::Soon => format!("{}", text.yellow()),
        CareLevel::Overdue => format!("{}", text.red()),
    }
}

/// Format a health percentage with appropriate color.
pub fn format_health_colored(percentage: u8, no_color: bool) -> String {
    if no_color {
        return format!("{}%", percentage);
    }

    match HealthBand::from_percentage(percentage) {
        HealthBand::Thriving => format!("{}%", percentage.green()),
        HealthBand::Fair => format!("{}%", percentage.yellow()),
        HealthBand::Struggling => format!("{}%", percentage.red()),
    }
}

/// Format a health percentage as a ten-cell bar.
pub fn format_health_bar(percentage: u8, no_color: bool) -> String {
    let filled = (usize::from(percentage.min(100)) + 5) / 10;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));

    if no_color {
        return bar;
    }
    match HealthBand::from_percentage(percentage) {
        HealthBand::Thriving => format!("{}", bar.green()),
        HealthBand::Fair => format!("{}", bar.yellow()),
        HealthBand::Struggling => format!("{}", bar.red()),
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format an info message.
pub fn format_info(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[--] {}", message)
    } else {
        format!("{} {}", "[--]".cyan(), message)
    }
}

// ============================================================================
// Section Headers
// ============================================================================

/// Format a title header.
pub fn format_title(title: &str, no_color: bool) -> String {
    let underline = "━".repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, underline)
    } else {
        format!("{}\n{}", title.bold(), underline.dimmed())
    }
}

/// Format a plant name for headings and rows.
pub fn format_plant_name(name: &str, no_color: bool) -> String {
    if no_color {
        name.to_string()
    } else {
        format!("{}", name.cyan())
    }
}

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply table style based on StyleMode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Minimal => {
            table.with(Style::psql());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
