//! Command-line interface for the Saintpaulia Studio plant collection tracker.
//!
//! This crate provides the `saintpaulia` binary: care status, collection
//! statistics and the plant library for an African violet collection, read
//! from a JSON snapshot of the data store.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `status` | Care status of one plant |
//! | `stats` | Collection health and per-type breakdown |
//! | `attention` | Plants with overdue care |
//! | `list` | Search, filter, sort and page through the library |
//! | `activity` | Recent care logs |
//! | `config` | Manage settings |
//! | `completions` | Generate shell completions |
//!
//! # Output Formats
//!
//! - **Text** (default): Human-readable colored output
//! - **JSON**: Machine-readable JSON format (`--json` or `--format json`)
//! - **CSV**: Comma-separated values for spreadsheets
//!
//! # Configuration
//!
//! Settings live in `~/.config/saintpaulia/config.toml` (or platform
//! equivalent, overridden by `SAINTPAULIA_CONFIG`):
//!
//! - `plants`: Default snapshot file
//! - `no_color`: Disable colored output
//! - `default_view`: Library layout, `grid` or `list`
//! - `plants_per_page`: Library page size
//! - `[care]`: Days before `watering`, `fertilizing` and `grooming` are overdue
//!
//! # Environment Variables
//!
//! - `SAINTPAULIA_PLANTS`: Snapshot file (overridden by `--plants`)
//! - `SAINTPAULIA_CONFIG`: Config file location
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! Show what needs doing today:
//! ```bash
//! saintpaulia --plants violets.json attention
//! ```
//!
//! Collection statistics as of a given day:
//! ```bash
//! saintpaulia --plants violets.json --now 2024-06-15 stats --json
//! ```
//!
//! Water every four days:
//! ```bash
//! saintpaulia config set watering 4
//! ```

// Re-export core dependencies for convenience
pub use saintpaulia_core;
pub use saintpaulia_types;
