//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use saintpaulia_core::{LibraryFilter, LibrarySort};
use saintpaulia_types::timestamp::parse_timestamp;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables and full formatting (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Layout of the plant library
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One table row per plant
    #[default]
    Grid,
    /// One line per plant
    List,
}

impl ViewMode {
    pub fn key(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

impl OutputArgs {
    /// Resolve the format: `--json` overrides `--format`
    pub fn resolve(&self, json: bool) -> OutputFormat {
        if json { OutputFormat::Json } else { self.format }
    }
}

#[derive(Parser)]
#[command(name = "saintpaulia")]
#[command(author, version, about = "Care tracker for an African violet collection", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "SAINTPAULIA_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Plant collection snapshot (JSON), or use SAINTPAULIA_PLANTS env var
    #[arg(short, long, global = true, env = "SAINTPAULIA_PLANTS")]
    pub plants: Option<PathBuf>,

    /// Evaluate care as of this instant (RFC3339 or YYYY-MM-DD) instead of now
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<OffsetDateTime>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Care status of one plant
    Status {
        /// Plant id or name (nickname or cultivar, case-insensitive)
        plant: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Collection-wide care statistics
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Plants with overdue care
    Attention {
        #[command(flatten)]
        output: OutputArgs,

        /// Show at most this many plants (0 for all)
        #[arg(short = 'n', long, default_value = "0")]
        limit: usize,
    },

    /// Browse the plant library
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        output: OutputArgs,

        /// Match nickname or cultivar name (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Which plants to show (all, needs-care, blooming)
        #[arg(long, default_value = "all")]
        filter: LibraryFilter,

        /// Ordering (updated, name, acquired, care)
        #[arg(long, default_value = "updated")]
        sort: LibrarySort,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Plants per page (defaults to the plants-per-page setting)
        #[arg(long)]
        per_page: Option<usize>,

        /// Layout (defaults to the default-view setting)
        #[arg(long, value_enum)]
        view: Option<ViewMode>,
    },

    /// Recent care activity
    Activity {
        #[command(flatten)]
        output: OutputArgs,

        /// Only show care logged for this plant (id or name)
        #[arg(long)]
        plant: Option<String>,

        /// Number of entries to show (defaults to 10, or 50 for one plant)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Parse the `--now` instant
fn parse_now(s: &str) -> Result<OffsetDateTime, String> {
    parse_timestamp(s).map_err(|e| e.to_string())
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Default plant snapshot file
    Plants,
    /// Disable colored output
    NoColor,
    /// Library layout (grid or list)
    DefaultView,
    /// Plants per library page
    PlantsPerPage,
    /// Days between waterings
    Watering,
    /// Days between feedings
    Fertilizing,
    /// Days between groomings
    Grooming,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Restore a value to its default, or every value when no key is given
    Reset {
        /// Configuration key to reset
        #[arg(value_enum)]
        key: Option<ConfigKey>,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_now_accepts_dates_and_instants() {
        assert!(parse_now("2024-06-15").is_ok());
        assert!(parse_now("2024-06-15T12:00:00Z").is_ok());
        assert!(parse_now("tomorrow").is_err());
    }

    #[test]
    fn test_json_flag_overrides_format() {
        let args = OutputArgs {
            format: OutputFormat::Csv,
            no_header: false,
        };
        assert_eq!(args.resolve(true), OutputFormat::Json);
        assert_eq!(args.resolve(false), OutputFormat::Csv);
    }

    #[test]
    fn test_list_parses_filter_and_sort() {
        let cli = Cli::try_parse_from([
            "saintpaulia",
            "list",
            "--filter",
            "needs-care",
            "--sort",
            "name",
        ])
        .unwrap();
        match cli.command {
            Commands::List { filter, sort, .. } => {
                assert_eq!(filter, LibraryFilter::NeedsCare);
                assert_eq!(sort, LibrarySort::Name);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["saintpaulia", "list", "--filter", "wilted"]).is_err());
    }
}
