//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use time::OffsetDateTime;

use saintpaulia_core::{CareEngine, Snapshot};

use crate::config::{Config, resolve_plants};

/// Load the plant snapshot named by `--plants`, the environment or config.
pub fn load_snapshot(plants: Option<PathBuf>, config: &Config) -> Result<Snapshot> {
    let path = resolve_plants(plants, config)?;
    Snapshot::load(&path)
        .with_context(|| format!("Failed to load plant collection from {}", path.display()))
}

/// Build the care engine from configured thresholds.
///
/// The engine is pinned to `--now`, or to the current time, so one command
/// evaluates every plant against the same instant.
pub fn build_engine(config: &Config, now: Option<OffsetDateTime>) -> CareEngine {
    CareEngine::new(config.thresholds()).at(now.unwrap_or_else(OffsetDateTime::now_utc))
}

/// Write output to file or stdout
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
