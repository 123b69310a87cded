//! Error types for saintpaulia-core.
//!
//! The care engine itself never fails: absent timestamps mean "never cared
//! for" and thresholds are taken as given. Errors arise only at the edges,
//! when loading a snapshot of the collection or validating user settings.

use std::path::PathBuf;

use saintpaulia_types::CareType;
use thiserror::Error;

/// Result type for saintpaulia-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in saintpaulia-core.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read a snapshot file.
    #[error("Failed to read snapshot {path}: {source}")]
    ReadSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot content is not valid JSON or does not match the record shapes.
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot JSON is neither an array of plants nor an object holding one.
    #[error("Snapshot must be a JSON array of plants or an object with a \"plants\" array")]
    SnapshotShape,

    /// Two plants in a snapshot share an id.
    #[error("Duplicate plant id in snapshot: {0}")]
    DuplicatePlant(String),

    /// A care threshold is zero.
    #[error("Invalid {care_type} threshold: {days} (must be at least 1 day)")]
    InvalidThreshold { care_type: CareType, days: u32 },

    /// A library filter or sort key was not recognised.
    #[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}
