//! Error types for record parsing in saintpaulia-types.

use thiserror::Error;

/// Errors that can occur when parsing plant and care-log records.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The care type key is not one of `watering`, `fertilizing`, `grooming`.
    #[error("Unknown care type: '{0}' (expected watering, fertilizing or grooming)")]
    UnknownCareType(String),

    /// The timestamp is neither an RFC 3339 instant nor a `YYYY-MM-DD` date.
    #[error("Invalid timestamp: '{0}' (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidTimestamp(String),
}

/// Result type alias using saintpaulia-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
