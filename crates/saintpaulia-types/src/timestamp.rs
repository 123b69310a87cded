//! Timestamp parsing and formatting for care records.
//!
//! The data store hands out timestamps in two shapes: full RFC 3339 instants
//! for care actions (`2024-03-01T09:30:00.000Z`) and bare calendar dates for
//! fields entered through a date picker (`2024-03-01`). Both parse to an
//! [`OffsetDateTime`]; bare dates are taken as UTC midnight.
//!
//! # Example
//!
//! ```
//! use saintpaulia_types::timestamp::parse_timestamp;
//!
//! let instant = parse_timestamp("2024-03-01T09:30:00Z").unwrap();
//! let date = parse_timestamp("2024-03-01").unwrap();
//! assert_eq!(instant.date(), date.date());
//! assert!(parse_timestamp("yesterday").is_err());
//! ```

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::{ParseError, ParseResult};

/// Parse an RFC 3339 instant or a `YYYY-MM-DD` date (UTC midnight).
pub fn parse_timestamp(s: &str) -> ParseResult<OffsetDateTime> {
    let s = s.trim();

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(dt);
    }

    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| ParseError::InvalidTimestamp(s.to_string()))
}

/// Format a timestamp as RFC 3339.
pub fn format_timestamp(dt: OffsetDateTime) -> Result<String, time::error::Format> {
    dt.format(&Rfc3339)
}

/// Serde adapter accepting either timestamp shape, serializing as RFC 3339.
///
/// Use with `#[serde(with = "saintpaulia_types::timestamp::lenient")]`.
#[cfg(feature = "serde")]
pub mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = super::format_timestamp(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    /// Nullable variant. `null`, a missing field and `""` all read as `None`.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::OffsetDateTime;

        pub fn serialize<S: Serializer>(
            value: &Option<OffsetDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => {
                    let formatted =
                        super::super::format_timestamp(*dt).map_err(serde::ser::Error::custom)?;
                    serializer.serialize_some(&formatted)
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<OffsetDateTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(s) => super::super::parse_timestamp(s)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}
