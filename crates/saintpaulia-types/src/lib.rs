//! Record types for the Saintpaulia Studio plant collection tracker.
//!
//! This crate holds the shapes the data store supplies to the care engine
//! (saintpaulia-core) and the command-line front end (saintpaulia-cli).
//!
//! # Features
//!
//! - [`Plant`] records with nullable last-care timestamps
//! - [`CareLog`] entries, one per logged care action
//! - [`CareType`] with its fixed declaration order
//! - Lenient timestamp parsing (RFC 3339 or bare dates)
//! - Error types for record parsing
//!
//! # Example
//!
//! ```
//! use saintpaulia_types::{CareType, Plant};
//!
//! let mut plant = Plant::new("p-1", "Optimara EverGrace");
//! plant.nickname = Some("Violet Queen".to_string());
//!
//! assert_eq!(plant.display_name(), "Violet Queen");
//! assert!(plant.last_care(CareType::Watering).is_none());
//! ```

pub mod error;
#[cfg(feature = "serde")]
pub mod nullable;
pub mod timestamp;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{CareLog, CareType, Plant, UNNAMED_PLANT};
