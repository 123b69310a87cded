//! Serde helper for data-store columns that may hold `null`.
//!
//! `#[serde(default)]` covers a missing key but not an explicit `null`.
//! Fields read through [`or_default`] treat both the same way.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(default, deserialize_with = "saintpaulia_types::nullable::or_default")]
//!     flag: bool,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"flag": null}"#).unwrap();
//! assert!(!row.flag);
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, reading `null` as `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
