//! Care thresholds: how many days each kind of care may wait.
//!
//! A plant becomes *overdue* for a care type once the days since it was last
//! logged reach the threshold, and *soon* once they reach 80% of it.
//!
//! # Example
//!
//! ```
//! use saintpaulia_core::{CareThresholds, PartialCareThresholds};
//! use saintpaulia_types::CareType;
//!
//! // Defaults: water weekly, feed fortnightly, groom weekly
//! let thresholds = CareThresholds::default();
//! assert_eq!(thresholds.get(CareType::Fertilizing), 14);
//!
//! // Partially specified tables fall back to the defaults per key
//! let partial = PartialCareThresholds {
//!     watering: Some(5),
//!     ..Default::default()
//! };
//! let resolved = partial.resolve();
//! assert_eq!(resolved.get(CareType::Watering), 5);
//! assert_eq!(resolved.get(CareType::Grooming), 7);
//! ```

use serde::{Deserialize, Serialize};

use saintpaulia_types::CareType;

use crate::error::{Error, Result};

/// Default days between waterings.
pub const DEFAULT_WATERING_DAYS: u32 = 7;
/// Default days between feedings.
pub const DEFAULT_FERTILIZING_DAYS: u32 = 14;
/// Default days between groomings.
pub const DEFAULT_GROOMING_DAYS: u32 = 7;

/// Days after which each care type is overdue.
///
/// Every value is expected to be at least 1. The engine does not check this;
/// settings layers should call [`CareThresholds::validate`] before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CareThresholds {
    /// Days before watering is overdue.
    pub watering: u32,
    /// Days before fertilizing is overdue.
    pub fertilizing: u32,
    /// Days before grooming is overdue.
    pub grooming: u32,
}

impl Default for CareThresholds {
    fn default() -> Self {
        Self {
            watering: DEFAULT_WATERING_DAYS,
            fertilizing: DEFAULT_FERTILIZING_DAYS,
            grooming: DEFAULT_GROOMING_DAYS,
        }
    }
}

impl CareThresholds {
    /// Create a threshold table.
    pub fn new(watering: u32, fertilizing: u32, grooming: u32) -> Self {
        Self {
            watering,
            fertilizing,
            grooming,
        }
    }

    /// Threshold in days for a care type.
    #[must_use]
    pub fn get(&self, care_type: CareType) -> u32 {
        match care_type {
            CareType::Watering => self.watering,
            CareType::Fertilizing => self.fertilizing,
            CareType::Grooming => self.grooming,
        }
    }

    /// Set the threshold for a care type.
    pub fn set(&mut self, care_type: CareType, days: u32) {
        match care_type {
            CareType::Watering => self.watering = days,
            CareType::Fertilizing => self.fertilizing = days,
            CareType::Grooming => self.grooming = days,
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, care_type: CareType, days: u32) -> Self {
        self.set(care_type, days);
        self
    }

    /// Check that every threshold is at least one day.
    ///
    /// Reports the first offending care type in declaration order.
    pub fn validate(&self) -> Result<()> {
        for care_type in CareType::ALL {
            let days = self.get(care_type);
            if days == 0 {
                return Err(Error::InvalidThreshold { care_type, days });
            }
        }
        Ok(())
    }
}

/// A threshold table where any key may be missing.
///
/// Missing keys resolve to the defaults, one key at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCareThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watering: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grooming: Option<u32>,
}

impl PartialCareThresholds {
    /// Fill in missing keys from [`CareThresholds::default`].
    #[must_use]
    pub fn resolve(&self) -> CareThresholds {
        let defaults = CareThresholds::default();
        CareThresholds {
            watering: self.watering.unwrap_or(defaults.watering),
            fertilizing: self.fertilizing.unwrap_or(defaults.fertilizing),
            grooming: self.grooming.unwrap_or(defaults.grooming),
        }
    }
}

impl From<PartialCareThresholds> for CareThresholds {
    fn from(partial: PartialCareThresholds) -> Self {
        partial.resolve()
    }
}

impl From<CareThresholds> for PartialCareThresholds {
    fn from(full: CareThresholds) -> Self {
        Self {
            watering: Some(full.watering),
            fertilizing: Some(full.fertilizing),
            grooming: Some(full.grooming),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = CareThresholds::default();
        assert_eq!(t.get(CareType::Watering), 7);
        assert_eq!(t.get(CareType::Fertilizing), 14);
        assert_eq!(t.get(CareType::Grooming), 7);
    }

    #[test]
    fn test_set_and_with() {
        let mut t = CareThresholds::default();
        t.set(CareType::Grooming, 10);
        assert_eq!(t.grooming, 10);

        let t = t.with(CareType::Watering, 4);
        assert_eq!(t, CareThresholds::new(4, 14, 10));
    }

    #[test]
    fn test_partial_falls_back_per_key() {
        let partial = PartialCareThresholds {
            fertilizing: Some(21),
            ..Default::default()
        };
        assert_eq!(partial.resolve(), CareThresholds::new(7, 21, 7));
    }

    #[test]
    fn test_empty_partial_is_default() {
        let resolved: CareThresholds = PartialCareThresholds::default().into();
        assert_eq!(resolved, CareThresholds::default());
    }

    #[test]
    fn test_full_to_partial_round_trip() {
        let full = CareThresholds::new(3, 9, 5);
        let partial = PartialCareThresholds::from(full);
        assert_eq!(partial.resolve(), full);
    }

    #[test]
    fn test_partial_deserializes_missing_keys() {
        let partial: PartialCareThresholds = serde_json::from_str(r#"{"grooming": 12}"#).unwrap();
        assert_eq!(partial.watering, None);
        assert_eq!(partial.grooming, Some(12));
        assert_eq!(partial.resolve(), CareThresholds::new(7, 14, 12));
    }

    #[test]
    fn test_validate_accepts_positive() {
        assert!(CareThresholds::default().validate().is_ok());
        assert!(CareThresholds::new(1, 1, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_zero() {
        let err = CareThresholds::new(7, 0, 0).validate().unwrap_err();
        match err {
            Error::InvalidThreshold { care_type, days } => {
                assert_eq!(care_type, CareType::Fertilizing);
                assert_eq!(days, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
