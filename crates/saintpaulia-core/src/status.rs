//! Per-plant care status classification.
//!
//! Each care type on a plant is classified from the whole days elapsed since
//! it was last logged:
//!
//! | Days since last care            | Level                    |
//! |---------------------------------|--------------------------|
//! | never logged                    | [`CareLevel::Overdue`]   |
//! | `days >= threshold`             | [`CareLevel::Overdue`]   |
//! | `days >= threshold * 0.8`       | [`CareLevel::Soon`]      |
//! | otherwise                       | [`CareLevel::Good`]      |
//!
//! # Example
//!
//! ```
//! use saintpaulia_core::{CareEngine, CareLevel, CareThresholds};
//! use saintpaulia_types::{CareType, Plant};
//! use time::{Duration, OffsetDateTime};
//!
//! let now = OffsetDateTime::now_utc();
//! let mut plant = Plant::new("p-1", "Optimara EverGrace");
//! plant.last_watered = Some(now - Duration::days(6));
//!
//! let engine = CareEngine::new(CareThresholds::default()).at(now);
//! let statuses = engine.plant_statuses(&plant);
//!
//! assert_eq!(statuses.watering.status, CareLevel::Soon);
//! assert_eq!(statuses.watering.days, Some(6));
//! assert_eq!(statuses.fertilizing.status, CareLevel::Overdue);
//! assert_eq!(engine.overdue_care_types(&plant), vec![CareType::Fertilizing, CareType::Grooming]);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use saintpaulia_types::{CareType, Plant};

use crate::thresholds::CareThresholds;

/// Fraction of a threshold after which care is "due soon".
pub const SOON_FRACTION: f64 = 0.8;

const MILLIS_PER_DAY: i128 = 86_400_000;

/// Care urgency for a single care type.
///
/// Ordered by urgency, so `max()` over a plant's levels gives its worst one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    /// Well within the threshold.
    Good,
    /// At or past 80% of the threshold.
    Soon,
    /// At or past the threshold, or never logged.
    Overdue,
}

impl CareLevel {
    /// Lowercase key, as used in JSON output.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            CareLevel::Good => "good",
            CareLevel::Soon => "soon",
            CareLevel::Overdue => "overdue",
        }
    }
}

impl fmt::Display for CareLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Classification of one care type on one plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareStatus {
    pub status: CareLevel,
    /// Whole days since the care was last logged, or `None` if never.
    /// Negative when the timestamp lies in the future.
    pub days: Option<i64>,
}

impl CareStatus {
    /// Status for a care type that has never been logged.
    #[must_use]
    pub fn never() -> Self {
        Self {
            status: CareLevel::Overdue,
            days: None,
        }
    }

    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.status == CareLevel::Overdue
    }
}

/// Whole days from `last_care` to `now`, rounded toward negative infinity.
#[must_use]
pub fn days_since(last_care: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let millis = (now - last_care).whole_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) as i64
}

/// Classify one care type given its last timestamp and threshold.
///
/// A `threshold_days` of zero is not rejected: every logged care is then
/// overdue, and nothing is ever "soon".
#[must_use]
pub fn compute_care_status(
    last_care: Option<OffsetDateTime>,
    threshold_days: u32,
    now: OffsetDateTime,
) -> CareStatus {
    let Some(last_care) = last_care else {
        return CareStatus::never();
    };

    let days = days_since(last_care, now);
    let status = if days >= i64::from(threshold_days) {
        CareLevel::Overdue
    } else if days as f64 >= f64::from(threshold_days) * SOON_FRACTION {
        CareLevel::Soon
    } else {
        CareLevel::Good
    };

    CareStatus {
        status,
        days: Some(days),
    }
}

/// Statuses for all three care types on one plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCareStatuses {
    pub watering: CareStatus,
    pub fertilizing: CareStatus,
    pub grooming: CareStatus,
}

impl PlantCareStatuses {
    #[must_use]
    pub fn get(&self, care_type: CareType) -> CareStatus {
        match care_type {
            CareType::Watering => self.watering,
            CareType::Fertilizing => self.fertilizing,
            CareType::Grooming => self.grooming,
        }
    }

    /// Statuses in care type declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CareType, CareStatus)> + '_ {
        CareType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    /// Overdue care types, in declaration order.
    #[must_use]
    pub fn overdue_types(&self) -> Vec<CareType> {
        self.iter()
            .filter(|(_, status)| status.is_overdue())
            .map(|(t, _)| t)
            .collect()
    }

    /// True if any care type is overdue.
    #[must_use]
    pub fn needs_care(&self) -> bool {
        self.iter().any(|(_, status)| status.is_overdue())
    }

    /// The most urgent level across all care types.
    #[must_use]
    pub fn worst(&self) -> CareLevel {
        self.iter()
            .map(|(_, status)| status.status)
            .max()
            .unwrap_or(CareLevel::Good)
    }
}

/// Classifies plants against a threshold table.
///
/// The reference instant is explicit: [`CareEngine::at`] pins it, otherwise
/// every call reads the current UTC time once and uses it for the whole call.
#[derive(Debug, Clone, Default)]
pub struct CareEngine {
    thresholds: CareThresholds,
    now: Option<OffsetDateTime>,
}

impl CareEngine {
    /// Create an engine that evaluates against the current time.
    pub fn new(thresholds: impl Into<CareThresholds>) -> Self {
        Self {
            thresholds: thresholds.into(),
            now: None,
        }
    }

    /// Pin the reference instant.
    #[must_use]
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// A copy pinned to this engine's current reference instant.
    ///
    /// Used by multi-plant operations so one call sees one "now".
    #[must_use]
    pub fn pinned(&self) -> Self {
        self.clone().at(self.now())
    }

    /// Get the threshold table.
    #[must_use]
    pub fn thresholds(&self) -> &CareThresholds {
        &self.thresholds
    }

    /// The reference instant: the pinned one, else the current UTC time.
    #[must_use]
    pub fn now(&self) -> OffsetDateTime {
        self.now.unwrap_or_else(OffsetDateTime::now_utc)
    }

    /// Classify one care type on a plant.
    #[must_use]
    pub fn care_status(&self, plant: &Plant, care_type: CareType) -> CareStatus {
        compute_care_status(
            plant.last_care(care_type),
            self.thresholds.get(care_type),
            self.now(),
        )
    }

    /// Classify all three care types on a plant.
    #[must_use]
    pub fn plant_statuses(&self, plant: &Plant) -> PlantCareStatuses {
        let now = self.now();
        let status = |care_type| {
            compute_care_status(plant.last_care(care_type), self.thresholds.get(care_type), now)
        };
        PlantCareStatuses {
            watering: status(CareType::Watering),
            fertilizing: status(CareType::Fertilizing),
            grooming: status(CareType::Grooming),
        }
    }

    /// True if any care type on the plant is overdue.
    #[must_use]
    pub fn plant_needs_care(&self, plant: &Plant) -> bool {
        self.plant_statuses(plant).needs_care()
    }

    /// Overdue care types on the plant, in declaration order.
    #[must_use]
    pub fn overdue_care_types(&self, plant: &Plant) -> Vec<CareType> {
        self.plant_statuses(plant).overdue_types()
    }
}
