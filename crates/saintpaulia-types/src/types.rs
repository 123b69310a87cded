//! Core record types for a plant collection.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ParseError;

/// Display name used when a plant has neither a nickname nor a cultivar name.
pub const UNNAMED_PLANT: &str = "A plant";

/// A category of plant-care action.
///
/// The declaration order `Watering, Fertilizing, Grooming` is significant:
/// it is the iteration order of [`CareType::ALL`] and the tie-break order
/// for every "first care type wins" decision in the engine.
///
/// ```
/// use saintpaulia_types::CareType;
///
/// assert_eq!("watering".parse::<CareType>().unwrap(), CareType::Watering);
/// assert_eq!(CareType::Grooming.to_string(), "grooming");
/// assert_eq!(CareType::Fertilizing.plant_field(), "last_fertilized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CareType {
    /// Watering.
    Watering,
    /// Feeding with fertilizer.
    Fertilizing,
    /// Removing spent blooms and damaged leaves.
    Grooming,
}

impl CareType {
    /// Every care type, in declaration order.
    pub const ALL: [CareType; 3] = [CareType::Watering, CareType::Fertilizing, CareType::Grooming];

    /// The lowercase key used in records and settings.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            CareType::Watering => "watering",
            CareType::Fertilizing => "fertilizing",
            CareType::Grooming => "grooming",
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CareType::Watering => "Watering",
            CareType::Fertilizing => "Fertilizing",
            CareType::Grooming => "Grooming",
        }
    }

    /// Name of the plant field holding the last time this care was logged.
    #[must_use]
    pub fn plant_field(&self) -> &'static str {
        match self {
            CareType::Watering => "last_watered",
            CareType::Fertilizing => "last_fertilized",
            CareType::Grooming => "last_groomed",
        }
    }
}

impl FromStr for CareType {
    type Err = ParseError;

    /// Parse a care type key (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "watering" => Ok(CareType::Watering),
            "fertilizing" => Ok(CareType::Fertilizing),
            "grooming" => Ok(CareType::Grooming),
            _ => Err(ParseError::UnknownCareType(s.to_string())),
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A plant in the collection, as supplied by the data store.
///
/// Only `id` and the three `last_*` timestamps matter to the care engine.
/// The remaining fields are carried for display, search and sorting.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plant {
    /// Opaque unique identifier.
    pub id: String,
    /// Registered cultivar name, e.g. "Optimara EverGrace".
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::nullable::or_default")
    )]
    pub cultivar_name: String,
    /// Optional pet name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nickname: Option<String>,
    /// Last time watering was logged.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub last_watered: Option<OffsetDateTime>,
    /// Last time fertilizing was logged.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub last_fertilized: Option<OffsetDateTime>,
    /// Last time grooming was logged.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub last_groomed: Option<OffsetDateTime>,
    /// Whether the plant is currently in bloom.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::nullable::or_default")
    )]
    pub is_blooming: bool,
    /// When the plant joined the collection.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub acquired_date: Option<OffsetDateTime>,
    /// Where it came from (nursery, show, leaf cutting...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
    /// Where it sits (shelf, windowsill...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    /// Free-form lifecycle status (active, gifted, lost...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
    /// Pot size as entered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pot_size: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub photo_url: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub created_at: Option<OffsetDateTime>,
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::timestamp::lenient::option")
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Plant {
    /// Create a plant with the given id and cultivar name and no care history.
    pub fn new(id: impl Into<String>, cultivar_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cultivar_name: cultivar_name.into(),
            ..Default::default()
        }
    }

    /// Last time the given care was logged, if ever.
    #[must_use]
    pub fn last_care(&self, care_type: CareType) -> Option<OffsetDateTime> {
        match care_type {
            CareType::Watering => self.last_watered,
            CareType::Fertilizing => self.last_fertilized,
            CareType::Grooming => self.last_groomed,
        }
    }

    /// Overwrite the last-care timestamp for the given care type.
    pub fn set_last_care(&mut self, care_type: CareType, at: Option<OffsetDateTime>) {
        match care_type {
            CareType::Watering => self.last_watered = at,
            CareType::Fertilizing => self.last_fertilized = at,
            CareType::Grooming => self.last_groomed = at,
        }
    }

    /// Nickname, else cultivar name, else [`UNNAMED_PLANT`]. Blank strings count as missing.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| Some(self.cultivar_name.as_str()).filter(|c| !c.trim().is_empty()))
            .unwrap_or(UNNAMED_PLANT)
    }
}

/// One logged care action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CareLog {
    /// Opaque unique identifier.
    pub id: String,
    /// The plant this action was performed on.
    pub plant_id: String,
    /// What was done.
    pub care_type: CareType,
    /// When it was done.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp::lenient"))]
    pub care_date: OffsetDateTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,
    /// Fertilizer used, for fertilizing entries.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub fertilizer_type: Option<String>,
}

impl CareLog {
    /// Create a log entry with a fresh random identifier.
    pub fn new(plant_id: impl Into<String>, care_type: CareType, care_date: OffsetDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            plant_id: plant_id.into(),
            care_type,
            care_date,
            notes: None,
            fertilizer_type: None,
        }
    }

    /// Attach notes. Empty notes are stored as `None`.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        self
    }

    /// Record the fertilizer used.
    pub fn with_fertilizer(mut self, fertilizer: impl Into<String>) -> Self {
        self.fertilizer_type = Some(fertilizer.into());
        self
    }
}
