//! Care-status engine for Saintpaulia Studio.
//!
//! This crate turns the raw timestamps of a plant collection into care
//! statuses and collection-wide statistics. The engine is pure: given plant
//! records, a threshold table and a reference instant it always produces the
//! same answer, and it never touches a data store.
//!
//! # Features
//!
//! - **Per-plant status**: overdue / soon / good for watering, fertilizing
//!   and grooming ([`CareEngine::plant_statuses`])
//! - **Collection stats**: health percentage, per-type breakdown, most
//!   neglected and best maintained care types ([`CareEngine::collection_stats`])
//! - **Thresholds**: full and partial tables with per-key defaults
//! - **Library queries**: search, filter, sort and paginate a collection
//! - **Care logs**: reconcile `last_*` fields and build the activity feed
//! - **Snapshots**: read-only JSON exports of plants and care logs
//!
//! # Quick Start
//!
//! ```
//! use saintpaulia_core::{CareEngine, CareThresholds};
//! use saintpaulia_types::Plant;
//! use time::{Duration, OffsetDateTime};
//!
//! let now = OffsetDateTime::now_utc();
//! let mut plant = Plant::new("p-1", "Optimara EverGrace");
//! plant.last_watered = Some(now - Duration::days(2));
//! plant.last_fertilized = Some(now - Duration::days(2));
//! plant.last_groomed = Some(now - Duration::days(2));
//!
//! let engine = CareEngine::new(CareThresholds::default()).at(now);
//! let stats = engine.collection_stats(&[plant]);
//!
//! assert_eq!(stats.health_percentage, 100);
//! assert_eq!(stats.most_neglected_care_type, None);
//! ```

pub mod care_log;
pub mod error;
pub mod library;
pub mod snapshot;
pub mod stats;
pub mod status;
pub mod thresholds;

pub use care_log::{
    PLANT_HISTORY_LIMIT, RECENT_ACTIVITY_LIMIT, ReconcileReport, apply_care_log, reconcile,
    recent_activity,
};
pub use error::{Error, Result};
pub use library::{
    AttentionItem, DEFAULT_PER_PAGE, LibraryFilter, LibraryPage, LibraryQuery, LibrarySort,
    blooming_headline, needs_attention,
};
pub use snapshot::Snapshot;
pub use stats::{CareBreakdown, CollectionCareStats, HealthBand, LevelCounts};
pub use status::{
    CareEngine, CareLevel, CareStatus, PlantCareStatuses, SOON_FRACTION, compute_care_status,
    days_since,
};
pub use thresholds::{CareThresholds, PartialCareThresholds};

// Re-export record types so front ends need only one dependency
pub use saintpaulia_types::{CareLog, CareType, Plant};
