//! Read-only snapshots of a plant collection.
//!
//! A snapshot is a JSON export of the data store in one of two shapes:
//!
//! ```json
//! [ { "id": "1", "cultivar_name": "Optimara EverGrace", ... } ]
//! ```
//!
//! or
//!
//! ```json
//! { "plants": [ ... ], "care_logs": [ ... ] }
//! ```
//!
//! Loading validates plant ids and reconciles `last_*` fields with the care
//! logs. Nothing is ever written back.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use saintpaulia_types::{CareLog, Plant};

use crate::care_log::{ReconcileReport, reconcile};
use crate::error::{Error, Result};

/// Plants and care logs loaded from an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub plants: Vec<Plant>,
    #[serde(default, deserialize_with = "saintpaulia_types::nullable::or_default")]
    pub care_logs: Vec<CareLog>,
}

impl Snapshot {
    /// Build a snapshot, rejecting duplicate plant ids and reconciling logs.
    pub fn new(mut plants: Vec<Plant>, care_logs: Vec<CareLog>) -> Result<(Self, ReconcileReport)> {
        let mut seen = HashSet::with_capacity(plants.len());
        for plant in &plants {
            if !seen.insert(plant.id.as_str()) {
                return Err(Error::DuplicatePlant(plant.id.clone()));
            }
        }

        let report = reconcile(&mut plants, &care_logs);
        Ok((Self { plants, care_logs }, report))
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let holds_plants = value.as_object().is_some_and(|map| map.contains_key("plants"));
        let (plants, care_logs) = if value.is_array() {
            (serde_json::from_value(value)?, Vec::new())
        } else if holds_plants {
            let raw: Snapshot = serde_json::from_value(value)?;
            (raw.plants, raw.care_logs)
        } else {
            return Err(Error::SnapshotShape);
        };

        let (snapshot, report) = Self::new(plants, care_logs)?;
        if report.orphaned > 0 {
            info!(
                orphaned = report.orphaned,
                "Snapshot contains care logs for unknown plants"
            );
        }
        Ok(snapshot)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadSnapshot {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            plants = snapshot.plants.len(),
            care_logs = snapshot.care_logs.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Find a plant by exact id, else by case-insensitive display name.
    #[must_use]
    pub fn find_plant(&self, query: &str) -> Option<&Plant> {
        let query = query.trim();
        self.plants.iter().find(|p| p.id == query).or_else(|| {
            let lowered = query.to_lowercase();
            self.plants
                .iter()
                .find(|p| p.display_name().to_lowercase() == lowered)
        })
    }
}
