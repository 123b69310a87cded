//! Care log reconciliation and the activity feed.
//!
//! Care logs are the append-only record of every care action. A plant's
//! `last_*` fields are a summary of them; [`reconcile`] rebuilds that summary
//! from the log so a snapshot whose fields lag behind its logs still reports
//! the right statuses.

use std::collections::HashMap;

use tracing::{debug, warn};

use saintpaulia_types::{CareLog, Plant};

/// Default number of entries in the collection-wide activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;
/// Default number of entries in a single plant's care history.
pub const PLANT_HISTORY_LIMIT: usize = 50;

/// Move the plant's last-care field forward to the log's date.
///
/// Returns `true` if the field changed. A log older than the current value
/// leaves the plant untouched. The log's `plant_id` is not checked.
pub fn apply_care_log(plant: &mut Plant, log: &CareLog) -> bool {
    let current = plant.last_care(log.care_type);
    if current.is_some_and(|at| at >= log.care_date) {
        return false;
    }
    plant.set_last_care(log.care_type, Some(log.care_date));
    true
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Logs matched to a plant.
    pub applied: usize,
    /// Logs that moved a last-care field forward.
    pub updated: usize,
    /// Logs naming a plant that is not in the collection.
    pub orphaned: usize,
}

/// Apply every log to the plant it names.
pub fn reconcile(plants: &mut [Plant], logs: &[CareLog]) -> ReconcileReport {
    let index: HashMap<String, usize> = plants
        .iter()
        .enumerate()
        .map(|(i, plant)| (plant.id.clone(), i))
        .collect();

    let mut report = ReconcileReport::default();
    for log in logs {
        let Some(&i) = index.get(&log.plant_id) else {
            warn!(
                log_id = %log.id,
                plant_id = %log.plant_id,
                "Skipping care log for unknown plant"
            );
            report.orphaned += 1;
            continue;
        };
        report.applied += 1;
        if apply_care_log(&mut plants[i], log) {
            report.updated += 1;
        }
    }

    debug!(
        applied = report.applied,
        updated = report.updated,
        orphaned = report.orphaned,
        "Reconciled care logs"
    );
    report
}

/// Most recent care logs, newest first.
///
/// With `plant_id`, only that plant's logs are considered. Logs sharing a
/// `care_date` keep their input order.
#[must_use]
pub fn recent_activity<'a>(
    logs: &'a [CareLog],
    plant_id: Option<&str>,
    limit: usize,
) -> Vec<&'a CareLog> {
    let mut selected: Vec<&CareLog> = logs
        .iter()
        .filter(|log| plant_id.is_none_or(|id| log.plant_id == id))
        .collect();
    selected.sort_by(|a, b| b.care_date.cmp(&a.care_date));
    selected.truncate(limit);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use saintpaulia_types::CareType;
    use time::macros::datetime;

    fn log(plant_id: &str, care_type: CareType, at: time::OffsetDateTime) -> CareLog {
        CareLog::new(plant_id, care_type, at)
    }

    #[test]
    fn test_apply_sets_missing_field() {
        let mut plant = Plant::new("p", "x");
        let entry = log("p", CareType::Watering, datetime!(2024-06-01 09:00:00 UTC));
        assert!(apply_care_log(&mut plant, &entry));
        assert_eq!(plant.last_watered, Some(entry.care_date));
    }

    #[test]
    fn test_apply_never_moves_backwards() {
        let mut plant = Plant::new("p", "x");
        plant.last_groomed = Some(datetime!(2024-06-10 09:00:00 UTC));

        let older = log("p", CareType::Grooming, datetime!(2024-06-01 09:00:00 UTC));
        assert!(!apply_care_log(&mut plant, &older));
        assert_eq!(plant.last_groomed, Some(datetime!(2024-06-10 09:00:00 UTC)));

        let same = log("p", CareType::Grooming, datetime!(2024-06-10 09:00:00 UTC));
        assert!(!apply_care_log(&mut plant, &same));
    }

    #[test]
    fn test_reconcile_counts_and_skips_orphans() {
        let mut plants = vec![Plant::new("a", "A"), Plant::new("b", "B")];
        plants[1].last_fertilized = Some(datetime!(2024-06-12 00:00:00 UTC));

        let logs = vec![
            log("a", CareType::Watering, datetime!(2024-06-01 00:00:00 UTC)),
            log("a", CareType::Watering, datetime!(2024-06-05 00:00:00 UTC)),
            log("a", CareType::Watering, datetime!(2024-06-03 00:00:00 UTC)),
            log("b", CareType::Fertilizing, datetime!(2024-06-02 00:00:00 UTC)),
            log("ghost", CareType::Grooming, datetime!(2024-06-02 00:00:00 UTC)),
        ];

        let report = reconcile(&mut plants, &logs);
        assert_eq!(
            report,
            ReconcileReport {
                applied: 4,
                updated: 2,
                orphaned: 1,
            }
        );
        assert_eq!(plants[0].last_watered, Some(datetime!(2024-06-05 00:00:00 UTC)));
        assert_eq!(plants[1].last_fertilized, Some(datetime!(2024-06-12 00:00:00 UTC)));
    }

    #[test]
    fn test_recent_activity_newest_first_and_limited() {
        let logs = vec![
            log("a", CareType::Watering, datetime!(2024-06-01 00:00:00 UTC)),
            log("b", CareType::Grooming, datetime!(2024-06-09 00:00:00 UTC)),
            log("a", CareType::Fertilizing, datetime!(2024-06-05 00:00:00 UTC)),
        ];

        let recent = recent_activity(&logs, None, 2);
        let dates: Vec<_> = recent.iter().map(|l| l.care_date).collect();
        assert_eq!(
            dates,
            vec![
                datetime!(2024-06-09 00:00:00 UTC),
                datetime!(2024-06-05 00:00:00 UTC)
            ]
        );
    }

    #[test]
    fn test_recent_activity_for_one_plant() {
        let logs = vec![
            log("a", CareType::Watering, datetime!(2024-06-01 00:00:00 UTC)),
            log("b", CareType::Grooming, datetime!(2024-06-09 00:00:00 UTC)),
            log("a", CareType::Fertilizing, datetime!(2024-06-05 00:00:00 UTC)),
        ];

        let history = recent_activity(&logs, Some("a"), PLANT_HISTORY_LIMIT);
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|l| l.plant_id == "a"));
        assert_eq!(history[0].care_type, CareType::Fertilizing);

        assert!(recent_activity(&logs, Some("missing"), 10).is_empty());
        assert!(recent_activity(&logs, None, 0).is_empty());
    }
}
