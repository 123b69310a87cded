//! Collection-wide care statistics.
//!
//! Aggregates per-plant statuses into counts per care type, the share of
//! plants with nothing overdue, and the most neglected and best maintained
//! care types. Ties between care types resolve to the first in declaration
//! order (watering, fertilizing, grooming).

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use saintpaulia_types::{CareType, Plant};

use crate::status::{CareEngine, CareLevel};

/// Health percentage at or above which a collection is thriving.
pub const THRIVING_PERCENTAGE: u8 = 80;
/// Health percentage at or above which a collection is fair.
pub const FAIR_PERCENTAGE: u8 = 50;

/// How many plants sit at each level for one care type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub overdue: usize,
    pub soon: usize,
    pub good: usize,
}

impl LevelCounts {
    fn record(&mut self, level: CareLevel) {
        match level {
            CareLevel::Overdue => self.overdue += 1,
            CareLevel::Soon => self.soon += 1,
            CareLevel::Good => self.good += 1,
        }
    }

    /// Plants that are not overdue (`good + soon`).
    #[must_use]
    pub fn up_to_date(&self) -> usize {
        self.good + self.soon
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.overdue + self.soon + self.good
    }
}

/// Level counts for every care type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareBreakdown {
    pub watering: LevelCounts,
    pub fertilizing: LevelCounts,
    pub grooming: LevelCounts,
}

impl CareBreakdown {
    #[must_use]
    pub fn get(&self, care_type: CareType) -> &LevelCounts {
        match care_type {
            CareType::Watering => &self.watering,
            CareType::Fertilizing => &self.fertilizing,
            CareType::Grooming => &self.grooming,
        }
    }

    fn get_mut(&mut self, care_type: CareType) -> &mut LevelCounts {
        match care_type {
            CareType::Watering => &mut self.watering,
            CareType::Fertilizing => &mut self.fertilizing,
            CareType::Grooming => &mut self.grooming,
        }
    }

    /// Counts in care type declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CareType, &LevelCounts)> + '_ {
        CareType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    /// First care type holding the strictly greatest value of `key`.
    fn first_max_by(&self, key: impl Fn(&LevelCounts) -> usize) -> (CareType, usize) {
        let mut best = (CareType::Watering, key(&self.watering));
        for (care_type, counts) in self.iter().skip(1) {
            let value = key(counts);
            if value > best.1 {
                best = (care_type, value);
            }
        }
        best
    }
}

/// Coarse rating of a health percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    /// 80% and above.
    Thriving,
    /// 50% to 79%.
    Fair,
    /// Below 50%.
    Struggling,
}

impl HealthBand {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= THRIVING_PERCENTAGE {
            HealthBand::Thriving
        } else if percentage >= FAIR_PERCENTAGE {
            HealthBand::Fair
        } else {
            HealthBand::Struggling
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Thriving => "Thriving",
            HealthBand::Fair => "Fair",
            HealthBand::Struggling => "Struggling",
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Care statistics for a whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCareStats {
    pub total_plants: usize,
    /// Plants with no overdue care type.
    pub healthy_count: usize,
    /// `healthy_count / total_plants` as a rounded percentage; 100 when empty.
    pub health_percentage: u8,
    pub care_breakdown: CareBreakdown,
    /// Care type with the most overdue plants, if any are overdue.
    pub most_neglected_care_type: Option<CareType>,
    /// Care type with the most `good` plants.
    pub best_maintained_care_type: CareType,
    pub blooming_count: usize,
}

impl CollectionCareStats {
    /// Plants with at least one overdue care type.
    #[must_use]
    pub fn needs_care_count(&self) -> usize {
        self.total_plants - self.healthy_count
    }

    #[must_use]
    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_percentage(self.health_percentage)
    }

    /// One-line encouragement for the collection keeper.
    #[must_use]
    pub fn encouragement(&self) -> String {
        if self.health_percentage == 100 {
            return "Perfect! All your plants are thriving.".to_string();
        }
        match self.health_band() {
            HealthBand::Thriving => {
                "Great job! Most of your collection is well-cared for.".to_string()
            }
            HealthBand::Fair => {
                "Good progress! A few plants could use some attention.".to_string()
            }
            HealthBand::Struggling => match self.most_neglected_care_type {
                Some(care_type) => format!("Focus on {} to get back on track.", care_type.key()),
                None => "Let's catch up on some plant care!".to_string(),
            },
        }
    }
}

/// `healthy / total` as a percentage, rounded half up, computed exactly.
fn health_percentage(healthy: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (healthy * 200 + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

impl CareEngine {
    /// Aggregate care statistics over a collection.
    ///
    /// The reference instant is read once, so every plant is judged against
    /// the same "now".
    #[must_use]
    pub fn collection_stats(&self, plants: &[Plant]) -> CollectionCareStats {
        let engine = self.pinned();
        let mut breakdown = CareBreakdown::default();
        let mut healthy_count = 0;
        let mut blooming_count = 0;

        for plant in plants {
            let statuses = engine.plant_statuses(plant);
            for (care_type, status) in statuses.iter() {
                breakdown.get_mut(care_type).record(status.status);
            }
            if !statuses.needs_care() {
                healthy_count += 1;
            }
            if plant.is_blooming {
                blooming_count += 1;
            }
        }

        let (neglected, max_overdue) = breakdown.first_max_by(|c| c.overdue);
        let (best_maintained, _) = breakdown.first_max_by(|c| c.good);
        debug!(
            total = plants.len(),
            healthy = healthy_count,
            "Computed collection care stats"
        );

        CollectionCareStats {
            total_plants: plants.len(),
            healthy_count,
            health_percentage: health_percentage(healthy_count, plants.len()),
            care_breakdown: breakdown,
            most_neglected_care_type: (max_overdue > 0).then_some(neglected),
            best_maintained_care_type: best_maintained,
            blooming_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    fn engine() -> CareEngine {
        CareEngine::default().at(NOW)
    }

    fn plant(id: &str, watered: Option<i64>, fertilized: Option<i64>, groomed: Option<i64>) -> Plant {
        let ago = |d: Option<i64>| d.map(|d| NOW - Duration::days(d));
        let mut plant = Plant::new(id, format!("Cultivar {id}"));
        plant.last_watered = ago(watered);
        plant.last_fertilized = ago(fertilized);
        plant.last_groomed = ago(groomed);
        plant
    }

    #[test]
    fn test_empty_collection() {
        let stats = engine().collection_stats(&[]);
        assert_eq!(stats.total_plants, 0);
        assert_eq!(stats.healthy_count, 0);
        assert_eq!(stats.health_percentage, 100);
        assert_eq!(stats.care_breakdown, CareBreakdown::default());
        assert_eq!(stats.most_neglected_care_type, None);
        assert_eq!(stats.best_maintained_care_type, CareType::Watering);
        assert_eq!(stats.health_band(), HealthBand::Thriving);
    }

    #[test]
    fn test_mixed_collection() {
        let plants = vec![
            plant("a", Some(1), Some(1), Some(1)),
            plant("b", Some(10), Some(1), Some(1)),
            plant("c", Some(6), Some(12), None),
        ];
        let stats = engine().collection_stats(&plants);

        assert_eq!(stats.total_plants, 3);
        assert_eq!(stats.healthy_count, 1);
        assert_eq!(stats.needs_care_count(), 2);
        assert_eq!(stats.health_percentage, 33);

        let watering = stats.care_breakdown.watering;
        assert_eq!((watering.overdue, watering.soon, watering.good), (1, 1, 1));
        let fertilizing = stats.care_breakdown.fertilizing;
        assert_eq!((fertilizing.overdue, fertilizing.soon, fertilizing.good), (0, 1, 2));
        let grooming = stats.care_breakdown.grooming;
        assert_eq!((grooming.overdue, grooming.soon, grooming.good), (1, 0, 2));

        // watering and grooming tie on overdue, watering is declared first
        assert_eq!(stats.most_neglected_care_type, Some(CareType::Watering));
        // fertilizing and grooming tie on good, fertilizing is declared first
        assert_eq!(stats.best_maintained_care_type, CareType::Fertilizing);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let plants = vec![
            plant("a", Some(1), None, Some(6)),
            plant("b", None, None, None),
            plant("c", Some(40), Some(13), Some(2)),
        ];
        let stats = engine().collection_stats(&plants);
        for (_, counts) in stats.care_breakdown.iter() {
            assert_eq!(counts.total(), stats.total_plants);
        }
    }

    #[test]
    fn test_no_overdue_means_no_neglected_type() {
        let plants = vec![plant("a", Some(6), Some(12), Some(6))];
        let stats = engine().collection_stats(&plants);
        assert_eq!(stats.most_neglected_care_type, None);
        assert_eq!(stats.healthy_count, 1);
        assert_eq!(stats.health_percentage, 100);
        // nothing is good, so every type ties at zero
        assert_eq!(stats.best_maintained_care_type, CareType::Watering);
    }

    #[test]
    fn test_encouragement_ladder() {
        let healthy = plant("a", Some(1), Some(1), Some(1));
        let stats = engine().collection_stats(std::slice::from_ref(&healthy));
        assert_eq!(stats.encouragement(), "Perfect! All your plants are thriving.");

        let mut plants: Vec<Plant> = (0..4).map(|_| healthy.clone()).collect();
        plants.push(plant("b", Some(1), None, Some(1)));
        let stats = engine().collection_stats(&plants);
        assert_eq!(stats.health_percentage, 80);
        assert_eq!(
            stats.encouragement(),
            "Great job! Most of your collection is well-cared for."
        );

        let plants = vec![healthy.clone(), plant("b", Some(1), None, Some(1))];
        let stats = engine().collection_stats(&plants);
        assert_eq!(
            stats.encouragement(),
            "Good progress! A few plants could use some attention."
        );

        let plants = vec![plant("b", Some(1), None, Some(1))];
        let stats = engine().collection_stats(&plants);
        assert_eq!(stats.most_neglected_care_type, Some(CareType::Fertilizing));
        assert_eq!(stats.encouragement(), "Focus on fertilizing to get back on track.");
    }

    #[test]
    fn test_blooming_count() {
        let mut a = plant("a", Some(1), Some(1), Some(1));
        a.is_blooming = true;
        let b = plant("b", Some(1), Some(1), Some(1));
        let stats = engine().collection_stats(&[a, b]);
        assert_eq!(stats.blooming_count, 1);
    }

    #[test]
    fn test_health_percentage_rounds_half_up() {
        assert_eq!(health_percentage(1, 3), 33);
        assert_eq!(health_percentage(2, 3), 67);
        assert_eq!(health_percentage(1, 2), 50);
        assert_eq!(health_percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(health_percentage(3, 8), 38); // 37.5 rounds up
        assert_eq!(health_percentage(0, 5), 0);
        assert_eq!(health_percentage(5, 5), 100);
        assert_eq!(health_percentage(0, 0), 100);
    }

    #[test]
    fn test_health_band_boundaries() {
        assert_eq!(HealthBand::from_percentage(100), HealthBand::Thriving);
        assert_eq!(HealthBand::from_percentage(80), HealthBand::Thriving);
        assert_eq!(HealthBand::from_percentage(79), HealthBand::Fair);
        assert_eq!(HealthBand::from_percentage(50), HealthBand::Fair);
        assert_eq!(HealthBand::from_percentage(49), HealthBand::Struggling);
        assert_eq!(HealthBand::from_percentage(0), HealthBand::Struggling);
    }

    #[test]
    fn test_level_counts_helpers() {
        let counts = LevelCounts {
            overdue: 2,
            soon: 3,
            good: 4,
        };
        assert_eq!(counts.up_to_date(), 7);
        assert_eq!(counts.total(), 9);
    }
}
