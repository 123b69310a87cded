//! Library queries over a plant collection.
//!
//! [`LibraryQuery`] is a fluent builder for searching, filtering, sorting and
//! paginating plants, the way the collection library view browses them.
//!
//! # Example
//!
//! ```
//! use saintpaulia_core::{CareEngine, LibraryFilter, LibraryQuery, LibrarySort};
//! use saintpaulia_types::Plant;
//!
//! let mut violet = Plant::new("1", "Optimara EverGrace");
//! violet.is_blooming = true;
//! let plants = vec![violet, Plant::new("2", "Rob's Vanilla Trail")];
//!
//! let page = LibraryQuery::new()
//!     .search("ever")
//!     .filter(LibraryFilter::Blooming)
//!     .sort(LibrarySort::Name)
//!     .run(&plants, &CareEngine::default());
//!
//! assert_eq!(page.total_matches, 1);
//! assert_eq!(page.plants[0].id, "1");
//! ```

use core::fmt;
use core::str::FromStr;

use time::OffsetDateTime;
use tracing::debug;

use saintpaulia_types::{CareType, Plant};

use crate::error::Error;
use crate::status::{CareEngine, PlantCareStatuses};

/// Default number of plants per library page.
pub const DEFAULT_PER_PAGE: usize = 24;

/// Which plants a library query keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LibraryFilter {
    #[default]
    All,
    /// Plants with at least one overdue care type.
    NeedsCare,
    /// Plants currently in bloom.
    Blooming,
}

impl LibraryFilter {
    const EXPECTED: &'static str = "all, needs-care, blooming";

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            LibraryFilter::All => "all",
            LibraryFilter::NeedsCare => "needs-care",
            LibraryFilter::Blooming => "blooming",
        }
    }
}

impl FromStr for LibraryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(LibraryFilter::All),
            "needs-care" | "needs_care" | "needscare" => Ok(LibraryFilter::NeedsCare),
            "blooming" => Ok(LibraryFilter::Blooming),
            _ => Err(Error::UnknownOption {
                kind: "filter",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for LibraryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Library ordering. Every ordering is stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LibrarySort {
    /// Most recently updated first; never-updated plants last.
    #[default]
    Updated,
    /// Nickname or cultivar name, case-insensitive, ascending.
    Name,
    /// Most recently acquired first; unknown acquisition last.
    Acquired,
    /// Plants needing care first.
    Care,
}

impl LibrarySort {
    const EXPECTED: &'static str = "updated, name, acquired, care";

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            LibrarySort::Updated => "updated",
            LibrarySort::Name => "name",
            LibrarySort::Acquired => "acquired",
            LibrarySort::Care => "care",
        }
    }
}

impl FromStr for LibrarySort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "updated" => Ok(LibrarySort::Updated),
            "name" => Ok(LibrarySort::Name),
            "acquired" => Ok(LibrarySort::Acquired),
            "care" => Ok(LibrarySort::Care),
            _ => Err(Error::UnknownOption {
                kind: "sort",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for LibrarySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fluent query builder for the plant library.
///
/// By default a query matches every plant, orders by `updated_at` newest
/// first, and returns a single page holding all matches.
#[derive(Debug, Clone, Default)]
pub struct LibraryQuery {
    /// Case-insensitive substring matched against nickname or cultivar name.
    pub search: Option<String>,
    pub filter: LibraryFilter,
    pub sort: LibrarySort,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size. `None` puts every match on one page.
    pub per_page: Option<usize>,
}

/// One page of library results.
#[derive(Debug, Clone)]
pub struct LibraryPage<'a> {
    pub plants: Vec<&'a Plant>,
    /// Matches across all pages.
    pub total_matches: usize,
    /// 1-based page number that was requested.
    pub page: usize,
    /// Number of pages; at least 1.
    pub pages: usize,
}

impl LibraryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep plants whose nickname or cultivar name contains `text`.
    ///
    /// Blank text matches everything.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: LibraryFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: LibrarySort) -> Self {
        self.sort = sort;
        self
    }

    /// Select a 1-based page. Page 0 is treated as page 1.
    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Set the page size. A size of 0 is treated as 1.
    #[must_use]
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page.max(1));
        self
    }

    fn matches_search(&self, plant: &Plant) -> bool {
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.to_lowercase();
        let contains = |field: Option<&str>| {
            field.is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        contains(plant.nickname.as_deref()) || contains(Some(plant.cultivar_name.as_str()))
    }

    /// Run the query against a collection.
    ///
    /// Care-dependent filtering and sorting judge every plant against one
    /// reference instant.
    pub fn run<'a>(&self, plants: &'a [Plant], engine: &CareEngine) -> LibraryPage<'a> {
        let engine = engine.pinned();

        let mut matches: Vec<&Plant> = plants
            .iter()
            .filter(|plant| self.matches_search(plant))
            .filter(|plant| match self.filter {
                LibraryFilter::All => true,
                LibraryFilter::NeedsCare => engine.plant_needs_care(plant),
                LibraryFilter::Blooming => plant.is_blooming,
            })
            .collect();

        match self.sort {
            LibrarySort::Updated => {
                matches.sort_by_key(|plant| std::cmp::Reverse(timestamp_or_epoch(plant.updated_at)));
            }
            LibrarySort::Acquired => {
                matches
                    .sort_by_key(|plant| std::cmp::Reverse(timestamp_or_epoch(plant.acquired_date)));
            }
            LibrarySort::Name => matches.sort_by_cached_key(|plant| sort_name(plant)),
            LibrarySort::Care => {
                matches.sort_by_cached_key(|plant| !engine.plant_needs_care(plant));
            }
        }

        let total_matches = matches.len();
        let page = self.page.unwrap_or(1);
        let (plants, pages) = match self.per_page {
            Some(per_page) => {
                let pages = total_matches.div_ceil(per_page).max(1);
                let start = page.saturating_sub(1).saturating_mul(per_page);
                let plants = matches.into_iter().skip(start).take(per_page).collect();
                (plants, pages)
            }
            None => (matches, 1),
        };

        debug!(
            filter = %self.filter,
            sort = %self.sort,
            total_matches,
            page,
            "Ran library query"
        );

        LibraryPage {
            plants,
            total_matches,
            page,
            pages,
        }
    }
}

fn timestamp_or_epoch(value: Option<OffsetDateTime>) -> OffsetDateTime {
    value.unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Sort key for name ordering: the display name, lowercased.
fn sort_name(plant: &Plant) -> String {
    plant.display_name().to_lowercase()
}

/// Headline for the plants currently in bloom, or `None` if none are.
///
/// ```
/// use saintpaulia_core::blooming_headline;
/// use saintpaulia_types::Plant;
///
/// let mut a = Plant::new("1", "Optimara EverGrace");
/// a.is_blooming = true;
/// assert_eq!(blooming_headline(&[a]).as_deref(), Some("Optimara EverGrace is blooming!"));
/// ```
#[must_use]
pub fn blooming_headline(plants: &[Plant]) -> Option<String> {
    let names: Vec<&str> = plants
        .iter()
        .filter(|plant| plant.is_blooming)
        .map(Plant::display_name)
        .collect();

    match names.as_slice() {
        [] => None,
        [only] => Some(format!("{only} is blooming!")),
        [first, second] => Some(format!("{first} and {second} are blooming!")),
        [first, second, rest @ ..] => Some(format!(
            "{first}, {second} +{} more are blooming!",
            rest.len()
        )),
    }
}

/// A plant that needs care, with what it needs.
#[derive(Debug, Clone)]
pub struct AttentionItem<'a> {
    pub plant: &'a Plant,
    pub statuses: PlantCareStatuses,
    /// Overdue care types, in declaration order. Never empty.
    pub overdue: Vec<CareType>,
}

/// Plants needing care, most overdue types first, then by display name.
#[must_use]
pub fn needs_attention<'a>(plants: &'a [Plant], engine: &CareEngine) -> Vec<AttentionItem<'a>> {
    let engine = engine.pinned();
    let mut items: Vec<AttentionItem<'a>> = plants
        .iter()
        .filter_map(|plant| {
            let statuses = engine.plant_statuses(plant);
            let overdue = statuses.overdue_types();
            (!overdue.is_empty()).then_some(AttentionItem {
                plant,
                statuses,
                overdue,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.overdue
            .len()
            .cmp(&a.overdue.len())
            .then_with(|| {
                a.plant
                    .display_name()
                    .to_lowercase()
                    .cmp(&b.plant.display_name().to_lowercase())
            })
    });
    items
}
