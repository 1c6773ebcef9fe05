//! FILENAME: core/competitor-data/src/filter.rs
//! PURPOSE: Dropdown filters, free-text search and the time range selector.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::CompetitorData;

/// Selector value meaning "no restriction".
pub const ALL_SELECTOR: &str = "all";

// ============================================================================
// TIME RANGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "30d")]
    Days30,
    #[default]
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "180d")]
    Days180,
    #[serde(rename = "365d")]
    Days365,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Days30,
        TimeRange::Days90,
        TimeRange::Days180,
        TimeRange::Days365,
    ];

    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Days30 => 30,
            TimeRange::Days90 => 90,
            TimeRange::Days180 => 180,
            TimeRange::Days365 => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Days30 => "30d",
            TimeRange::Days90 => "90d",
            TimeRange::Days180 => "180d",
            TimeRange::Days365 => "365d",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown time range: {} (expected 30d, 90d, 180d or 365d)", s))
    }
}

// ============================================================================
// FILTERS
// ============================================================================

/// The grid's filter bar. `None` and `"all"` both leave a column unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorFilters {
    pub location: Option<String>,
    pub product: Option<String>,
    pub competitor: Option<String>,
    pub time_range: TimeRange,
}

fn selector_matches(selector: &Option<String>, value: &str) -> bool {
    match selector.as_deref() {
        None | Some(ALL_SELECTOR) => true,
        Some(wanted) => wanted == value,
    }
}

impl CompetitorFilters {
    pub fn matches(&self, row: &CompetitorData) -> bool {
        selector_matches(&self.location, &row.location)
            && selector_matches(&self.product, &row.product)
            && selector_matches(&self.competitor, &row.competitor)
    }

    /// Rows passing every selector, in input order.
    ///
    /// The time range does not filter rows; grid rows carry no date.
    pub fn apply<'a>(&self, rows: &'a [CompetitorData]) -> Vec<&'a CompetitorData> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    pub fn is_active(&self) -> bool {
        [&self.location, &self.product, &self.competitor]
            .into_iter()
            .any(|selector| !matches!(selector.as_deref(), None | Some(ALL_SELECTOR)))
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Case-insensitive substring match on competitor, location or product.
pub fn matches_search(row: &CompetitorData, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&row.competitor, &row.location, &row.product]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

pub fn search<'a, I>(rows: I, query: &str) -> Vec<&'a CompetitorData>
where
    I: IntoIterator<Item = &'a CompetitorData>,
{
    rows.into_iter().filter(|row| matches_search(row, query)).collect()
}

// ============================================================================
// FACETS
// ============================================================================

/// Sorted distinct values offered in the filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub locations: Vec<String>,
    pub products: Vec<String>,
    pub competitors: Vec<String>,
}

fn owned(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}

pub fn facets(rows: &[CompetitorData]) -> Facets {
    let mut locations = BTreeSet::new();
    let mut products = BTreeSet::new();
    let mut competitors = BTreeSet::new();
    for row in rows {
        locations.insert(row.location.as_str());
        products.insert(row.product.as_str());
        competitors.insert(row.competitor.as_str());
    }
    Facets {
        locations: owned(locations),
        products: owned(products),
        competitors: owned(competitors),
    }
}
