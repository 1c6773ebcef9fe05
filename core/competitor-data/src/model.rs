//! FILENAME: core/competitor-data/src/model.rs
//! PURPOSE: Competitor rows shown in the analysis grid and the fixed
//! reference lists the generator draws from.

use std::fmt;
use std::str::FromStr;

use grouping_engine::{FieldValue, Record};
use serde::{Deserialize, Serialize};

// ============================================================================
// REFERENCE LISTS
// ============================================================================

pub const COMPETITOR_NAMES: [&str; 6] = ["ExxonMobil", "Valero", "Marathon", "Shell", "BP", "Chevron"];
pub const LOCATIONS: [&str; 5] = ["Aberdeen, WA", "Des Moines, IA", "Houston, TX", "Chicago, IL", "Denver, CO"];
pub const LOCATION_GROUPS: [&str; 5] = ["Gulf Coast", "Midwest", "West Coast", "East Coast", "Mountain"];
pub const PRODUCTS: [&str; 5] = ["ULSD-0037", "#2 ULSD", "Premium Gas", "Regular Gas", "Diesel"];
pub const PRODUCT_GROUPS: [&str; 4] = ["Diesel", "Gasoline", "Premium", "Regular"];
pub const BRANDS: [&str; 2] = ["Branded", "Unbranded"];

// ============================================================================
// FIELD KEYS
// ============================================================================

pub const FIELD_COMPETITOR: &str = "competitor";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_LOCATION_GROUP: &str = "locationGroup";
pub const FIELD_PRODUCT: &str = "product";
pub const FIELD_PRODUCT_GROUP: &str = "productGroup";
pub const FIELD_BRAND: &str = "brand";
pub const FIELD_STRATEGY_TAG: &str = "strategyTag";
pub const FIELD_SPOT_DELTA: &str = "spotDelta";
pub const FIELD_CAPTURE_RATE: &str = "captureRate";
pub const FIELD_PREDICTABILITY: &str = "predictability";

/// Columns a user may drag into the group-by area.
pub const GROUPABLE_FIELDS: [&str; 7] = [
    FIELD_COMPETITOR,
    FIELD_LOCATION,
    FIELD_LOCATION_GROUP,
    FIELD_PRODUCT,
    FIELD_PRODUCT_GROUP,
    FIELD_BRAND,
    FIELD_STRATEGY_TAG,
];

pub fn is_groupable(field: &str) -> bool {
    GROUPABLE_FIELDS.contains(&field)
}

// ============================================================================
// STRATEGY / CONSISTENCY
// ============================================================================

/// Pricing strategy a competitor is classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyTag {
    Leader,
    Follower,
    Position,
}

impl StrategyTag {
    pub const ALL: [StrategyTag; 3] = [StrategyTag::Leader, StrategyTag::Follower, StrategyTag::Position];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::Leader => "Leader",
            StrategyTag::Follower => "Follower",
            StrategyTag::Position => "Position",
        }
    }

    /// Classifies an unprofiled competitor from its metrics.
    pub fn classify(capture_rate: f64, predictability: f64) -> Self {
        if capture_rate > 70.0 && predictability > 70.0 {
            StrategyTag::Leader
        } else if capture_rate > 50.0 && capture_rate <= 70.0 {
            StrategyTag::Follower
        } else {
            StrategyTag::Position
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown strategy tag: {}", s))
    }
}

/// Badge bucket for a consistency percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyCategory {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConsistencyCategory {
    pub fn from_percentage(value: f64) -> Self {
        if value >= 85.0 {
            ConsistencyCategory::High
        } else if value >= 25.0 {
            ConsistencyCategory::Medium
        } else if value >= 15.0 {
            ConsistencyCategory::Low
        } else {
            ConsistencyCategory::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyCategory::High => "High",
            ConsistencyCategory::Medium => "Medium",
            ConsistencyCategory::Low => "Low",
            ConsistencyCategory::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConsistencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COMPETITOR ROW
// ============================================================================

/// One row of the competitor analysis grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorData {
    pub id: String,
    pub competitor: String,
    pub location: String,
    pub location_group: String,
    pub product: String,
    pub product_group: String,
    pub brand: String,
    pub strategy_tag: StrategyTag,
    /// Spot price delta in dollars.
    pub spot_delta: f64,
    /// Spot delta capture, percent (0-100).
    pub capture_rate: f64,
    /// Consistency, percent (0-100).
    pub predictability: f64,
}

impl CompetitorData {
    pub fn consistency_category(&self) -> ConsistencyCategory {
        ConsistencyCategory::from_percentage(self.predictability)
    }

    /// Converts the row into a grouping record keyed by the column names.
    pub fn to_record(&self) -> Record {
        Record::new(self.id.as_str())
            .with(FIELD_COMPETITOR, self.competitor.as_str())
            .with(FIELD_LOCATION, self.location.as_str())
            .with(FIELD_LOCATION_GROUP, self.location_group.as_str())
            .with(FIELD_PRODUCT, self.product.as_str())
            .with(FIELD_PRODUCT_GROUP, self.product_group.as_str())
            .with(FIELD_BRAND, self.brand.as_str())
            .with(FIELD_STRATEGY_TAG, self.strategy_tag.as_str())
            .with(FIELD_SPOT_DELTA, FieldValue::Number(self.spot_delta))
            .with(FIELD_CAPTURE_RATE, FieldValue::Number(self.capture_rate))
            .with(FIELD_PREDICTABILITY, FieldValue::Number(self.predictability))
    }
}

pub fn to_records(rows: &[CompetitorData]) -> Vec<Record> {
    rows.iter().map(CompetitorData::to_record).collect()
}
