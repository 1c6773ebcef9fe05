//! FILENAME: app/tests/common/mod.rs
//! Test harness and fixtures for dashboard integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use competitor_data::{CompetitorData, StrategyTag};
use dashboard_lib::{commands, create_app_state_at, AppState, DashboardConfig, RowData};

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Generated dataset with the default config.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        TestHarness {
            state: create_app_state_at(&config, today()),
        }
    }

    /// Replaces the generated dataset with fixed rows.
    pub fn with_rows(rows: Vec<CompetitorData>) -> Self {
        let harness = Self::new();
        *harness.state.dataset.lock().unwrap() = rows;
        harness
    }

    /// The eight hand-written rows from `sample_rows`.
    pub fn with_sample_rows() -> Self {
        Self::with_rows(sample_rows())
    }

    pub fn rows(&self) -> Vec<RowData> {
        commands::get_view(&self.state).unwrap().rows
    }

    /// Keys of the visible rows: group keys and record ids.
    pub fn keys(&self) -> Vec<String> {
        self.rows().iter().map(|row| row.key().to_string()).collect()
    }

    pub fn group_by(&self, fields: &[&str]) {
        for field in fields {
            assert!(commands::add_group_field(&self.state, field).unwrap());
        }
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn row(
    id: &str,
    competitor: &str,
    location: &str,
    product: &str,
    brand: &str,
    strategy_tag: StrategyTag,
    capture_rate: f64,
    predictability: f64,
) -> CompetitorData {
    CompetitorData {
        id: id.to_string(),
        competitor: competitor.to_string(),
        location: location.to_string(),
        location_group: "Gulf Coast".to_string(),
        product: product.to_string(),
        product_group: "Diesel".to_string(),
        brand: brand.to_string(),
        strategy_tag,
        spot_delta: 0.01,
        capture_rate,
        predictability,
    }
}

/// Locations in first-seen order: Houston (1, 2, 4), Denver (3, 5, 7),
/// Chicago (6, 8).
pub fn sample_rows() -> Vec<CompetitorData> {
    use StrategyTag::*;
    vec![
        row("comp-1", "ExxonMobil", "Houston, TX", "Diesel", "Branded", Leader, 95.0, 89.0),
        row("comp-2", "Valero", "Houston, TX", "Diesel", "Unbranded", Follower, 90.0, 82.0),
        row("comp-3", "Marathon", "Denver, CO", "Premium Gas", "Branded", Position, 83.9, 75.0),
        row("comp-4", "Shell", "Houston, TX", "Regular Gas", "Branded", Follower, 60.0, 40.0),
        row("comp-5", "BP", "Denver, CO", "Diesel", "Unbranded", Position, 30.0, 20.0),
        row("comp-6", "Valero", "Chicago, IL", "Diesel", "Branded", Follower, 88.0, 80.0),
        row("comp-7", "ExxonMobil", "Denver, CO", "Premium Gas", "Branded", Leader, 96.0, 90.0),
        row("comp-8", "Chevron", "Chicago, IL", "Regular Gas", "Unbranded", Position, 45.0, 10.0),
    ]
}
