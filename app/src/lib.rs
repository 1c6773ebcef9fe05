//! FILENAME: app/src/lib.rs
// PURPOSE: Dashboard library entry point.
// CONTEXT: Holds the competitor dataset and the grid's interaction state
// (grouping, filters, search, paging). The command functions in `commands`
// are the only way the UI or the CLI touches this state.

use std::sync::Mutex;

use chrono::NaiveDate;
use competitor_data::{CompetitorData, CompetitorFilters, CompetitorGenerator};
use grouping_engine::GroupingState;

pub mod api_types;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pagination;

pub use api_types::{RowData, ViewResponse};
pub use config::DashboardConfig;
pub use error::{ConfigError, DashboardError};
pub use logging::{init_logging, next_seq, write_log, UnifiedLogger};
pub use pagination::{PageInfo, Pagination, PAGE_SIZES};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// Seed the dataset was generated from; detail pages derive from it.
    pub seed: u64,
    /// Date the detail series count back from.
    pub today: NaiveDate,
    /// Every generated competitor row, unfiltered.
    pub dataset: Mutex<Vec<CompetitorData>>,
    /// Grouping path and expanded groups.
    pub grouping: Mutex<GroupingState>,
    pub filters: Mutex<CompetitorFilters>,
    /// Free-text search box contents.
    pub search: Mutex<String>,
    pub pagination: Mutex<Pagination>,
}

pub fn create_app_state(config: &DashboardConfig) -> AppState {
    create_app_state_at(config, chrono::Local::now().date_naive())
}

/// Same as `create_app_state` with a fixed "today".
pub fn create_app_state_at(config: &DashboardConfig, today: NaiveDate) -> AppState {
    log_info!(
        "SYS",
        "Creating AppState rows={} seed={} groupBy={:?}",
        config.row_count,
        config.seed,
        config.group_by
    );
    let dataset = CompetitorGenerator::new(config.seed).generate(config.row_count);

    let mut grouping = GroupingState::new();
    if !config.group_by.is_empty() {
        let records = competitor_data::to_records(&dataset);
        for field in &config.group_by {
            grouping.add_field(field.as_str(), &records);
        }
    }

    AppState {
        seed: config.seed,
        today,
        dataset: Mutex::new(dataset),
        grouping: Mutex::new(grouping),
        filters: Mutex::new(CompetitorFilters {
            time_range: config.time_range,
            ..Default::default()
        }),
        search: Mutex::new(String::new()),
        pagination: Mutex::new(Pagination::new(config.page_size)),
    }
}
