//! FILENAME: app/tests/test_filters.rs
//! PURPOSE: Tests for filter selectors, search, facets and pagination commands.

mod common;

use common::TestHarness;
use competitor_data::TimeRange;
use dashboard_lib::{commands, DashboardConfig, DashboardError};

// ============================================================================
// FILTERS
// ============================================================================

#[test]
fn test_location_filter() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "location", "Denver, CO").unwrap();

    assert_eq!(harness.keys(), vec!["comp-3", "comp-5", "comp-7"]);
    assert_eq!(commands::get_view(&harness.state).unwrap().total_rows, 3);
}

#[test]
fn test_all_and_empty_selectors_are_noops() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "product", "Diesel").unwrap();
    assert_eq!(harness.rows().len(), 4);

    commands::set_filter(&harness.state, "product", "all").unwrap();
    assert_eq!(harness.rows().len(), 8);

    commands::set_filter(&harness.state, "product", "Diesel").unwrap();
    commands::set_filter(&harness.state, "product", "").unwrap();
    assert_eq!(harness.rows().len(), 8);
}

#[test]
fn test_filters_combine() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "competitor", "ExxonMobil").unwrap();
    commands::set_filter(&harness.state, "product", "Premium Gas").unwrap();
    assert_eq!(harness.keys(), vec!["comp-7"]);
}

#[test]
fn test_time_range_filter_key() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "timeRange", "30d").unwrap();

    let view = commands::get_view(&harness.state).unwrap();
    assert_eq!(view.filters.time_range, TimeRange::Days30);
    // Rows carry no date; the range only trims detail series
    assert_eq!(view.total_rows, 8);

    assert!(matches!(
        commands::set_filter(&harness.state, "timeRange", "7d"),
        Err(DashboardError::InvalidFilter { .. })
    ));
}

#[test]
fn test_unknown_filter_key() {
    let harness = TestHarness::with_sample_rows();
    assert!(matches!(
        commands::set_filter(&harness.state, "brand", "Branded"),
        Err(DashboardError::UnknownField(_))
    ));
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let harness = TestHarness::with_sample_rows();

    commands::set_search(&harness.state, "VALERO").unwrap();
    assert_eq!(harness.keys(), vec!["comp-2", "comp-6"]);

    commands::set_search(&harness.state, "chicago").unwrap();
    assert_eq!(harness.keys(), vec!["comp-6", "comp-8"]);

    commands::set_search(&harness.state, "premium").unwrap();
    assert_eq!(harness.keys(), vec!["comp-3", "comp-7"]);

    commands::set_search(&harness.state, "").unwrap();
    assert_eq!(harness.rows().len(), 8);
}

#[test]
fn test_search_and_filter_together() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "location", "Houston, TX").unwrap();
    commands::set_search(&harness.state, "diesel").unwrap();
    assert_eq!(harness.keys(), vec!["comp-1", "comp-2"]);
}

#[test]
fn test_no_matches_gives_empty_page() {
    let harness = TestHarness::with_sample_rows();
    commands::set_search(&harness.state, "nobody").unwrap();

    let view = commands::get_view(&harness.state).unwrap();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_rows, 0);
    assert_eq!(view.page_info.total_pages, 1);
    assert_eq!(view.page_info.start_item, 0);
}

#[test]
fn test_facets_cover_whole_dataset() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "location", "Denver, CO").unwrap();

    let facets = commands::get_view(&harness.state).unwrap().facets;
    assert_eq!(facets.locations, vec!["Chicago, IL", "Denver, CO", "Houston, TX"]);
    assert_eq!(facets.products, vec!["Diesel", "Premium Gas", "Regular Gas"]);
    assert_eq!(
        facets.competitors,
        vec!["BP", "Chevron", "ExxonMobil", "Marathon", "Shell", "Valero"]
    );
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn test_default_page_size() {
    let harness = TestHarness::new();
    let view = commands::get_view(&harness.state).unwrap();

    assert_eq!(view.rows.len(), 20);
    assert_eq!(view.page_info.total_items, 100);
    assert_eq!(view.page_info.total_pages, 5);
    assert_eq!(harness.keys()[0], "comp-1");
}

#[test]
fn test_set_page_and_clamp() {
    let harness = TestHarness::new();
    commands::set_page(&harness.state, 3).unwrap();
    let view = commands::get_view(&harness.state).unwrap();
    assert_eq!(view.page_info.start_item, 41);
    assert_eq!(view.rows[0].key(), "comp-41");

    commands::set_page(&harness.state, 99).unwrap();
    let view = commands::get_view(&harness.state).unwrap();
    assert_eq!(view.page_info.page, 5);
    assert_eq!(view.page_info.end_item, 100);
    assert!(!view.page_info.can_go_next);
}

#[test]
fn test_page_size_change_resets_page() {
    let harness = TestHarness::new();
    commands::set_page(&harness.state, 4).unwrap();
    commands::set_page_size(&harness.state, 50).unwrap();

    let view = commands::get_view(&harness.state).unwrap();
    assert_eq!(view.page_info.page, 1);
    assert_eq!(view.rows.len(), 50);
    assert_eq!(view.page_info.total_pages, 2);
}

#[test]
fn test_invalid_page_size_rejected() {
    let harness = TestHarness::new();
    assert!(matches!(
        commands::set_page_size(&harness.state, 15),
        Err(DashboardError::InvalidPageSize(15))
    ));
    assert_eq!(commands::get_view(&harness.state).unwrap().page_info.page_size, 20);
}

#[test]
fn test_filter_change_resets_page() {
    let harness = TestHarness::new();
    commands::set_page(&harness.state, 3).unwrap();
    commands::set_search(&harness.state, "").unwrap();
    assert_eq!(commands::get_view(&harness.state).unwrap().page_info.page, 1);
}

#[test]
fn test_configured_page_size() {
    let harness = TestHarness::with_config(DashboardConfig {
        page_size: 10,
        row_count: 35,
        ..Default::default()
    });
    let view = commands::get_view(&harness.state).unwrap();
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.page_info.total_pages, 4);
}
