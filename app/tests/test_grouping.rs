//! FILENAME: app/tests/test_grouping.rs
//! PURPOSE: Tests for drag-to-group, expand/collapse and grouped paging.

mod common;

use common::TestHarness;
use competitor_data::StrategyTag;
use dashboard_lib::{commands, DashboardConfig, DashboardError, RowData};

const HOUSTON: &str = "location=Houston, TX";
const DENVER: &str = "location=Denver, CO";
const CHICAGO: &str = "location=Chicago, IL";

// ============================================================================
// FLAT VIEW
// ============================================================================

#[test]
fn test_ungrouped_view_is_dataset_order() {
    let harness = TestHarness::with_sample_rows();
    let view = commands::get_view(&harness.state).unwrap();

    assert!(view.group_by.is_empty());
    assert_eq!(view.total_rows, 8);
    assert_eq!(
        harness.keys(),
        vec!["comp-1", "comp-2", "comp-3", "comp-4", "comp-5", "comp-6", "comp-7", "comp-8"]
    );
    assert!(view.rows.iter().all(|row| !row.is_group() && row.level() == 0));
}

// ============================================================================
// ADD / REMOVE FIELDS
// ============================================================================

#[test]
fn test_add_field_groups_and_expands() {
    let harness = TestHarness::with_sample_rows();
    assert!(commands::add_group_field(&harness.state, "location").unwrap());

    assert_eq!(
        harness.keys(),
        vec![
            HOUSTON, "comp-1", "comp-2", "comp-4",
            DENVER, "comp-3", "comp-5", "comp-7",
            CHICAGO, "comp-6", "comp-8",
        ]
    );

    match &harness.rows()[0] {
        RowData::Group { label, child_count, level, expanded, .. } => {
            assert_eq!(label, "location: Houston, TX (3)");
            assert_eq!(*child_count, 3);
            assert_eq!(*level, 0);
            assert!(*expanded);
        }
        other => panic!("expected group row, got {:?}", other),
    }
    assert_eq!(harness.rows()[1].level(), 1);
}

#[test]
fn test_add_same_field_twice_is_noop() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location"]);
    let before = harness.keys();

    assert!(!commands::add_group_field(&harness.state, "location").unwrap());
    assert_eq!(harness.keys(), before);
    assert_eq!(commands::get_view(&harness.state).unwrap().group_by, vec!["location"]);
}

#[test]
fn test_unknown_field_rejected() {
    let harness = TestHarness::with_sample_rows();
    assert!(matches!(
        commands::add_group_field(&harness.state, "captureRate"),
        Err(DashboardError::UnknownField(_))
    ));
    assert!(matches!(
        commands::remove_group_field(&harness.state, "nonsense"),
        Err(DashboardError::UnknownField(_))
    ));
    assert!(commands::get_view(&harness.state).unwrap().group_by.is_empty());
}

#[test]
fn test_remove_field_not_grouped() {
    let harness = TestHarness::with_sample_rows();
    assert!(!commands::remove_group_field(&harness.state, "brand").unwrap());
}

#[test]
fn test_nested_grouping_fully_expanded() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location", "brand"]);

    let rows = harness.rows();
    // 3 locations + 6 brand buckets + 8 leaves
    assert_eq!(rows.len(), 17);
    assert_eq!(
        harness.keys()[..5],
        [
            HOUSTON.to_string(),
            format!("{}/brand=Branded", HOUSTON),
            "comp-1".to_string(),
            "comp-4".to_string(),
            format!("{}/brand=Unbranded", HOUSTON),
        ]
    );
    assert!(rows.iter().filter(|r| !r.is_group()).all(|r| r.level() == 2));
}

#[test]
fn test_remove_then_readd_expands_only_new_level() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location", "brand"]);

    assert!(commands::remove_group_field(&harness.state, "brand").unwrap());
    // Expansion cleared: only the collapsed location headers remain
    assert_eq!(harness.keys(), vec![HOUSTON, DENVER, CHICAGO]);

    assert!(commands::add_group_field(&harness.state, "brand").unwrap());
    assert_eq!(harness.keys(), vec![HOUSTON, DENVER, CHICAGO]);

    assert!(commands::toggle_group(&harness.state, HOUSTON).unwrap());
    let branded = format!("{}/brand=Branded", HOUSTON);
    let unbranded = format!("{}/brand=Unbranded", HOUSTON);
    assert_eq!(
        harness.keys(),
        vec![HOUSTON, branded.as_str(), "comp-1", "comp-4", unbranded.as_str(), "comp-2", DENVER, CHICAGO]
    );
}

// ============================================================================
// EXPAND / COLLAPSE
// ============================================================================

#[test]
fn test_toggle_changes_row_count_by_visible_descendants() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location"]);
    assert_eq!(harness.rows().len(), 11);

    assert!(!commands::toggle_group(&harness.state, DENVER).unwrap());
    assert_eq!(harness.keys(), vec![HOUSTON, "comp-1", "comp-2", "comp-4", DENVER, CHICAGO, "comp-6", "comp-8"]);

    assert!(commands::toggle_group(&harness.state, DENVER).unwrap());
    assert_eq!(harness.rows().len(), 11);
}

#[test]
fn test_collapsing_parent_hides_expanded_children() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location", "brand"]);

    commands::toggle_group(&harness.state, HOUSTON).unwrap();
    // Houston subtree (2 brand rows + 3 leaves) disappears, siblings untouched
    assert_eq!(harness.rows().len(), 17 - 5);

    commands::toggle_group(&harness.state, HOUSTON).unwrap();
    assert_eq!(harness.rows().len(), 17);
}

#[test]
fn test_toggle_unknown_group_rejected() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location"]);

    for key in ["location=Paris", "brand=Branded", "", "no-equals-sign"] {
        assert!(
            matches!(commands::toggle_group(&harness.state, key), Err(DashboardError::UnknownGroup(_))),
            "key {:?} should be rejected",
            key
        );
    }
    assert_eq!(harness.rows().len(), 11);
}

#[test]
fn test_collapse_and_expand_all() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location", "brand"]);

    commands::collapse_all_groups(&harness.state).unwrap();
    assert_eq!(harness.keys(), vec![HOUSTON, DENVER, CHICAGO]);

    commands::expand_all_groups(&harness.state).unwrap();
    assert_eq!(harness.rows().len(), 17);
}

#[test]
fn test_grouping_follows_filters() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "competitor", "Valero").unwrap();
    harness.group_by(&["location"]);

    assert_eq!(harness.keys(), vec![HOUSTON, "comp-2", CHICAGO, "comp-6"]);
    // Denver has no Valero rows, so its group does not exist in this view
    assert!(matches!(
        commands::toggle_group(&harness.state, DENVER),
        Err(DashboardError::UnknownGroup(_))
    ));
}

#[test]
fn test_groups_hidden_by_filter_expanded_after_clear() {
    let harness = TestHarness::with_sample_rows();
    commands::set_filter(&harness.state, "competitor", "Valero").unwrap();
    harness.group_by(&["location"]);
    commands::set_filter(&harness.state, "competitor", "all").unwrap();

    assert_eq!(
        harness.keys(),
        vec![
            HOUSTON, "comp-1", "comp-2", "comp-4",
            DENVER, "comp-3", "comp-5", "comp-7",
            CHICAGO, "comp-6", "comp-8",
        ]
    );
}

#[test]
fn test_expand_all_reaches_groups_hidden_by_search() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location"]);
    commands::collapse_all_groups(&harness.state).unwrap();
    commands::set_search(&harness.state, "chicago").unwrap();
    commands::expand_all_groups(&harness.state).unwrap();
    commands::set_search(&harness.state, "").unwrap();

    assert_eq!(harness.rows().len(), 11);
}

#[test]
fn test_duplicate_ids_keep_their_own_data() {
    let harness = TestHarness::with_rows(vec![
        common::row("comp-1", "Valero", "Houston, TX", "Diesel", "Branded", StrategyTag::Follower, 90.0, 80.0),
        common::row("comp-1", "Shell", "Denver, CO", "Diesel", "Branded", StrategyTag::Leader, 40.0, 20.0),
    ]);

    let competitors = |rows: Vec<RowData>| -> Vec<String> {
        rows.into_iter()
            .filter_map(|row| match row {
                RowData::Leaf { data, .. } => Some(data.competitor),
                RowData::Group { .. } => None,
            })
            .collect()
    };
    assert_eq!(competitors(harness.rows()), vec!["Valero", "Shell"]);

    harness.group_by(&["location"]);
    assert_eq!(competitors(harness.rows()), vec!["Valero", "Shell"]);
}

#[test]
fn test_clear_grouping() {
    let harness = TestHarness::with_sample_rows();
    harness.group_by(&["location", "brand"]);
    commands::clear_grouping(&harness.state).unwrap();
    assert_eq!(harness.rows().len(), 8);
}

// ============================================================================
// GROUPED PAGING
// ============================================================================

#[test]
fn test_group_rows_count_toward_pages() {
    let harness = TestHarness::with_sample_rows();
    commands::set_page_size(&harness.state, 10).unwrap();
    harness.group_by(&["location"]);

    let first = commands::get_view(&harness.state).unwrap();
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.page_info.total_items, 11);
    assert_eq!(first.page_info.total_pages, 2);

    commands::set_page(&harness.state, 2).unwrap();
    assert_eq!(harness.keys(), vec!["comp-8"]);
}

#[test]
fn test_config_group_by_applies_at_startup() {
    let harness = TestHarness::with_config(DashboardConfig {
        group_by: vec!["strategyTag".to_string()],
        row_count: 30,
        ..Default::default()
    });
    let view = commands::get_view(&harness.state).unwrap();

    assert_eq!(view.group_by, vec!["strategyTag"]);
    assert!(view.rows[0].is_group());
    // Generated rows start with the Leader profile
    assert_eq!(view.rows[0].key(), "strategyTag=Leader");
    assert_eq!(view.total_rows, 30);
}
