//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for the dashboard API.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use competitor_data::{CompetitorData, CompetitorFilters, ConsistencyCategory, Facets};
use grouping_engine::{DisplayRow, GroupNode, Record};
use serde::Serialize;

use crate::pagination::PageInfo;

/// One visible grid row: a group header or a competitor row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowData {
    #[serde(rename_all = "camelCase")]
    Group {
        /// Group key the UI sends back to toggle this group.
        id: String,
        field: String,
        value: String,
        label: String,
        child_count: usize,
        level: usize,
        expanded: bool,
    },
    #[serde(rename_all = "camelCase")]
    Leaf {
        /// Indent depth; equals the number of grouping fields.
        level: usize,
        consistency_category: ConsistencyCategory,
        data: CompetitorData,
    },
}

impl RowData {
    pub fn from_group(node: &GroupNode) -> Self {
        RowData::Group {
            id: node.id.to_key(),
            field: node.field.clone(),
            value: node.value.clone(),
            label: node.label(),
            child_count: node.child_count,
            level: node.level,
            expanded: node.expanded,
        }
    }

    pub fn from_leaf(data: &CompetitorData, level: usize) -> Self {
        RowData::Leaf {
            level,
            consistency_category: data.consistency_category(),
            data: data.clone(),
        }
    }

    pub fn level(&self) -> usize {
        match self {
            RowData::Group { level, .. } | RowData::Leaf { level, .. } => *level,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, RowData::Group { .. })
    }

    /// Group key for group rows, record id for leaves.
    pub fn key(&self) -> &str {
        match self {
            RowData::Group { id, .. } => id,
            RowData::Leaf { data, .. } => &data.id,
        }
    }
}

/// Converts one engine row. `lookup` maps a leaf record back to its source row.
pub fn row_data<'a, F>(row: &DisplayRow<'_>, leaf_level: usize, lookup: F) -> Option<RowData>
where
    F: Fn(&Record) -> Option<&'a CompetitorData>,
{
    match row {
        DisplayRow::Group(node) => Some(RowData::from_group(node)),
        DisplayRow::Leaf(record) => lookup(record).map(|data| RowData::from_leaf(data, leaf_level)),
    }
}

/// Everything the grid needs to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub rows: Vec<RowData>,
    pub page_info: PageInfo,
    pub group_by: Vec<String>,
    /// Competitor rows left after filters and search.
    pub total_rows: usize,
    pub filters: CompetitorFilters,
    pub search: String,
    pub facets: Facets,
}
