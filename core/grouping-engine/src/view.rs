//! FILENAME: core/grouping-engine/src/view.rs
//! Grouping View - Renderable output for the grid.
//!
//! The engine emits an ordered list of display rows: synthetic group header
//! rows interleaved with borrowed leaf records. The grid surface draws them
//! top to bottom and uses the group metadata for indentation and the
//! disclosure control.

use serde::Serialize;

use crate::definition::GroupId;
use crate::record::Record;

// ============================================================================
// GROUP NODE
// ============================================================================

/// A synthetic header row for one bucket of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode {
    /// Deterministic identifier (full field/value path).
    pub id: GroupId,

    /// Field this level groups on.
    pub field: String,

    /// Stringified bucket value.
    pub value: String,

    /// Number of source records in the bucket.
    pub child_count: usize,

    /// Nesting level (0 = outermost grouping field).
    pub level: usize,

    /// Whether the node's children follow it in the display list.
    pub expanded: bool,
}

impl GroupNode {
    /// Label shown in the grid, e.g. `department: Engineering (3)`.
    pub fn label(&self) -> String {
        format!("{}: {} ({})", self.field, self.value, self.child_count)
    }
}

// ============================================================================
// DISPLAY ROW
// ============================================================================

/// One row of the flattened grouping output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayRow<'a> {
    Group(GroupNode),
    Leaf(&'a Record),
}

impl<'a> DisplayRow<'a> {
    pub fn is_group(&self) -> bool {
        matches!(self, DisplayRow::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            DisplayRow::Group(node) => Some(node),
            DisplayRow::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&'a Record> {
        match self {
            DisplayRow::Group(_) => None,
            DisplayRow::Leaf(record) => Some(record),
        }
    }
}

/// Number of leaf rows in a display list.
pub fn leaf_count(rows: &[DisplayRow<'_>]) -> usize {
    rows.iter().filter(|row| !row.is_group()).count()
}

/// Leaf records of a display list, in display order.
pub fn leaves<'a>(rows: &[DisplayRow<'a>]) -> Vec<&'a Record> {
    rows.iter().filter_map(DisplayRow::as_leaf).collect()
}
