//! FILENAME: core/grouping-engine/src/lib.rs
//! Row grouping subsystem for the competitor-analysis grid.
//!
//! This crate turns a flat list of records into a grouped display list with
//! expand/collapse state. It has no knowledge of the grid widget that draws
//! the rows.
//!
//! Layers:
//! - `record`: Flat input rows and typed field values
//! - `definition`: Group identity and expansion state
//! - `view`: Renderable output (group header rows + leaf rows)
//! - `engine`: The pure grouping computation
//! - `state`: Grouping field path + expansion set kept by a grid

pub mod record;
pub mod definition;
pub mod view;
pub mod engine;
pub mod state;

pub use record::{FieldValue, Record, RecordId, MISSING_VALUE_LABEL};
pub use definition::{ExpansionState, GroupId, GroupSegment, ParseGroupIdError};
pub use view::{leaf_count, leaves, DisplayRow, GroupNode};
pub use engine::{
    collect_group_ids, group_ids_at_level, group_rows, group_tree, partition,
    Bucket, GroupTreeNode,
};
pub use state::GroupingState;
