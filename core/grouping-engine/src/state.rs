//! FILENAME: core/grouping-engine/src/state.rs
//! PURPOSE: The grouping field path and expansion set owned by a grid.
//! CONTEXT: The engine itself is a pure function. This type is the explicit
//! state a grid surface keeps between interactions (drop a column on the
//! group area, remove a grouping chip, click a disclosure arrow) and passes
//! into the engine on every recompute.

use crate::definition::{ExpansionState, GroupId};
use crate::engine::{collect_group_ids, group_ids_at_level, group_rows};
use crate::record::Record;
use crate::view::DisplayRow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingState {
    fields: Vec<String>,
    expanded: ExpansionState,
}

impl GroupingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expanded
    }

    pub fn is_grouped(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Appends a grouping level.
    ///
    /// Returns false (and changes nothing) if the field is already grouped.
    /// Groups created by the new level start expanded; groups on the existing
    /// levels keep their state. Pass every record, not a filtered subset, so
    /// groups hidden at the time are expanded once they reappear.
    pub fn add_field(&mut self, field: impl Into<String>, records: &[Record]) -> bool {
        let field = field.into();
        if self.contains_field(&field) {
            return false;
        }
        self.fields.push(field);
        let level = self.fields.len() - 1;
        self.expanded
            .extend(group_ids_at_level(records, &self.fields, level));
        true
    }

    /// Removes a grouping level and collapses every group.
    ///
    /// Returns false if the field was not grouped.
    pub fn remove_field(&mut self, field: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f != field);
        if self.fields.len() == before {
            return false;
        }
        self.expanded.clear();
        true
    }

    /// Drops every grouping level and all expansion state.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.expanded.clear();
    }

    /// Flips a group and returns its new state (true = expanded).
    pub fn toggle(&mut self, id: &GroupId) -> bool {
        self.expanded.toggle(id)
    }

    pub fn expand(&mut self, id: GroupId) -> bool {
        self.expanded.expand(id)
    }

    pub fn collapse(&mut self, id: &GroupId) -> bool {
        self.expanded.collapse(id)
    }

    pub fn is_expanded(&self, id: &GroupId) -> bool {
        self.expanded.is_expanded(id)
    }

    pub fn expand_all(&mut self, records: &[Record]) {
        self.expanded
            .extend(collect_group_ids(records, &self.fields));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Runs the grouping engine with the current state.
    pub fn display<'a>(&self, records: &'a [Record]) -> Vec<DisplayRow<'a>> {
        group_rows(records, &self.fields, &self.expanded)
    }
}
