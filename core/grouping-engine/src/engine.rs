//! FILENAME: core/grouping-engine/src/engine.rs
//! Grouping Engine - turns flat records into a grouped display list.
//!
//! Inputs are the full record set, an ordered grouping field path and the
//! set of expanded group ids. The output is an ordered list of group header
//! rows and leaf rows.
//!
//! Algorithm (recursive partition):
//! 1. No grouping fields left: emit the records unchanged, in input order
//! 2. Split the records on the string value of the first field, keeping
//!    buckets in first-encountered order
//! 3. Emit a group node per bucket
//! 4. If the node is expanded, recurse into its bucket with the remaining
//!    fields one level deeper
//!
//! Every function here is pure. Nothing indexes records by id, so duplicate
//! ids are kept as separate leaves.

use rustc_hash::FxHashMap;

use crate::definition::{ExpansionState, GroupId};
use crate::record::Record;
use crate::view::{DisplayRow, GroupNode};

// ============================================================================
// PARTITIONING
// ============================================================================

/// Records sharing one stringified value of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<'a> {
    pub value: String,
    pub records: Vec<&'a Record>,
}

/// Splits records on `field`, preserving the order in which distinct values
/// are first seen and the input order of records inside each bucket.
pub fn partition<'a>(records: &'a [Record], field: &str) -> Vec<Bucket<'a>> {
    let refs: Vec<&'a Record> = records.iter().collect();
    partition_refs(&refs, field)
}

fn partition_refs<'a>(records: &[&'a Record], field: &str) -> Vec<Bucket<'a>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut buckets: Vec<Bucket<'a>> = Vec::new();

    for &record in records {
        let key = record.value_label(field);
        match index.get(&key) {
            Some(&slot) => buckets[slot].records.push(record),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    value: key,
                    records: vec![record],
                });
            }
        }
    }

    buckets
}

fn bucket_id(parent: Option<&GroupId>, field: &str, value: &str) -> GroupId {
    match parent {
        Some(parent) => parent.child(field, value),
        None => GroupId::root(field, value),
    }
}

// ============================================================================
// FLATTENED DISPLAY LIST
// ============================================================================

/// Computes the display list for `records` grouped by `fields`.
///
/// With an empty field path the records come back unchanged. A collapsed
/// group contributes exactly one row.
pub fn group_rows<'a, S: AsRef<str>>(
    records: &'a [Record],
    fields: &[S],
    expanded: &ExpansionState,
) -> Vec<DisplayRow<'a>> {
    let refs: Vec<&'a Record> = records.iter().collect();
    let mut rows = Vec::with_capacity(records.len());
    emit_level(&refs, fields, None, expanded, &mut rows);
    rows
}

fn emit_level<'a, S: AsRef<str>>(
    records: &[&'a Record],
    fields: &[S],
    parent: Option<&GroupId>,
    expanded: &ExpansionState,
    rows: &mut Vec<DisplayRow<'a>>,
) {
    let Some((field, rest)) = fields.split_first() else {
        rows.extend(records.iter().map(|&record| DisplayRow::Leaf(record)));
        return;
    };
    let field = field.as_ref();

    for bucket in partition_refs(records, field) {
        let id = bucket_id(parent, field, &bucket.value);
        let is_expanded = expanded.is_expanded(&id);

        rows.push(DisplayRow::Group(GroupNode {
            id: id.clone(),
            field: field.to_string(),
            value: bucket.value,
            child_count: bucket.records.len(),
            level: id.level(),
            expanded: is_expanded,
        }));

        if is_expanded {
            emit_level(&bucket.records, rest, Some(&id), expanded, rows);
        }
    }
}

// ============================================================================
// GROUP TREE
// ============================================================================

/// A node of the full (unflattened) group hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTreeNode<'a> {
    pub id: GroupId,
    pub field: String,
    pub value: String,
    pub level: usize,
    /// Every record in this bucket, in input order.
    pub records: Vec<&'a Record>,
    /// Sub-groups for the next field; empty at the deepest level.
    pub children: Vec<GroupTreeNode<'a>>,
}

/// Builds the complete group hierarchy, ignoring expansion state.
pub fn group_tree<'a, S: AsRef<str>>(records: &'a [Record], fields: &[S]) -> Vec<GroupTreeNode<'a>> {
    let refs: Vec<&'a Record> = records.iter().collect();
    build_tree_level(&refs, fields, None)
}

fn build_tree_level<'a, S: AsRef<str>>(
    records: &[&'a Record],
    fields: &[S],
    parent: Option<&GroupId>,
) -> Vec<GroupTreeNode<'a>> {
    let Some((field, rest)) = fields.split_first() else {
        return Vec::new();
    };
    let field = field.as_ref();

    partition_refs(records, field)
        .into_iter()
        .map(|bucket| {
            let id = bucket_id(parent, field, &bucket.value);
            let children = build_tree_level(&bucket.records, rest, Some(&id));
            GroupTreeNode {
                level: id.level(),
                id,
                field: field.to_string(),
                value: bucket.value,
                records: bucket.records,
                children,
            }
        })
        .collect()
}

/// Ids of every group in the hierarchy, parents before children.
pub fn collect_group_ids<S: AsRef<str>>(records: &[Record], fields: &[S]) -> Vec<GroupId> {
    let mut ids = Vec::new();
    collect_ids(&group_tree(records, fields), None, &mut ids);
    ids
}

/// Ids of the groups at one nesting level.
pub fn group_ids_at_level<S: AsRef<str>>(
    records: &[Record],
    fields: &[S],
    level: usize,
) -> Vec<GroupId> {
    if level >= fields.len() {
        return Vec::new();
    }
    let mut ids = Vec::new();
    collect_ids(&group_tree(records, &fields[..=level]), Some(level), &mut ids);
    ids
}

fn collect_ids(nodes: &[GroupTreeNode<'_>], only_level: Option<usize>, ids: &mut Vec<GroupId>) {
    for node in nodes {
        if only_level.map_or(true, |level| level == node.level) {
            ids.push(node.id.clone());
        }
        collect_ids(&node.children, only_level, ids);
    }
}
