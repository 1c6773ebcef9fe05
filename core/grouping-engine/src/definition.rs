//! FILENAME: core/grouping-engine/src/definition.rs
//! Grouping Definition - group identity and expansion state.
//!
//! This module contains the types that DESCRIBE which groups exist and which
//! of them are open. They are:
//! - Deterministic (the same data and field path always yield the same ids)
//! - Independent of the record data (expansion state outlives re-grouping)
//! - Serializable as plain strings for the frontend

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// GROUP IDENTITY
// ============================================================================

/// One step of a group path: the field grouped on and the bucket value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupSegment {
    pub field: String,
    pub value: String,
}

impl GroupSegment {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        GroupSegment {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Identifier of a group node: the full path of (field, value) pairs from the
/// top level down to the node itself.
///
/// The nesting level is the path length minus one, so two nodes on different
/// levels can never share an id, and a `location=Chicago` group under
/// `dept=Eng` stays distinct from the one under `dept=Sales`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GroupId {
    path: SmallVec<[GroupSegment; 4]>,
}

impl GroupId {
    /// Creates a top-level (level 0) group id.
    pub fn root(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut path = SmallVec::new();
        path.push(GroupSegment::new(field, value));
        GroupId { path }
    }

    /// Creates the id of a child group one level below this one.
    pub fn child(&self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(GroupSegment::new(field, value));
        GroupId { path }
    }

    /// 0-based nesting level.
    pub fn level(&self) -> usize {
        self.path.len() - 1
    }

    pub fn segments(&self) -> &[GroupSegment] {
        &self.path
    }

    fn last(&self) -> &GroupSegment {
        // A GroupId is never constructed with an empty path.
        &self.path[self.path.len() - 1]
    }

    /// The field this node groups on.
    pub fn field(&self) -> &str {
        &self.last().field
    }

    /// The bucket value of this node.
    pub fn value(&self) -> &str {
        &self.last().value
    }

    /// The enclosing group, or `None` at level 0.
    pub fn parent(&self) -> Option<GroupId> {
        if self.path.len() < 2 {
            return None;
        }
        let mut path = self.path.clone();
        path.pop();
        Some(GroupId { path })
    }

    /// True when `other` is strictly nested inside this group.
    pub fn is_ancestor_of(&self, other: &GroupId) -> bool {
        other.path.len() > self.path.len() && other.path.starts_with(&self.path)
    }

    /// Canonical string key, e.g. `dept=Eng/location=New York`.
    /// `\`, `/` and `=` inside names and values are backslash-escaped so the
    /// key parses back to the same path.
    pub fn to_key(&self) -> String {
        let mut key = String::new();
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                key.push('/');
            }
            push_escaped(&mut key, &segment.field);
            key.push('=');
            push_escaped(&mut key, &segment.value);
        }
        key
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, '\\' | '/' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

/// Error returned when a group key string is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGroupIdError(pub String);

impl fmt::Display for ParseGroupIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid group key: {}", self.0)
    }
}

impl std::error::Error for ParseGroupIdError {}

impl FromStr for GroupId {
    type Err = ParseGroupIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path: SmallVec<[GroupSegment; 4]> = SmallVec::new();
        let mut field: Option<String> = None;
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(ParseGroupIdError(s.to_string())),
                },
                '=' => {
                    if field.is_some() {
                        return Err(ParseGroupIdError(s.to_string()));
                    }
                    field = Some(std::mem::take(&mut current));
                }
                '/' => {
                    let name = field.take().ok_or_else(|| ParseGroupIdError(s.to_string()))?;
                    path.push(GroupSegment::new(name, std::mem::take(&mut current)));
                }
                other => current.push(other),
            }
        }

        let name = field.ok_or_else(|| ParseGroupIdError(s.to_string()))?;
        path.push(GroupSegment::new(name, current));
        Ok(GroupId { path })
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.to_key()
    }
}

impl TryFrom<String> for GroupId {
    type Error = ParseGroupIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// EXPANSION STATE
// ============================================================================

/// The set of groups currently shown with their children visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: FxHashSet<GroupId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &GroupId) -> bool {
        self.expanded.contains(id)
    }

    /// Returns true if the group was not already expanded.
    pub fn expand(&mut self, id: GroupId) -> bool {
        self.expanded.insert(id)
    }

    /// Returns true if the group was expanded.
    pub fn collapse(&mut self, id: &GroupId) -> bool {
        self.expanded.remove(id)
    }

    /// Flips a group and returns its new state (true = expanded).
    pub fn toggle(&mut self, id: &GroupId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupId> {
        self.expanded.iter()
    }
}

impl FromIterator<GroupId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = GroupId>>(iter: I) -> Self {
        ExpansionState {
            expanded: iter.into_iter().collect(),
        }
    }
}

impl Extend<GroupId> for ExpansionState {
    fn extend<I: IntoIterator<Item = GroupId>>(&mut self, iter: I) {
        self.expanded.extend(iter);
    }
}
