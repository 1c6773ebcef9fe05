//! FILENAME: core/grouping-engine/src/record.rs
//! PURPOSE: Flat records fed into the grouping engine.
//! CONTEXT: A record is an immutable bag of named, typed values plus a stable
//! identifier. `FieldValue::display_value` is the only place values are turned
//! into strings, so grouping keys and grid labels can never disagree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used for a field the record does not carry (or carries as `Missing`).
pub const MISSING_VALUE_LABEL: &str = "undefined";

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Boolean(bool),
    Missing,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Returns the string form used both for grouping and for display.
    ///
    /// Numbers with no fractional part print without a decimal point, so
    /// `5.0` and `5` land in the same group.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            FieldValue::Missing => MISSING_VALUE_LABEL.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Avoids "-0"
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Missing, Into::into)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Stable identifier of a source record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

/// A single flat source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// The grouping key of this record for `field`.
    /// Absent fields fall back to [`MISSING_VALUE_LABEL`].
    pub fn value_label(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(value) => value.display_value(),
            None => MISSING_VALUE_LABEL.to_string(),
        }
    }
}
