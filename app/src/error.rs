//! FILENAME: app/src/error.rs

use competitor_data::ExportError;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Invalid page size: {0} (expected 10, 20, 50 or 100)")]
    InvalidPageSize(usize),

    #[error("Competitor not found: {0}")]
    CompetitorNotFound(String),

    #[error("Invalid value for filter {key}: {value}")]
    InvalidFilter { key: String, value: String },

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("State lock poisoned: {0}")]
    Lock(String),
}

// Commands hand errors to the UI as plain messages.
impl Serialize for DashboardError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid page size: {0} (expected 10, 20, 50 or 100)")]
    InvalidPageSize(usize),

    #[error("Field cannot be grouped: {0}")]
    UnknownGroupField(String),

    #[error("Field grouped twice: {0}")]
    DuplicateGroupField(String),
}
