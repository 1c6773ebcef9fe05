//! FILENAME: app/src/config.rs
//! PURPOSE: Dashboard startup settings.
//! CONTEXT: Read from an optional JSON file; every key may be omitted.
//! Command-line flags override the file.

use std::path::{Path, PathBuf};

use competitor_data::{is_groupable, TimeRange};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pagination::{is_valid_page_size, DEFAULT_PAGE_SIZE};

pub const DEFAULT_ROW_COUNT: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Number of synthetic competitor rows.
    pub row_count: usize,
    pub seed: u64,
    pub page_size: usize,
    /// Initial grouping path, outermost first.
    pub group_by: Vec<String>,
    pub time_range: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            row_count: DEFAULT_ROW_COUNT,
            seed: DEFAULT_SEED,
            page_size: DEFAULT_PAGE_SIZE,
            group_by: Vec::new(),
            time_range: TimeRange::default(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_page_size(self.page_size) {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        for (i, field) in self.group_by.iter().enumerate() {
            if !is_groupable(field) {
                return Err(ConfigError::UnknownGroupField(field.clone()));
            }
            if self.group_by[..i].contains(field) {
                return Err(ConfigError::DuplicateGroupField(field.clone()));
            }
        }
        Ok(())
    }
}
