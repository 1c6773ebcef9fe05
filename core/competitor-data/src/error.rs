//! FILENAME: core/competitor-data/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export: no rows match the current filters")]
    Empty,
}
