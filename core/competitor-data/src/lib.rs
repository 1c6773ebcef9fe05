//! FILENAME: core/competitor-data/src/lib.rs
//! Competitor Data
//!
//! The domain behind the competitor analysis grid.
//!
//! Layers:
//! - model:     grid rows, strategy tags, consistency buckets, column keys
//! - profile:   preset behaviour of the profiled competitors
//! - generator: seeded synthetic rows
//! - detail:    per-competitor analytics series
//! - filter:    dropdown filters, search, facets, time range
//! - export:    CSV output
//!
//! Rows become grouping records through `CompetitorData::to_record`, which
//! is the only point where this crate touches the grouping engine.

mod error;

pub mod detail;
pub mod export;
pub mod filter;
pub mod generator;
pub mod model;
pub mod profile;

pub use detail::{
    BehavioralProfile, CaptureRatePoint, CompetitorDetail, ConsistencyPoint, DetailMetrics,
    IntradayBehavior, PriceMovement, PricingLag,
};
pub use error::ExportError;
pub use export::{export_csv, export_file_name, save_csv, CSV_HEADERS};
pub use filter::{facets, matches_search, search, CompetitorFilters, Facets, TimeRange};
pub use generator::{generate_competitor_data, CompetitorGenerator};
pub use model::{
    is_groupable, to_records, CompetitorData, ConsistencyCategory, StrategyTag, GROUPABLE_FIELDS,
};
pub use profile::{profile_for, CompetitorProfile, IntradayFrequency};
