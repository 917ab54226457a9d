//! # eqalert common library
//!
//! Normalization of earthquake bulletins into flat display records:
//! - Document tree model and the default JSON tree parser
//! - Intensity scale and localized label lookup
//! - Hypocenter coordinate parsing
//! - Station intensity aggregation
//! - Information and report normalizers
//! - Report duplication tracking
//! - Batch conversion and configuration loading

pub mod areas;
pub mod batch;
pub mod config;
pub mod coordinate;
pub mod document;
pub mod error;
pub mod information;
pub mod intensity;
pub mod record;
pub mod report;
pub mod time;
pub mod tracker;

pub use batch::{convert_information, convert_reports, FetchedDocument};
pub use document::{DocumentParser, JsonDocumentParser, Node, Value};
pub use error::{Error, Result};
pub use information::normalize_information;
pub use intensity::IntensityLevel;
pub use record::{AreaMap, Epicenter, NormalizedRecord};
pub use report::normalize_report;
pub use tracker::{DuplicationTracker, JsonFileStore, TrackerEntry, TrackerStore};
