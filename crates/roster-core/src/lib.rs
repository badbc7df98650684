//! # roster-core
//!
//! Core types, domain logic, and storage traits for the generus roster.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the other roster crates depend on. It performs no I/O:
//! the spreadsheet boundary is expressed as traits implemented by
//! `roster-sheets`.

pub mod analytics;
pub mod categorize;
pub mod dates;
pub mod defaults;
pub mod duplicates;
pub mod error;
pub mod filter;
pub mod jenjang;
pub mod logging;
pub mod record;
pub mod taxonomy;
pub mod traits;

// Re-export commonly used types at crate root
pub use analytics::{desa_counts, kelompok_counts, LocationCount};
pub use categorize::{
    categorize, category_counts, discover_keywords, CategoryCount, KeywordMap, TermCount,
};
pub use duplicates::duplicate_groups;
pub use error::{Error, Result};
pub use filter::{paginate, PaginationMeta, RecordFilter};
pub use jenjang::{Jenjang, JenjangThresholds};
pub use record::{fields, Record, RecordView};
pub use taxonomy::LocationTaxonomy;
pub use traits::{ConfigStore, DeleteRecordRequest, RecordStore};
