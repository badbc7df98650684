//! # roster-sheets
//!
//! Google Sheets persistence layer for the generus roster.
//!
//! This crate provides:
//! - A thin client for the Sheets values API
//! - [`RecordStore`]/[`ConfigStore`] implementations over one spreadsheet
//! - The trash move/restore flow
//! - An in-memory store for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use roster_sheets::SheetsDatabase;
//! use roster_core::{RecordStore, defaults};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = SheetsDatabase::from_env()?;
//!     let records = db.records.read_all(defaults::LIVE_TABLE).await?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod memory;
pub mod records;
pub mod trash;

use std::sync::Arc;

use roster_core::Result;

pub use client::SheetsClient;
pub use config::SheetConfigRepository;
pub use memory::InMemoryStore;
pub use records::SheetRecordRepository;
pub use trash::TrashFlow;

// Re-export core types
pub use roster_core::*;

/// Repository bundle over one spreadsheet.
pub struct SheetsDatabase {
    pub records: SheetRecordRepository,
    pub config: SheetConfigRepository,
}

impl SheetsDatabase {
    /// Connect using environment configuration.
    pub fn from_env() -> Result<Self> {
        let client = Arc::new(SheetsClient::from_env()?);
        Ok(Self::with_client(client))
    }

    /// Build over an existing client.
    pub fn with_client(client: Arc<SheetsClient>) -> Self {
        Self {
            records: SheetRecordRepository::new(client.clone()),
            config: SheetConfigRepository::new(client),
        }
    }
}
