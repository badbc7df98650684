//! Storage traits for the roster's persistence boundary.
//!
//! These traits define the contract of the backing spreadsheet store,
//! enabling pluggable backends and testability: the Sheets implementation
//! lives in `roster-sheets`, alongside an in-memory double for tests.
//!
//! ## Positional identity
//!
//! Row positions are 1-based and include the header: position 1 is the
//! header row, data rows start at position 2. Deleting a row physically
//! removes it and shifts every subsequent row up by one, so any cached
//! position is invalidated by any write.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::error::Result;
use crate::record::Record;

/// Deletion metadata supplied when a record is moved to the trash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRecordRequest {
    /// The member left the roster through marriage.
    #[serde(default)]
    pub married: bool,
    /// The member moved away / transferred.
    #[serde(default)]
    pub moved: bool,
    /// Free-text reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Rows-as-objects store over a spreadsheet table.
///
/// The first underlying row is the header/schema; every subsequent row is
/// one [`Record`] keyed by those headers. A missing cell reads as the empty
/// string, never null.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every data row of a table in sheet order.
    ///
    /// The caller derives a record's position as `index + 2`.
    async fn read_all(&self, table: &str) -> Result<Vec<Record>>;

    /// Append a record as a new trailing row.
    ///
    /// Supplied field names are matched case-insensitively onto the table's
    /// existing header order; headers with no matching field are written as
    /// the empty string.
    async fn append(&self, record: &Record, table: &str) -> Result<()>;

    /// Overwrite one full row at a 1-based position (data starts at 2).
    ///
    /// Same header-order mapping as [`RecordStore::append`]. There is no
    /// partial update: absent fields become empty cells, overwriting any
    /// previously present values in those columns.
    async fn update_at(&self, position: usize, record: &Record, table: &str) -> Result<()>;

    /// Physically remove exactly one row, shifting subsequent rows up.
    async fn delete_at(&self, position: usize, table: &str) -> Result<()>;
}

/// Shared key→JSON config blob.
///
/// Holds the admin password, per-view column visibility lists, and the
/// hobby/skill keyword-category mappings. Writes are last-writer-wins with
/// no locking or versioning.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the whole blob.
    async fn read_all(&self) -> Result<HashMap<String, JsonValue>>;

    /// Read one key, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    /// Write one key (upsert, last-writer-wins).
    async fn set(&self, key: &str, value: JsonValue) -> Result<()>;
}
