//! The trash flow: soft delete by move, and restore.
//!
//! There is no deleted flag on the live table. Deleting a record appends a
//! copy plus deletion metadata to the trash table, then physically removes
//! the live row. The two calls are independent remote writes with no
//! transaction around them (the store contract has none); a failure between
//! them leaves the archived copy in place and the live row untouched-or-
//! removed accordingly, reported once to the caller.

use std::sync::Arc;

use tracing::info;

use roster_core::defaults::{LIVE_TABLE, TRASH_TABLE};
use roster_core::record::fields;
use roster_core::{dates, DeleteRecordRequest, Error, Record, RecordStore, Result};

/// Boolean flag rendering used in the trash table.
fn flag(value: bool) -> &'static str {
    if value {
        "Ya"
    } else {
        "Tidak"
    }
}

/// Move/restore operations between the live table and the trash table.
pub struct TrashFlow {
    store: Arc<dyn RecordStore>,
    live_table: String,
    trash_table: String,
}

impl TrashFlow {
    /// Create a flow over the default table names.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_tables(store, LIVE_TABLE, TRASH_TABLE)
    }

    /// Create a flow over custom table names.
    pub fn with_tables(
        store: Arc<dyn RecordStore>,
        live_table: impl Into<String>,
        trash_table: impl Into<String>,
    ) -> Self {
        Self {
            store,
            live_table: live_table.into(),
            trash_table: trash_table.into(),
        }
    }

    /// Fetch the record at a 1-based position of a table.
    async fn record_at(&self, position: usize, table: &str) -> Result<Record> {
        let records = self.store.read_all(table).await?;
        position
            .checked_sub(2)
            .and_then(|index| records.get(index).cloned())
            .ok_or_else(|| Error::RowOutOfRange {
                table: table.to_string(),
                position,
            })
    }

    /// List every trash record in sheet order.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.store.read_all(&self.trash_table).await
    }

    /// Move the live record at `position` to the trash.
    ///
    /// The archived copy carries the record's fields plus the deletion
    /// metadata columns (marriage flag, transfer flag, reason, deletion
    /// time). The live row is removed afterwards, shifting subsequent
    /// positions up by one.
    pub async fn move_to_trash(
        &self,
        position: usize,
        request: &DeleteRecordRequest,
    ) -> Result<()> {
        let mut archived = self.record_at(position, &self.live_table).await?;
        archived.set(fields::MENIKAH, flag(request.married));
        archived.set(fields::PINDAH, flag(request.moved));
        archived.set(fields::ALASAN, request.reason.clone().unwrap_or_default());
        archived.set(fields::DIHAPUS_PADA, dates::now_timestamp());

        self.store.append(&archived, &self.trash_table).await?;
        self.store.delete_at(position, &self.live_table).await?;

        info!(
            subsystem = "sheets",
            component = "trash",
            op = "move_to_trash",
            table = %self.live_table,
            row = position,
            "Moved record to trash"
        );
        Ok(())
    }

    /// Restore the trash record at `position` to the live table.
    ///
    /// Deletion metadata is stripped and the last-write timestamp is
    /// re-stamped; the trash row is removed afterwards.
    pub async fn restore(&self, position: usize) -> Result<()> {
        let mut record = self.record_at(position, &self.trash_table).await?;
        record.remove(fields::MENIKAH);
        record.remove(fields::PINDAH);
        record.remove(fields::ALASAN);
        record.remove(fields::DIHAPUS_PADA);
        record.set(fields::TIMESTAMP, dates::now_timestamp());

        self.store.append(&record, &self.live_table).await?;
        self.store.delete_at(position, &self.trash_table).await?;

        info!(
            subsystem = "sheets",
            component = "trash",
            op = "restore",
            table = %self.trash_table,
            row = position,
            "Restored record from trash"
        );
        Ok(())
    }
}
