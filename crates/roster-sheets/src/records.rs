//! Record repository over the Sheets values API.
//!
//! Implements the rows-as-objects contract: the first row of a table is the
//! header/schema, every subsequent row becomes one [`Record`] keyed by those
//! headers. Writes map supplied field names case-insensitively onto the
//! table's existing header order.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use roster_core::{Error, Record, RecordStore, Result};

use crate::client::SheetsClient;

/// Build records from raw rows, the first row being the header.
///
/// Short rows are padded with empty strings; cells beyond the header width
/// are dropped.
pub(crate) fn rows_to_records(rows: Vec<Vec<String>>) -> Vec<Record> {
    let mut iter = rows.into_iter();
    let Some(headers) = iter.next() else {
        return Vec::new();
    };
    iter.map(|row| {
        Record::from_pairs(headers.iter().enumerate().map(|(i, header)| {
            (
                header.clone(),
                row.get(i).cloned().unwrap_or_default(),
            )
        }))
    })
    .collect()
}

/// Map a record onto a header order; unmatched headers become empty cells.
pub(crate) fn record_to_row(headers: &[String], record: &Record) -> Vec<String> {
    headers
        .iter()
        .map(|h| record.get(h).unwrap_or_default().to_string())
        .collect()
}

/// Sheets implementation of [`RecordStore`].
pub struct SheetRecordRepository {
    client: Arc<SheetsClient>,
}

impl SheetRecordRepository {
    /// Create a repository over the given client.
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self { client }
    }

    /// Read a table's header row.
    async fn headers(&self, table: &str) -> Result<Vec<String>> {
        let mut rows = self.client.get_values(&format!("{}!1:1", table)).await?;
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::Sheets(format!(
                "table '{}' has no header row",
                table
            )));
        }
        Ok(rows.remove(0))
    }
}

#[async_trait]
impl RecordStore for SheetRecordRepository {
    async fn read_all(&self, table: &str) -> Result<Vec<Record>> {
        let start = Instant::now();
        let rows = self.client.get_values(table).await?;
        let records = rows_to_records(rows);

        debug!(
            subsystem = "sheets",
            component = "records",
            op = "read_all",
            table = table,
            record_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Read table"
        );
        Ok(records)
    }

    async fn append(&self, record: &Record, table: &str) -> Result<()> {
        let headers = self.headers(table).await?;
        let row = record_to_row(&headers, record);
        self.client.append_row(table, row).await?;

        info!(
            subsystem = "sheets",
            component = "records",
            op = "append",
            table = table,
            "Appended record"
        );
        Ok(())
    }

    async fn update_at(&self, position: usize, record: &Record, table: &str) -> Result<()> {
        if position < 2 {
            return Err(Error::RowOutOfRange {
                table: table.to_string(),
                position,
            });
        }
        let headers = self.headers(table).await?;
        let row = record_to_row(&headers, record);
        self.client.update_row(table, position, row).await?;

        info!(
            subsystem = "sheets",
            component = "records",
            op = "update_at",
            table = table,
            row = position,
            "Updated record"
        );
        Ok(())
    }

    async fn delete_at(&self, position: usize, table: &str) -> Result<()> {
        if position < 2 {
            return Err(Error::RowOutOfRange {
                table: table.to_string(),
                position,
            });
        }
        self.client.delete_row(table, position).await?;

        info!(
            subsystem = "sheets",
            component = "records",
            op = "delete_at",
            table = table,
            row = position,
            "Deleted record"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_to_records_pads_short_rows() {
        let records = rows_to_records(rows(&[
            &["Nama", "Desa", "Kelompok"],
            &["Budi", "Gayungan"],
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cell("Nama"), "Budi");
        assert_eq!(records[0].cell("Kelompok"), "");
    }

    #[test]
    fn test_rows_to_records_empty_table() {
        assert!(rows_to_records(Vec::new()).is_empty());
        assert!(rows_to_records(rows(&[&["Nama"]])).is_empty());
    }

    #[test]
    fn test_record_to_row_matches_header_order_case_insensitively() {
        let headers: Vec<String> = ["Nama", "TANGGAL LAHIR", "Desa"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let record = Record::from_pairs([
            ("nama", "Budi"),
            ("Tanggal Lahir", "15/08/2015"),
        ]);
        let row = record_to_row(&headers, &record);
        assert_eq!(row, vec!["Budi", "15/08/2015", ""]);
    }
}
