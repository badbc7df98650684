//! Shared config blob over a two-column key/value table.
//!
//! Values are stored as JSON text in the second column. Reads are wholesale,
//! writes are key-by-key upserts with last-writer-wins semantics — no
//! locking, no versioning.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::info;

use roster_core::defaults::CONFIG_TABLE;
use roster_core::{ConfigStore, Result};

use crate::client::SheetsClient;

/// Sheets implementation of [`ConfigStore`].
pub struct SheetConfigRepository {
    client: Arc<SheetsClient>,
    table: String,
}

/// A cell that fails to parse as JSON is treated as a plain string value,
/// so hand-edited config rows keep working.
fn parse_value(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

impl SheetConfigRepository {
    /// Create a repository over the default config table.
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self::with_table(client, CONFIG_TABLE)
    }

    /// Create a repository over a custom table.
    pub fn with_table(client: Arc<SheetsClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Raw rows including the header, as stored.
    async fn raw_rows(&self) -> Result<Vec<Vec<String>>> {
        self.client.get_values(&self.table).await
    }
}

#[async_trait]
impl ConfigStore for SheetConfigRepository {
    async fn read_all(&self) -> Result<HashMap<String, JsonValue>> {
        let rows = self.raw_rows().await?;
        Ok(rows
            .into_iter()
            .skip(1) // header row
            .filter_map(|row| {
                let key = row.first()?.trim().to_string();
                if key.is_empty() {
                    return None;
                }
                let raw = row.get(1).map(String::as_str).unwrap_or("");
                Some((key, parse_value(raw)))
            })
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<()> {
        let serialized = serde_json::to_string(&value)?;
        let rows = self.raw_rows().await?;

        // Row 1 is the header; data rows map to positions 2..
        let existing = rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().map(String::as_str) == Some(key));

        match existing {
            Some((index, _)) => {
                self.client
                    .update_row(&self.table, index + 1, vec![key.to_string(), serialized])
                    .await?;
            }
            None => {
                self.client
                    .append_row(&self.table, vec![key.to_string(), serialized])
                    .await?;
            }
        }

        info!(
            subsystem = "sheets",
            component = "config",
            op = "set",
            config_key = key,
            "Wrote config key"
        );
        Ok(())
    }
}
