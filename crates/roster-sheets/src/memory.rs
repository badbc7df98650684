//! In-memory store for tests.
//!
//! Implements [`RecordStore`] and [`ConfigStore`] over plain vectors with
//! the same positional semantics as the sheet-backed repositories (header
//! row at position 1, data from position 2, physical removal with shift on
//! delete), so unit and API tests can exercise the full flows without a
//! network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use roster_core::{ConfigStore, Error, Record, RecordStore, Result};

use crate::records::{record_to_row, rows_to_records};

/// In-process store holding raw rows per table, header first.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, Vec<Vec<String>>>>,
    config: Mutex<HashMap<String, JsonValue>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a table with the given header and data rows.
    pub fn with_table<S: Into<String>>(
        self,
        name: &str,
        header: Vec<S>,
        data: Vec<Vec<S>>,
    ) -> Self {
        {
            let mut tables = self.tables.lock().expect("store lock poisoned");
            let mut rows: Vec<Vec<String>> =
                vec![header.into_iter().map(Into::into).collect()];
            rows.extend(
                data.into_iter()
                    .map(|row| row.into_iter().map(Into::into).collect()),
            );
            tables.insert(name.to_string(), rows);
        }
        self
    }

    /// Builder: seed a config key.
    pub fn with_config(self, key: &str, value: JsonValue) -> Self {
        self.config
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
        self
    }

    /// Raw rows of a table including the header, for assertions.
    pub fn raw_rows(&self, name: &str) -> Vec<Vec<String>> {
        self.tables
            .lock()
            .expect("store lock poisoned")
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    fn with_rows<T>(
        &self,
        table: &str,
        f: impl FnOnce(&mut Vec<Vec<String>>) -> Result<T>,
    ) -> Result<T> {
        let mut tables = self.tables.lock().expect("store lock poisoned");
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| Error::NotFound(format!("table '{}'", table)))?;
        f(rows)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn read_all(&self, table: &str) -> Result<Vec<Record>> {
        self.with_rows(table, |rows| Ok(rows_to_records(rows.clone())))
    }

    async fn append(&self, record: &Record, table: &str) -> Result<()> {
        self.with_rows(table, |rows| {
            let headers = rows
                .first()
                .cloned()
                .ok_or_else(|| Error::Sheets(format!("table '{}' has no header row", table)))?;
            rows.push(record_to_row(&headers, record));
            Ok(())
        })
    }

    async fn update_at(&self, position: usize, record: &Record, table: &str) -> Result<()> {
        self.with_rows(table, |rows| {
            if position < 2 || position > rows.len() {
                return Err(Error::RowOutOfRange {
                    table: table.to_string(),
                    position,
                });
            }
            let headers = rows[0].clone();
            rows[position - 1] = record_to_row(&headers, record);
            Ok(())
        })
    }

    async fn delete_at(&self, position: usize, table: &str) -> Result<()> {
        self.with_rows(table, |rows| {
            if position < 2 || position > rows.len() {
                return Err(Error::RowOutOfRange {
                    table: table.to_string(),
                    position,
                });
            }
            rows.remove(position - 1);
            Ok(())
        })
    }
}

#[async_trait]
impl ConfigStore for InMemoryStore {
    async fn read_all(&self) -> Result<HashMap<String, JsonValue>> {
        Ok(self.config.lock().expect("store lock poisoned").clone())
    }

    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        Ok(self
            .config
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<()> {
        self.config
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }
}
