//! Low-level client for the Google Sheets values API.
//!
//! Wraps a `reqwest` client with the handful of calls the repositories
//! need: ranged reads, row append, full-row update, and row deletion via
//! `batchUpdate`. Every failure is mapped to [`Error::Sheets`] at this
//! boundary and reported once; there is no retry or backoff.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

use roster_core::defaults::{SHEETS_BASE_URL, SHEETS_TIMEOUT_SECS};
use roster_core::{Error, Result};

/// Environment variable naming the spreadsheet to operate on.
pub const ENV_SPREADSHEET_ID: &str = "ROSTER_SPREADSHEET_ID";

/// Environment variable holding the OAuth bearer token for the Sheets API.
pub const ENV_SHEETS_TOKEN: &str = "ROSTER_SHEETS_TOKEN";

/// Environment variable overriding the API base URL (used by tests).
pub const ENV_SHEETS_BASE_URL: &str = "ROSTER_SHEETS_BASE_URL";

/// Client for one spreadsheet.
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
    /// Numeric sheet ids by tab title, resolved once from spreadsheet
    /// metadata. `deleteDimension` addresses tabs by numeric id, not title.
    sheet_ids: RwLock<HashMap<String, i64>>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

/// Render one cell value as the string the rest of the system sees.
///
/// The values API returns heterogeneous JSON scalars; empty cells read as
/// the empty string, never null.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsClient {
    /// Create a client for one spreadsheet.
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(SHEETS_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
            sheet_ids: RwLock::new(HashMap::new()),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        let spreadsheet_id = std::env::var(ENV_SPREADSHEET_ID)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_SPREADSHEET_ID)))?;
        let token = std::env::var(ENV_SHEETS_TOKEN)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_SHEETS_TOKEN)))?;

        let mut client = Self::new(spreadsheet_id, token)?;
        if let Ok(base) = std::env::var(ENV_SHEETS_BASE_URL) {
            client.base_url = base;
        }

        info!(
            subsystem = "sheets",
            component = "client",
            op = "init",
            "Sheets client initialized"
        );
        Ok(client)
    }

    /// Override the API base URL (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    /// Turn a non-2xx response into [`Error::Sheets`] carrying status and body.
    async fn ok_or_sheets(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Sheets(format!("status {}: {}", status, body)))
    }

    /// Read a range of cells as strings.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let resp = self
            .http
            .get(self.values_url(range))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        let resp = Self::ok_or_sheets(resp).await?;

        let body: ValueRange = resp
            .json()
            .await
            .map_err(|e| Error::Sheets(format!("malformed value range: {}", e)))?;

        debug!(
            subsystem = "sheets",
            component = "client",
            op = "get_values",
            record_count = body.values.len(),
            "Fetched values"
        );
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Append one row after the last data row of a table.
    pub async fn append_row(&self, table: &str, row: Vec<String>) -> Result<()> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(table)
        );
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        Self::ok_or_sheets(resp).await?;
        Ok(())
    }

    /// Overwrite one full row at a 1-based position.
    pub async fn update_row(&self, table: &str, position: usize, row: Vec<String>) -> Result<()> {
        let range = format!("{}!A{}", table, position);
        let url = format!("{}?valueInputOption=USER_ENTERED", self.values_url(&range));
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "range": range, "values": [row] }))
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        Self::ok_or_sheets(resp).await?;
        Ok(())
    }

    /// Physically delete one row at a 1-based position.
    pub async fn delete_row(&self, table: &str, position: usize) -> Result<()> {
        let sheet_id = self.sheet_id(table).await?;
        let url = format!("{}/{}:batchUpdate", self.base_url, self.spreadsheet_id);
        // deleteDimension takes a 0-based, end-exclusive row range.
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": position - 1,
                        "endIndex": position,
                    }
                }
            }]
        });
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        Self::ok_or_sheets(resp).await?;
        Ok(())
    }

    /// Resolve the numeric sheet id of a tab, cached after the first call.
    async fn sheet_id(&self, table: &str) -> Result<i64> {
        if let Some(id) = self.sheet_ids.read().await.get(table) {
            return Ok(*id);
        }

        let url = format!(
            "{}/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;
        let resp = Self::ok_or_sheets(resp).await?;
        let meta: SpreadsheetMeta = resp
            .json()
            .await
            .map_err(|e| Error::Sheets(format!("malformed spreadsheet metadata: {}", e)))?;

        let mut cache = self.sheet_ids.write().await;
        for sheet in &meta.sheets {
            cache.insert(sheet.properties.title.clone(), sheet.properties.sheet_id);
        }
        meta.sheets
            .iter()
            .find(|s| s.properties.title.eq_ignore_ascii_case(table))
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| Error::NotFound(format!("sheet tab '{}'", table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_scalars() {
        assert_eq!(cell_to_string(json!("Budi")), "Budi");
        assert_eq!(cell_to_string(json!(12)), "12");
        assert_eq!(cell_to_string(json!(true)), "true");
        assert_eq!(cell_to_string(serde_json::Value::Null), "");
    }

    #[test]
    fn test_values_url_encodes_range() {
        let client = SheetsClient::new("sheet-id", "token").unwrap();
        let url = client.values_url("Generus!A1:Z1");
        assert!(url.ends_with("/sheet-id/values/Generus%21A1%3AZ1"));
    }
}
