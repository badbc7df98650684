//! Shared config endpoints: per-view column visibility and the hobby/skill
//! keyword-category maps, plus the advisory keyword discovery pass.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use roster_core::defaults::{
    CONFIG_KEY_COLUMNS_PREFIX, CONFIG_KEY_KEYWORDS_PREFIX, LIVE_TABLE,
};
use roster_core::record::fields;
use roster_core::{discover_keywords, KeywordMap, TermCount};

use crate::error::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

fn column_key(view: &str) -> String {
    format!("{}::{}", CONFIG_KEY_COLUMNS_PREFIX, view)
}

pub(crate) fn keyword_key(field: &str) -> String {
    format!("{}::{}", CONFIG_KEY_KEYWORDS_PREFIX, field)
}

/// Resolve a keyword-map field name to its record column.
pub(crate) fn keyword_column(field: &str) -> Result<&'static str, ApiError> {
    match field.to_lowercase().as_str() {
        "hobi" => Ok(fields::HOBI),
        "skill" => Ok(fields::SKILL),
        other => Err(ApiError::BadRequest(format!(
            "unknown keyword field '{}'",
            other
        ))),
    }
}

/// Column visibility list for one view; unset views read as empty.
pub async fn get_columns(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let columns = state
        .config
        .get(&column_key(&view))
        .await?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();
    Ok(Json(columns))
}

/// Replace the column visibility list for one view (last-writer-wins).
pub async fn put_columns(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(view): Path<String>,
    Json(columns): Json<Vec<String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .config
        .set(&column_key(&view), serde_json::json!(columns))
        .await?;

    info!(
        subsystem = "api",
        component = "config",
        op = "put_columns",
        config_key = %column_key(&view),
        "Column preferences saved"
    );
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Keyword-category map for a field; unset maps read as empty.
pub async fn get_keywords(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<KeywordMap>, ApiError> {
    keyword_column(&field)?;
    let map = state
        .config
        .get(&keyword_key(&field.to_lowercase()))
        .await?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();
    Ok(Json(map))
}

/// Replace the keyword-category map for a field (last-writer-wins).
pub async fn put_keywords(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(field): Path<String>,
    Json(map): Json<KeywordMap>,
) -> Result<Json<serde_json::Value>, ApiError> {
    keyword_column(&field)?;
    state
        .config
        .set(&keyword_key(&field.to_lowercase()), serde_json::json!(map))
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoverQuery {
    pub limit: Option<usize>,
}

/// Frequent terms from uncategorized text — candidate new keywords.
///
/// Purely advisory; nothing is categorized or written by this endpoint.
pub async fn discover_terms(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<Vec<TermCount>>, ApiError> {
    let column = keyword_column(&field)?;
    let map: KeywordMap = state
        .config
        .get(&keyword_key(&field.to_lowercase()))
        .await?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    let records = state.store.read_all(LIVE_TABLE).await?;
    let terms = discover_keywords(
        records.iter().map(|r| r.cell(column)).filter(|t| !t.is_empty()),
        &map,
        query.limit,
    );
    Ok(Json(terms))
}
