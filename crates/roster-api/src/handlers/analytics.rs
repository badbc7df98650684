//! Seeded per-location and per-category record counts.

use axum::extract::{Path, State};
use axum::Json;

use roster_core::defaults::LIVE_TABLE;
use roster_core::{
    category_counts, desa_counts, kelompok_counts, CategoryCount, KeywordMap, LocationCount,
};

use crate::error::ApiError;
use crate::state::AppState;

use super::config::{keyword_column, keyword_key};
use super::derive_views;

/// Record counts per desa; every registered desa appears, zero-counted
/// when empty.
pub async fn desa_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationCount>>, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    let views = derive_views(records, &state);
    Ok(Json(desa_counts(&views, &state.taxonomy)))
}

/// Record counts per kelompok within one desa.
pub async fn kelompok_summary(
    State(state): State<AppState>,
    Path(desa): Path<String>,
) -> Result<Json<Vec<LocationCount>>, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    let views = derive_views(records, &state);
    Ok(Json(kelompok_counts(&views, &state.taxonomy, &desa)))
}

/// Record counts per keyword category for a hobby/skill field.
pub async fn keyword_summary(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let column = keyword_column(&field)?;
    let map: KeywordMap = state
        .config
        .get(&keyword_key(&field.to_lowercase()))
        .await?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();

    let records = state.store.read_all(LIVE_TABLE).await?;
    let counts = category_counts(
        records
            .iter()
            .map(|r| r.cell(column))
            .filter(|t| !t.is_empty()),
        &map,
    );
    Ok(Json(counts))
}
