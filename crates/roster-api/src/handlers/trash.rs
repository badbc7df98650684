//! Trash listing and restore.

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use roster_core::RecordView;

use crate::error::ApiError;
use crate::session::AdminSession;
use crate::state::AppState;

use super::derive_views;

/// List archived records with their trash-table positions.
pub async fn list_trash(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<RecordView>>, ApiError> {
    let records = state.trash.list().await?;
    Ok(Json(derive_views(records, &state)))
}

/// Restore the trash record at a 1-based row position to the live table.
pub async fn restore_record(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(row): Path<usize>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.trash.restore(row).await?;

    info!(
        subsystem = "api",
        component = "trash",
        op = "restore",
        row = row,
        "Record restored"
    );
    Ok(Json(serde_json::json!({ "success": true })))
}
