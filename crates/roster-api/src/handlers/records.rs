//! Record CRUD, duplicate/mismatch views, and CSV export.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;

use roster_core::defaults::LIVE_TABLE;
use roster_core::record::fields;
use roster_core::{
    duplicate_groups, paginate, DeleteRecordRequest, PaginationMeta, Record, RecordView,
};

use crate::error::ApiError;
use crate::query::ListRecordsQuery;
use crate::session::AdminSession;
use crate::state::AppState;

use super::derive_views;

/// Column order of the CSV export.
const EXPORT_COLUMNS: [&str; 8] = [
    fields::NAMA,
    fields::DESA,
    fields::KELOMPOK,
    fields::GENDER,
    fields::TANGGAL_LAHIR,
    fields::HOBI,
    fields::SKILL,
    fields::TIMESTAMP,
];

/// Standardized list response wrapper with pagination metadata.
#[derive(Debug, Serialize)]
pub struct ListRecordsResponse {
    pub data: Vec<RecordView>,
    pub pagination: PaginationMeta,
}

/// List records with filtering, sorting, and pagination.
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<Json<ListRecordsResponse>, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    let views = derive_views(records, &state);
    let filtered = query.to_filter().apply(views);
    let (page, per_page) = query.page_params();
    let (data, pagination) = paginate(filtered, page, per_page);
    Ok(Json(ListRecordsResponse { data, pagination }))
}

/// Append a new record. The last-write timestamp is stamped server-side.
pub async fn create_record(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(mut record): Json<Record>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.flags.allow_add {
        return Err(ApiError::Forbidden("adding records is disabled".to_string()));
    }
    if record.cell(fields::NAMA).trim().is_empty() {
        return Err(ApiError::BadRequest("Nama is required".to_string()));
    }
    record.set(fields::TIMESTAMP, roster_core::dates::now_timestamp());
    state.store.append(&record, LIVE_TABLE).await?;

    info!(
        subsystem = "api",
        component = "records",
        op = "create",
        "Record created"
    );
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "success": true }))))
}

/// Overwrite the record at a 1-based row position.
pub async fn update_record(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(row): Path<usize>,
    Json(mut record): Json<Record>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.flags.allow_edit {
        return Err(ApiError::Forbidden("editing records is disabled".to_string()));
    }
    if record.cell(fields::NAMA).trim().is_empty() {
        return Err(ApiError::BadRequest("Nama is required".to_string()));
    }
    record.set(fields::TIMESTAMP, roster_core::dates::now_timestamp());
    state.store.update_at(row, &record, LIVE_TABLE).await?;

    info!(
        subsystem = "api",
        component = "records",
        op = "update",
        row = row,
        "Record updated"
    );
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Move the record at a 1-based row position to the trash.
pub async fn delete_record(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(row): Path<usize>,
    body: Option<Json<DeleteRecordRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.flags.allow_delete {
        return Err(ApiError::Forbidden(
            "deleting records is disabled".to_string(),
        ));
    }
    let request = body.map(|Json(b)| b).unwrap_or_default();
    state.trash.move_to_trash(row, &request).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Duplicate-mode view: records sharing a normalized name, unpaginated.
pub async fn list_duplicates(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordView>>, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    Ok(Json(duplicate_groups(derive_views(records, &state))))
}

/// Records whose desa/kelompok pair is not in the taxonomy.
pub async fn list_mismatches(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordView>>, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    let views = derive_views(records, &state);
    Ok(Json(state.taxonomy.mismatches(views)))
}

/// Escape one CSV cell: quote when it contains a comma, quote, or newline.
fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build the export document for a set of views.
fn build_csv(views: &[RecordView]) -> String {
    let mut out = String::new();
    let header: Vec<&str> = EXPORT_COLUMNS
        .iter()
        .copied()
        .chain(["Umur", "Jenjang Kelas"])
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for view in views {
        let mut cells: Vec<String> = EXPORT_COLUMNS
            .iter()
            .map(|col| csv_cell(view.record.cell(col)))
            .collect();
        cells.push(csv_cell(&view.umur));
        cells.push(csv_cell(&view.jenjang));
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// CSV export of the currently filtered dataset (unpaginated).
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.store.read_all(LIVE_TABLE).await?;
    let views = derive_views(records, &state);
    let filtered = query.to_filter().apply(views);
    let csv = build_csv(&filtered);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"generus.csv\"",
            ),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::JenjangThresholds;

    #[test]
    fn test_csv_cell_escaping() {
        assert_eq!(csv_cell("Budi"), "Budi");
        assert_eq!(csv_cell("a,b"), "\"a,b\"");
        assert_eq!(csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_cell("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_build_csv_header_and_derived_columns() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let record = Record::from_pairs([
            ("Nama", "Budi"),
            ("Desa", "Gayungan"),
            ("Tanggal Lahir", "15/08/2015"),
        ]);
        let view = RecordView::derive(2, record, today, &JenjangThresholds::default());
        let csv = build_csv(&[view]);

        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Nama,Desa,"));
        assert!(header.ends_with("Umur,Jenjang Kelas"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Budi,Gayungan,"));
        assert!(row.ends_with("8,Caberawit A"));
    }
}
