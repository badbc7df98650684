//! Handler modules for roster-api.

pub mod analytics;
pub mod auth;
pub mod config;
pub mod records;
pub mod trash;

use roster_core::{Record, RecordView};

use crate::state::AppState;

/// Project stored records into served views.
///
/// Positions are derived from sheet order (data starts at row 2); age and
/// tier are evaluated as of the server's local date.
pub(crate) fn derive_views(records: Vec<Record>, state: &AppState) -> Vec<RecordView> {
    let today = chrono::Local::now().date_naive();
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| RecordView::derive(index + 2, record, today, &state.thresholds))
        .collect()
}
