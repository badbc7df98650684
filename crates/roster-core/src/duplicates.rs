//! Duplicate detection over the record set.
//!
//! Groups records by normalized name (lowercased, trimmed) and keeps only
//! records whose group has at least two members. No fuzzy matching, exact
//! string equality after normalization.

use std::collections::HashMap;

use crate::record::RecordView;

/// Keep only records whose normalized name occurs at least twice.
///
/// The result is sorted name-ascending, then timestamp-descending within a
/// name group (most recent write first).
pub fn duplicate_groups(views: Vec<RecordView>) -> Vec<RecordView> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for view in &views {
        *counts.entry(view.name_normalized()).or_default() += 1;
    }

    let mut kept: Vec<RecordView> = views
        .into_iter()
        .filter(|v| counts.get(&v.name_normalized()).copied().unwrap_or(0) >= 2)
        .collect();

    kept.sort_by(|a, b| {
        a.name_normalized()
            .cmp(&b.name_normalized())
            .then_with(|| b.timestamp().cmp(&a.timestamp()))
    });
    kept
}
