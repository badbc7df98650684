//! Record counts by location, seeded from the taxonomy.
//!
//! Counts are seeded with every registered location at zero so empty
//! locations stay visible. Labels present in the data but not in the
//! taxonomy are still counted under their literal value, appended after the
//! seeded entries in first-seen order.

use serde::{Deserialize, Serialize};

use crate::record::{fields, RecordView};
use crate::taxonomy::LocationTaxonomy;

/// One location with its record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub name: String,
    pub count: usize,
}

fn count_labels<'a>(
    seeded: impl Iterator<Item = &'a str>,
    labels: impl Iterator<Item = &'a str>,
) -> Vec<LocationCount> {
    let mut counts: Vec<LocationCount> = seeded
        .map(|name| LocationCount {
            name: name.to_string(),
            count: 0,
        })
        .collect();

    for label in labels {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        match counts
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(label))
        {
            Some(entry) => entry.count += 1,
            None => counts.push(LocationCount {
                name: label.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Record counts per desa, every registered desa present.
pub fn desa_counts(views: &[RecordView], taxonomy: &LocationTaxonomy) -> Vec<LocationCount> {
    count_labels(
        taxonomy.desa_names(),
        views.iter().map(|v| v.record.cell(fields::DESA)),
    )
}

/// Record counts per kelompok within one desa, every registered kelompok
/// of that desa present. Unregistered desa values yield only the literal
/// labels found in the data.
pub fn kelompok_counts(
    views: &[RecordView],
    taxonomy: &LocationTaxonomy,
    desa: &str,
) -> Vec<LocationCount> {
    let seeded = taxonomy
        .kelompok_for(desa)
        .map(|list| list.iter().map(String::as_str).collect::<Vec<_>>())
        .unwrap_or_default();
    count_labels(
        seeded.into_iter(),
        views
            .iter()
            .filter(|v| v.record.cell(fields::DESA).eq_ignore_ascii_case(desa))
            .map(|v| v.record.cell(fields::KELOMPOK)),
    )
}
