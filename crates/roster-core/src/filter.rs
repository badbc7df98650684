//! Record filtering, sorting, and pagination.
//!
//! The filter is an explicit immutable value passed into a pure function;
//! the caller owns state transitions. Two mutually exclusive modes:
//!
//! - **Normal mode**: independent AND-combined predicates, result sorted by
//!   last-write timestamp descending (missing timestamps sort as epoch).
//! - **Duplicate mode**: only records whose normalized name occurs at least
//!   twice survive, sorted name-ascending then timestamp-descending. The
//!   other predicates are not applied in this mode by policy; the engine
//!   does not forcibly clear them.

use serde::{Deserialize, Serialize};

use crate::duplicates;
use crate::record::{fields, RecordView};

/// Immutable filter state for the record list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Desa membership (OR across values, case-insensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub desa: Vec<String>,

    /// Kelompok membership (OR across values, case-insensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kelompok: Vec<String>,

    /// Exact gender match, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Jenjang label membership (OR across values, case-insensitive).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jenjang: Vec<String>,

    /// Name substring, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Inclusive lower age bound. Only applied when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,

    /// Inclusive upper age bound. Only applied when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,

    /// Keep only records with a missing or unparseable birth date.
    #[serde(default)]
    pub missing_birth_date: bool,

    /// Duplicate mode: keep only records sharing a normalized name.
    #[serde(default)]
    pub duplicates_only: bool,
}

impl RecordFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a desa to include (OR logic).
    pub fn in_desa(mut self, desa: impl Into<String>) -> Self {
        self.desa.push(desa.into());
        self
    }

    /// Add a kelompok to include (OR logic).
    pub fn in_kelompok(mut self, kelompok: impl Into<String>) -> Self {
        self.kelompok.push(kelompok.into());
        self
    }

    /// Require an exact gender.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Add a jenjang label to include (OR logic).
    pub fn in_jenjang(mut self, jenjang: impl Into<String>) -> Self {
        self.jenjang.push(jenjang.into());
        self
    }

    /// Require the name to contain a substring.
    pub fn name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name = Some(needle.into());
        self
    }

    /// Require the derived age to fall within an inclusive range.
    pub fn age_between(mut self, min: u32, max: u32) -> Self {
        self.age_min = Some(min);
        self.age_max = Some(max);
        self
    }

    /// Keep only records without a parseable birth date.
    pub fn only_missing_birth_date(mut self, on: bool) -> Self {
        self.missing_birth_date = on;
        self
    }

    /// Switch to duplicate mode.
    pub fn only_duplicates(mut self, on: bool) -> Self {
        self.duplicates_only = on;
        self
    }

    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.desa.is_empty()
            && self.kelompok.is_empty()
            && self.gender.is_none()
            && self.jenjang.is_empty()
            && self.name.is_none()
            && self.age_min.is_none()
            && self.age_max.is_none()
            && !self.missing_birth_date
            && !self.duplicates_only
    }

    /// Whether one record survives the normal-mode predicates.
    pub fn matches(&self, view: &RecordView) -> bool {
        if !self.desa.is_empty() {
            let desa = view.record.cell(fields::DESA);
            if !self.desa.iter().any(|d| d.eq_ignore_ascii_case(desa)) {
                return false;
            }
        }
        if !self.kelompok.is_empty() {
            let kelompok = view.record.cell(fields::KELOMPOK);
            if !self
                .kelompok
                .iter()
                .any(|k| k.eq_ignore_ascii_case(kelompok))
            {
                return false;
            }
        }
        if let Some(gender) = &self.gender {
            if !gender.eq_ignore_ascii_case(view.record.cell(fields::GENDER)) {
                return false;
            }
        }
        if !self.jenjang.is_empty()
            && !self
                .jenjang
                .iter()
                .any(|j| j.eq_ignore_ascii_case(&view.jenjang))
        {
            return false;
        }
        if let Some(needle) = &self.name {
            let name = view.record.cell(fields::NAMA).to_lowercase();
            if !name.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if self.age_min.is_some() || self.age_max.is_some() {
            match view.age() {
                Some(age) => {
                    if age < self.age_min.unwrap_or(0) || age > self.age_max.unwrap_or(u32::MAX) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if self.missing_birth_date && !view.missing_birth_date() {
            return false;
        }
        true
    }

    /// Apply the filter: predicate pass plus mode-appropriate sort.
    pub fn apply(&self, views: Vec<RecordView>) -> Vec<RecordView> {
        if self.duplicates_only {
            return duplicates::duplicate_groups(views);
        }
        let mut kept: Vec<RecordView> = views.into_iter().filter(|v| self.matches(v)).collect();
        kept.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        kept
    }
}

/// Standardized pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of items matching the query (across all pages).
    pub total: usize,
    /// Maximum number of items per page.
    pub limit: usize,
    /// Number of items skipped.
    pub offset: usize,
    /// True if more items are available after this page.
    pub has_more: bool,
}

/// Slice one page out of a filtered, sorted list.
///
/// `page` is 1-based; page 0 is treated as page 1. Concatenating all valid
/// pages reconstructs the input exactly once per item.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> (Vec<T>, PaginationMeta) {
    let total = items.len();
    let offset = page.max(1).saturating_sub(1).saturating_mul(per_page);
    let data: Vec<T> = items.into_iter().skip(offset).take(per_page).collect();
    let meta = PaginationMeta {
        total,
        limit: per_page,
        offset,
        has_more: offset + data.len() < total,
    };
    (data, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jenjang::JenjangThresholds;
    use crate::record::Record;
    use chrono::NaiveDate;

    fn view(name: &str, desa: &str, gender: &str, birth: &str, ts: &str) -> RecordView {
        let record = Record::from_pairs([
            ("Nama", name),
            ("Desa", desa),
            ("Kelompok", "Gayungan 1"),
            ("Gender", gender),
            ("Tanggal Lahir", birth),
            ("Timestamp", ts),
        ]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        RecordView::derive(2, record, today, &JenjangThresholds::default())
    }

    fn sample() -> Vec<RecordView> {
        vec![
            view("Budi", "Gayungan", "L", "15/08/2015", "01/01/2024 10:00:00"),
            view("Siti", "Ketintang", "P", "10/02/2010", "02/01/2024 10:00:00"),
            view("Agus", "Gayungan", "L", "", "03/01/2024 10:00:00"),
            view("Dewi", "Wonocolo", "P", "01/06/2005", "04/01/2024 10:00:00"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_sorted_desc() {
        let out = RecordFilter::new().apply(sample());
        assert_eq!(out.len(), 4);
        let names: Vec<_> = out
            .iter()
            .map(|v| v.record.cell("Nama").to_string())
            .collect();
        assert_eq!(names, vec!["Dewi", "Agus", "Siti", "Budi"]);
    }

    #[test]
    fn test_desa_filter_case_insensitive() {
        let out = RecordFilter::new().in_desa("gayungan").apply(sample());
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.record.cell("Desa") == "Gayungan"));
    }

    #[test]
    fn test_combined_predicates_are_intersection() {
        let all = sample();
        let desa_only: Vec<_> = RecordFilter::new()
            .in_desa("Gayungan")
            .apply(all.clone())
            .iter()
            .map(|v| v.record.cell("Nama").to_string())
            .collect();
        let gender_only: Vec<_> = RecordFilter::new()
            .with_gender("L")
            .apply(all.clone())
            .iter()
            .map(|v| v.record.cell("Nama").to_string())
            .collect();
        let both: Vec<_> = RecordFilter::new()
            .in_desa("Gayungan")
            .with_gender("L")
            .apply(all)
            .iter()
            .map(|v| v.record.cell("Nama").to_string())
            .collect();

        for name in &both {
            assert!(desa_only.contains(name));
            assert!(gender_only.contains(name));
        }
        let intersection: Vec<_> = desa_only
            .iter()
            .filter(|n| gender_only.contains(n))
            .cloned()
            .collect();
        assert_eq!(both, intersection);
    }

    #[test]
    fn test_age_range_excludes_unparseable() {
        let out = RecordFilter::new().age_between(5, 15).apply(sample());
        // Agus has no birth date and must not survive an age-bounded filter.
        assert!(out.iter().all(|v| v.record.cell("Nama") != "Agus"));
        assert_eq!(out.len(), 2); // Budi (8), Siti (14)
    }

    #[test]
    fn test_missing_birth_date_mode() {
        let out = RecordFilter::new()
            .only_missing_birth_date(true)
            .apply(sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.cell("Nama"), "Agus");
    }

    #[test]
    fn test_name_substring() {
        let out = RecordFilter::new().name_contains("ud").apply(sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.cell("Nama"), "Budi");
    }

    #[test]
    fn test_jenjang_filter() {
        // Budi is 8 on the evaluation date → Caberawit A.
        let out = RecordFilter::new().in_jenjang("caberawit a").apply(sample());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.cell("Nama"), "Budi");
    }

    #[test]
    fn test_pagination_reconstructs_exactly() {
        let items: Vec<u32> = (0..23).collect();
        let mut seen = Vec::new();
        let mut page = 1;
        loop {
            let (data, meta) = paginate(items.clone(), page, 10);
            if data.is_empty() {
                break;
            }
            seen.extend(data);
            if !meta.has_more {
                break;
            }
            page += 1;
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_pagination_meta() {
        let items: Vec<u32> = (0..25).collect();
        let (data, meta) = paginate(items, 2, 10);
        assert_eq!(data, (10..20).collect::<Vec<u32>>());
        assert_eq!(meta.total, 25);
        assert_eq!(meta.offset, 10);
        assert!(meta.has_more);
    }

    #[test]
    fn test_pagination_page_zero_is_first_page() {
        let items: Vec<u32> = (0..5).collect();
        let (data, _) = paginate(items, 0, 10);
        assert_eq!(data.len(), 5);
    }
}
