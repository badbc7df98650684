//! Query-parameter types for the record list endpoints.
//!
//! Multi-select filters arrive as comma-separated values
//! (`?desa=Gayungan,Ketintang`); empty segments are dropped.

use serde::Deserialize;

use roster_core::defaults::{PAGE_SIZE, PAGE_SIZES};
use roster_core::RecordFilter;

/// Query parameters accepted by `GET /api/records` and the CSV export.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListRecordsQuery {
    /// Comma-separated desa multi-select.
    pub desa: Option<String>,
    /// Comma-separated kelompok multi-select.
    pub kelompok: Option<String>,
    /// Exact gender.
    pub gender: Option<String>,
    /// Comma-separated jenjang label multi-select.
    pub jenjang: Option<String>,
    /// Name substring.
    pub name: Option<String>,
    /// Inclusive lower age bound.
    pub age_min: Option<u32>,
    /// Inclusive upper age bound.
    pub age_max: Option<u32>,
    /// Keep only records without a parseable birth date.
    #[serde(default)]
    pub missing_dob: bool,
    /// Duplicate mode.
    #[serde(default)]
    pub duplicates: bool,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size; values outside the allowed set fall back to the default.
    pub per_page: Option<usize>,
}

fn split_csv(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ListRecordsQuery {
    /// Build the engine filter from the query.
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            desa: split_csv(&self.desa),
            kelompok: split_csv(&self.kelompok),
            gender: self.gender.clone().filter(|g| !g.trim().is_empty()),
            jenjang: split_csv(&self.jenjang),
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
            age_min: self.age_min,
            age_max: self.age_max,
            missing_birth_date: self.missing_dob,
            duplicates_only: self.duplicates,
        }
    }

    /// Resolve (page, per_page), clamping the page size to the allowed set.
    pub fn page_params(&self) -> (usize, usize) {
        let per_page = self
            .per_page
            .filter(|p| PAGE_SIZES.contains(p))
            .unwrap_or(PAGE_SIZE);
        (self.page.unwrap_or(1).max(1), per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_multi_select_parsing() {
        let query = ListRecordsQuery {
            desa: Some("Gayungan, Ketintang,,".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.desa, vec!["Gayungan", "Ketintang"]);
    }

    #[test]
    fn test_blank_values_mean_no_constraint() {
        let query = ListRecordsQuery {
            gender: Some("  ".to_string()),
            name: Some(String::new()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert!(filter.gender.is_none());
        assert!(filter.name.is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_page_params_defaults() {
        let query = ListRecordsQuery::default();
        assert_eq!(query.page_params(), (1, PAGE_SIZE));
    }

    #[test]
    fn test_invalid_per_page_falls_back() {
        let query = ListRecordsQuery {
            per_page: Some(37),
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(query.page_params(), (1, PAGE_SIZE));
    }

    #[test]
    fn test_allowed_per_page_kept() {
        let query = ListRecordsQuery {
            per_page: Some(50),
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.page_params(), (3, 50));
    }
}
