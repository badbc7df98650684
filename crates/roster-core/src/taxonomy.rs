//! Location taxonomy: the fixed two-level Desa → Kelompok mapping.
//!
//! The taxonomy (a) populates form dropdowns, (b) seeds summary counts so
//! zero-count locations stay visible, and (c) backs the mismatch audit that
//! flags records whose stored desa/kelompok pair is not a registered pair.

use serde::{Deserialize, Serialize};

use crate::record::{fields, RecordView};

/// Ordered Desa → Kelompok mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTaxonomy {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for LocationTaxonomy {
    fn default() -> Self {
        Self::new([
            (
                "Gayungan",
                vec!["Gayungan 1", "Gayungan 2", "Menanggal", "Dukuh Menanggal"],
            ),
            (
                "Ketintang",
                vec!["Ketintang Barat", "Ketintang Timur", "Karah", "Jambangan"],
            ),
            (
                "Wonocolo",
                vec!["Margorejo", "Jemursari", "Siwalankerto", "Bendul Merisi"],
            ),
            (
                "Rungkut",
                vec!["Rungkut Asri", "Rungkut Harapan", "Medokan", "Wonorejo"],
            ),
            ("Waru", vec!["Waru 1", "Waru 2", "Kureksari", "Ngelom"]),
        ])
    }
}

impl LocationTaxonomy {
    /// Build a taxonomy from ordered (desa, kelompok list) pairs.
    pub fn new<I, D, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (D, Vec<K>)>,
        D: Into<String>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(desa, kelompok)| {
                    (
                        desa.into(),
                        kelompok.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// All desa names in taxonomy order.
    pub fn desa_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(desa, _)| desa.as_str())
    }

    /// Kelompok registered under a desa (case-insensitive lookup).
    pub fn kelompok_for(&self, desa: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(d, _)| d.eq_ignore_ascii_case(desa))
            .map(|(_, kelompok)| kelompok.as_slice())
    }

    /// Whether the desa is registered.
    pub fn contains_desa(&self, desa: &str) -> bool {
        self.kelompok_for(desa).is_some()
    }

    /// Whether (desa, kelompok) is a registered pair, case-insensitively.
    pub fn is_valid_pair(&self, desa: &str, kelompok: &str) -> bool {
        self.kelompok_for(desa)
            .map(|list| list.iter().any(|k| k.eq_ignore_ascii_case(kelompok)))
            .unwrap_or(false)
    }

    /// Records whose stored desa/kelompok pair is not registered.
    ///
    /// Pure predicate pass, no mutation.
    pub fn mismatches(&self, views: Vec<RecordView>) -> Vec<RecordView> {
        views
            .into_iter()
            .filter(|v| {
                !self.is_valid_pair(
                    v.record.cell(fields::DESA),
                    v.record.cell(fields::KELOMPOK),
                )
            })
            .collect()
    }
}
