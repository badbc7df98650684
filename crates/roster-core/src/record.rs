//! Record model: loosely-typed spreadsheet rows and derived read-time views.
//!
//! A [`Record`] is a mapping from field name to scalar string value, exactly
//! as it comes off a sheet row keyed by the header row. Header casing is
//! manually typed upstream and inconsistent across tabs ("Tanggal Lahir" vs
//! "TANGGAL LAHIR"), so every lookup goes through the case-insensitive
//! [`Record::cell`] accessor. A missing field reads as the empty string;
//! absence is a valid, silent state, never an error.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::jenjang::JenjangThresholds;

/// Canonical field names of the live roster table.
///
/// These are the header spellings written on append; reads tolerate any
/// casing via [`Record::cell`].
pub mod fields {
    pub const NAMA: &str = "Nama";
    pub const DESA: &str = "Desa";
    pub const KELOMPOK: &str = "Kelompok";
    pub const GENDER: &str = "Gender";
    pub const TANGGAL_LAHIR: &str = "Tanggal Lahir";
    pub const HOBI: &str = "Hobi";
    pub const SKILL: &str = "Skill";
    pub const TIMESTAMP: &str = "Timestamp";

    /// Trash-only metadata columns (deletion flags and reason).
    pub const MENIKAH: &str = "Menikah";
    pub const PINDAH: &str = "Pindah";
    pub const ALASAN: &str = "Alasan";
    pub const DIHAPUS_PADA: &str = "Dihapus Pada";
}

/// One spreadsheet row as a field→value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (field, value) pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a field value case-insensitively.
    ///
    /// Returns the empty string when no key matches.
    pub fn cell(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Look up a field value case-insensitively, `None` when absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a field value.
    ///
    /// When a key already matches case-insensitively, its value is replaced
    /// under the stored spelling; otherwise the given spelling is inserted.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = name.as_ref();
        let existing = self
            .fields
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned();
        match existing {
            Some(key) => {
                self.fields.insert(key, value.into());
            }
            None => {
                self.fields.insert(name.to_string(), value.into());
            }
        }
    }

    /// Remove a field case-insensitively, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = self
            .fields
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned()?;
        self.fields.remove(&key)
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (field, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A record as served to clients: its sheet position, a synthetic stable id
/// minted for the read snapshot, and the derived fields.
///
/// `umur` (age) and `jenjang` (class tier) are computed at read time and
/// never persisted. Positional identity is fragile under concurrent writes,
/// so responses carry both the row and the snapshot id; any cached row index
/// is invalid after any mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordView {
    /// Synthetic id, stable within one read snapshot.
    pub id: Uuid,
    /// 1-based sheet row (header is row 1, data starts at 2).
    pub row: usize,
    #[serde(flatten)]
    pub record: Record,
    /// Derived age in years, or "-" when the birth date is missing/unparseable.
    pub umur: String,
    /// Derived class tier, or "-" when below every threshold.
    pub jenjang: String,
}

impl RecordView {
    /// Project a stored record into its served form, deriving age and tier
    /// as of `today`.
    pub fn derive(
        row: usize,
        record: Record,
        today: NaiveDate,
        thresholds: &JenjangThresholds,
    ) -> Self {
        let umur = dates::derived_age(record.cell(fields::TANGGAL_LAHIR), today);
        let jenjang = thresholds.classify_label(&umur);
        Self {
            id: Uuid::new_v4(),
            row,
            record,
            umur,
            jenjang,
        }
    }

    /// Name normalized for duplicate grouping: lowercased and trimmed.
    pub fn name_normalized(&self) -> String {
        self.record.cell(fields::NAMA).trim().to_lowercase()
    }

    /// Last-write timestamp; missing or unparseable values sort as epoch.
    pub fn timestamp(&self) -> NaiveDateTime {
        dates::timestamp_or_epoch(self.record.cell(fields::TIMESTAMP))
    }

    /// Derived age as a number, when it parsed.
    pub fn age(&self) -> Option<u32> {
        self.umur.parse().ok()
    }

    /// True when the stored birth date is empty or failed to parse.
    pub fn missing_birth_date(&self) -> bool {
        dates::parse_date(self.record.cell(fields::TANGGAL_LAHIR)).is_none()
    }
}
