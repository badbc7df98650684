//! Jenjang (class-tier) classification.
//!
//! Maps an integer age to one of seven ordered tiers. Thresholds are
//! minimum ages checked from the highest tier downward; the first tier
//! whose minimum the age satisfies wins, so the ordering is total and
//! deterministic. An age below the lowest threshold (or a non-numeric age)
//! classifies as no tier, rendered with the `"-"` sentinel.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    JENJANG_MIN_CABERAWIT_A, JENJANG_MIN_CABERAWIT_B, JENJANG_MIN_CABERAWIT_C, JENJANG_MIN_PAUD,
    JENJANG_MIN_PRA_NIKAH, JENJANG_MIN_PRA_REMAJA, JENJANG_MIN_REMAJA, SENTINEL,
};

/// The seven class tiers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jenjang {
    Paud,
    CaberawitA,
    CaberawitB,
    CaberawitC,
    PraRemaja,
    Remaja,
    PraNikah,
}

impl Jenjang {
    /// All tiers in ascending threshold order.
    pub const ALL: [Jenjang; 7] = [
        Jenjang::Paud,
        Jenjang::CaberawitA,
        Jenjang::CaberawitB,
        Jenjang::CaberawitC,
        Jenjang::PraRemaja,
        Jenjang::Remaja,
        Jenjang::PraNikah,
    ];

    /// Display label as used in the roster.
    pub fn label(&self) -> &'static str {
        match self {
            Jenjang::Paud => "PAUD",
            Jenjang::CaberawitA => "Caberawit A",
            Jenjang::CaberawitB => "Caberawit B",
            Jenjang::CaberawitC => "Caberawit C",
            Jenjang::PraRemaja => "Pra Remaja",
            Jenjang::Remaja => "Remaja",
            Jenjang::PraNikah => "Pra Nikah",
        }
    }

    /// Parse a tier from a label (case-insensitive, tolerant of extra spaces).
    pub fn from_label_loose(s: &str) -> Option<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Jenjang::ALL
            .into_iter()
            .find(|j| j.label().eq_ignore_ascii_case(&normalized))
    }
}

impl std::fmt::Display for Jenjang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum age per tier, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JenjangThresholds {
    pub paud: u32,
    pub caberawit_a: u32,
    pub caberawit_b: u32,
    pub caberawit_c: u32,
    pub pra_remaja: u32,
    pub remaja: u32,
    pub pra_nikah: u32,
}

impl Default for JenjangThresholds {
    fn default() -> Self {
        Self {
            paud: JENJANG_MIN_PAUD,
            caberawit_a: JENJANG_MIN_CABERAWIT_A,
            caberawit_b: JENJANG_MIN_CABERAWIT_B,
            caberawit_c: JENJANG_MIN_CABERAWIT_C,
            pra_remaja: JENJANG_MIN_PRA_REMAJA,
            remaja: JENJANG_MIN_REMAJA,
            pra_nikah: JENJANG_MIN_PRA_NIKAH,
        }
    }
}

impl JenjangThresholds {
    /// Load thresholds from `ROSTER_JENJANG_THRESHOLDS` with fallback to
    /// defaults.
    ///
    /// The variable carries seven comma-separated minimum ages in ascending
    /// tier order, e.g. `3,7,9,11,13,16,19`. A malformed or non-ascending
    /// value is ignored with a warning.
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var("ROSTER_JENJANG_THRESHOLDS") else {
            return Self::default();
        };

        let ages: Vec<u32> = raw
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        let ascending = ages.windows(2).all(|w| w[0] < w[1]);
        if ages.len() != 7 || !ascending {
            tracing::warn!(value = %raw, "Invalid ROSTER_JENJANG_THRESHOLDS, using defaults");
            return Self::default();
        }

        Self {
            paud: ages[0],
            caberawit_a: ages[1],
            caberawit_b: ages[2],
            caberawit_c: ages[3],
            pra_remaja: ages[4],
            remaja: ages[5],
            pra_nikah: ages[6],
        }
    }

    /// Minimum age for the given tier.
    pub fn min_age(&self, tier: Jenjang) -> u32 {
        match tier {
            Jenjang::Paud => self.paud,
            Jenjang::CaberawitA => self.caberawit_a,
            Jenjang::CaberawitB => self.caberawit_b,
            Jenjang::CaberawitC => self.caberawit_c,
            Jenjang::PraRemaja => self.pra_remaja,
            Jenjang::Remaja => self.remaja,
            Jenjang::PraNikah => self.pra_nikah,
        }
    }

    /// Classify an age: the highest tier whose minimum age the given age
    /// satisfies, or `None` below every threshold.
    pub fn classify(&self, age: u32) -> Option<Jenjang> {
        Jenjang::ALL
            .into_iter()
            .rev()
            .find(|tier| age >= self.min_age(*tier))
    }

    /// Classify a raw age string as it appears on a derived record.
    ///
    /// Non-numeric input (including the `"-"` sentinel) yields the sentinel.
    pub fn classify_label(&self, age: &str) -> String {
        match age.trim().parse::<u32>() {
            Ok(a) => self
                .classify(a)
                .map(|j| j.label().to_string())
                .unwrap_or_else(|| SENTINEL.to_string()),
            Err(_) => SENTINEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_below_lowest_threshold() {
        let t = JenjangThresholds::default();
        assert_eq!(t.classify(0), None);
        assert_eq!(t.classify(2), None);
    }

    #[test]
    fn test_classify_boundaries() {
        let t = JenjangThresholds::default();
        assert_eq!(t.classify(3), Some(Jenjang::Paud));
        assert_eq!(t.classify(6), Some(Jenjang::Paud));
        assert_eq!(t.classify(7), Some(Jenjang::CaberawitA));
        assert_eq!(t.classify(8), Some(Jenjang::CaberawitA));
        assert_eq!(t.classify(9), Some(Jenjang::CaberawitB));
        assert_eq!(t.classify(11), Some(Jenjang::CaberawitC));
        assert_eq!(t.classify(13), Some(Jenjang::PraRemaja));
        assert_eq!(t.classify(16), Some(Jenjang::Remaja));
        assert_eq!(t.classify(19), Some(Jenjang::PraNikah));
        assert_eq!(t.classify(40), Some(Jenjang::PraNikah));
    }

    #[test]
    fn test_classify_is_monotonic_and_total() {
        // For every age, the returned tier's minimum is satisfied and no
        // higher tier's minimum also is.
        let t = JenjangThresholds::default();
        for age in 0..=60u32 {
            match t.classify(age) {
                Some(tier) => {
                    assert!(age >= t.min_age(tier));
                    for higher in Jenjang::ALL.into_iter().filter(|j| *j > tier) {
                        assert!(age < t.min_age(higher), "age {} tier {:?}", age, tier);
                    }
                }
                None => assert!(age < t.min_age(Jenjang::Paud)),
            }
        }
    }

    #[test]
    fn test_classify_label_sentinels() {
        let t = JenjangThresholds::default();
        assert_eq!(t.classify_label("-"), "-");
        assert_eq!(t.classify_label(""), "-");
        assert_eq!(t.classify_label("abc"), "-");
        assert_eq!(t.classify_label("1"), "-");
        assert_eq!(t.classify_label("8"), "Caberawit A");
        assert_eq!(t.classify_label(" 16 "), "Remaja");
    }

    #[test]
    fn test_from_label_loose() {
        assert_eq!(Jenjang::from_label_loose("paud"), Some(Jenjang::Paud));
        assert_eq!(
            Jenjang::from_label_loose("caberawit  a"),
            Some(Jenjang::CaberawitA)
        );
        assert_eq!(
            Jenjang::from_label_loose("PRA NIKAH"),
            Some(Jenjang::PraNikah)
        );
        assert_eq!(Jenjang::from_label_loose("unknown"), None);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Jenjang::Paud.to_string(), "PAUD");
        assert_eq!(Jenjang::CaberawitB.to_string(), "Caberawit B");
    }
}
