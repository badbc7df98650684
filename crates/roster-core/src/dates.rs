//! Date parsing, age computation, and Indonesian-locale display formats.
//!
//! Birth dates arrive as `dd/MM/yyyy`, ISO `yyyy-MM-dd`, or long-form
//! display strings carrying an Indonesian month name ("20 Maret 2010").
//! Parsing substitutes the Indonesian month name with its English
//! equivalent, then hands off to chrono. Parse failures never raise: the
//! derived age degrades to the `"-"` sentinel so one bad row cannot break a
//! whole listing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::defaults::{DATE_FMT, DATE_FMT_ISO, SENTINEL, TIMESTAMP_FMT};

/// Indonesian month names in display capitalization, indexed by month0.
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian → English month substitutions applied before chrono parsing.
const MONTH_SUBSTITUTIONS: [(&str, &str); 12] = [
    ("januari", "January"),
    ("februari", "February"),
    ("maret", "March"),
    ("april", "April"),
    ("mei", "May"),
    ("juni", "June"),
    ("juli", "July"),
    ("agustus", "August"),
    ("september", "September"),
    ("oktober", "October"),
    ("november", "November"),
    ("desember", "December"),
];

/// Parse a stored date string.
///
/// Accepts `dd/MM/yyyy`, ISO `yyyy-MM-dd`, and long-form strings with an
/// Indonesian month name. Returns `None` for empty or unparseable input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FMT) {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FMT_ISO) {
        return Some(d);
    }

    // Long-form display strings: "20 Maret 2010" → "20 March 2010".
    let mut lowered = s.to_lowercase();
    for (id, en) in MONTH_SUBSTITUTIONS {
        if lowered.contains(id) {
            lowered = lowered.replace(id, en);
            break;
        }
    }
    NaiveDate::parse_from_str(&lowered, "%d %B %Y").ok()
}

/// Age in whole years on `today`.
///
/// Calendar-year difference, decremented when the birthday has not yet
/// occurred this year.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Derived age string for a raw stored birth date.
///
/// Empty, unparseable, or future birth dates yield the `"-"` sentinel.
pub fn derived_age(raw: &str, today: NaiveDate) -> String {
    match parse_date(raw) {
        Some(birth) => {
            let age = age_on(birth, today);
            if age < 0 {
                SENTINEL.to_string()
            } else {
                age.to_string()
            }
        }
        None => SENTINEL.to_string(),
    }
}

/// Format a date for display: "20 Maret 2010".
pub fn format_display(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// Display form of a raw stored date; echoes the input unchanged when it
/// cannot be parsed (a caller-visible degenerate case, not an error).
pub fn display_or_raw(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => format_display(d),
        None => raw.to_string(),
    }
}

/// Parse a `dd/MM/yyyy HH:mm:ss` last-write timestamp.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), TIMESTAMP_FMT).ok()
}

/// Timestamp for sorting; missing or unparseable values sort as the oldest
/// possible (epoch).
pub fn timestamp_or_epoch(input: &str) -> NaiveDateTime {
    parse_timestamp(input).unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.naive_utc())
}

/// Current local time in the storage timestamp format.
pub fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FMT).to_string()
}
