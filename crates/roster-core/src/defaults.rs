//! Centralized default constants for the roster system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates reference these constants instead of defining their
//! own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// BACKING TABLES
// =============================================================================

/// Live roster table (sheet tab). First row is the header schema.
pub const LIVE_TABLE: &str = "Generus";

/// Trash table. Holds deleted records plus deletion metadata columns.
pub const TRASH_TABLE: &str = "Trash";

/// Config table. Two columns: key, JSON value.
pub const CONFIG_TABLE: &str = "Config";

// =============================================================================
// DATE / TIMESTAMP FORMATS
// =============================================================================

/// Storage format for birth dates.
pub const DATE_FMT: &str = "%d/%m/%Y";

/// ISO fallback accepted on read.
pub const DATE_FMT_ISO: &str = "%Y-%m-%d";

/// Storage format for the last-write timestamp column.
pub const TIMESTAMP_FMT: &str = "%d/%m/%Y %H:%M:%S";

/// Sentinel rendered for missing or unparseable derived values.
pub const SENTINEL: &str = "-";

// =============================================================================
// JENJANG TIER MINIMUM AGES
// =============================================================================

/// Minimum age for PAUD (lowest tier; below this no tier applies).
pub const JENJANG_MIN_PAUD: u32 = 3;

/// Minimum age for Caberawit A.
pub const JENJANG_MIN_CABERAWIT_A: u32 = 7;

/// Minimum age for Caberawit B.
pub const JENJANG_MIN_CABERAWIT_B: u32 = 9;

/// Minimum age for Caberawit C.
pub const JENJANG_MIN_CABERAWIT_C: u32 = 11;

/// Minimum age for Pra Remaja.
pub const JENJANG_MIN_PRA_REMAJA: u32 = 13;

/// Minimum age for Remaja.
pub const JENJANG_MIN_REMAJA: u32 = 16;

/// Minimum age for Pra Nikah (highest tier, open-ended).
pub const JENJANG_MIN_PRA_NIKAH: u32 = 19;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for record list endpoints.
pub const PAGE_SIZE: usize = 10;

/// Page sizes the list endpoints accept.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

// =============================================================================
// CATEGORIZATION
// =============================================================================

/// Fixed bucket for text that matches no category keyword.
pub const OTHER_CATEGORY: &str = "Lainnya";

/// Default number of candidate terms returned by keyword discovery.
pub const DISCOVERY_LIMIT: usize = 20;

/// Minimum token length considered by keyword discovery.
pub const DISCOVERY_MIN_TOKEN_LEN: usize = 3;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Session token lifetime in seconds (1 hour, short-lived by design).
pub const SESSION_LIFETIME_SECS: i64 = 3600;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "roster_session";

/// Login attempts allowed per minute before 429.
pub const LOGIN_RATE_LIMIT_PER_MIN: u32 = 5;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

// =============================================================================
// SHEETS CLIENT
// =============================================================================

/// Timeout for Sheets API requests in seconds.
pub const SHEETS_TIMEOUT_SECS: u64 = 30;

/// Base URL of the Sheets values API.
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

// =============================================================================
// CONFIG BLOB KEYS
// =============================================================================

/// Config key holding the admin password.
pub const CONFIG_KEY_ADMIN_PASSWORD: &str = "admin_password";

/// Config key prefix for per-view column visibility lists.
pub const CONFIG_KEY_COLUMNS_PREFIX: &str = "columns";

/// Config key prefix for keyword-category maps (hobi, skill).
pub const CONFIG_KEY_KEYWORDS_PREFIX: &str = "keywords";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jenjang_thresholds_strictly_ascending() {
        const {
            assert!(JENJANG_MIN_PAUD < JENJANG_MIN_CABERAWIT_A);
            assert!(JENJANG_MIN_CABERAWIT_A < JENJANG_MIN_CABERAWIT_B);
            assert!(JENJANG_MIN_CABERAWIT_B < JENJANG_MIN_CABERAWIT_C);
            assert!(JENJANG_MIN_CABERAWIT_C < JENJANG_MIN_PRA_REMAJA);
            assert!(JENJANG_MIN_PRA_REMAJA < JENJANG_MIN_REMAJA);
            assert!(JENJANG_MIN_REMAJA < JENJANG_MIN_PRA_NIKAH);
        }
    }

    #[test]
    fn page_sizes_ascending_and_contain_default() {
        for w in PAGE_SIZES.windows(2) {
            assert!(w[0] < w[1]);
        }
        assert!(PAGE_SIZES.contains(&PAGE_SIZE));
    }
}
