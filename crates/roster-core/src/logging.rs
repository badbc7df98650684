//! Structured logging schema and field name constants for the roster system.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Failed remote-store call surfaced to the user |
//! | WARN  | Recoverable issue, degraded value substituted |
//! | INFO  | Lifecycle events (startup, shutdown), completed mutations |
//! | DEBUG | Decision points, filter states, config choices |
//! | TRACE | Per-row iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "sheets", "roster"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "records", "trash", "config", "client", "session"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "read_all", "append", "update_at", "delete_at", "login"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Backing table (sheet tab) being operated on.
pub const TABLE: &str = "table";

/// 1-based row position being operated on.
pub const ROW: &str = "row";

/// Desa a query or record belongs to.
pub const DESA: &str = "desa";

/// Kelompok a query or record belongs to.
pub const KELOMPOK: &str = "kelompok";

/// Config blob key being read or written.
pub const CONFIG_KEY: &str = "config_key";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records read from the backing store.
pub const RECORD_COUNT: &str = "record_count";

/// Number of records surviving the active filter.
pub const FILTERED_COUNT: &str = "filtered_count";

/// Requested page number (1-based).
pub const PAGE: &str = "page";

/// Requested page size.
pub const PER_PAGE: &str = "per_page";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
