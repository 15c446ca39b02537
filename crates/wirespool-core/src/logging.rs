//! Structured logging field names for wirespool.
//!
//! All crates use these constants for structured `tracing` fields so that
//! log queries work the same way across the store and the HTTP layer.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unexpected storage failure, surfaced to the caller as a 500 |
//! | WARN  | Rejected mutation of a protected record, bad configuration value |
//! | INFO  | Lifecycle events (startup, seeding), record creation and deletion |
//! | DEBUG | Lookups, calculation inputs and outputs |
//! | TRACE | Per-record iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated through a request (UUIDv7).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "calc"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "mem_store", "pg_store", "pool", "scope_cookie"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list", "create", "delete", "seed", "calculate"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Wire type identifier being operated on.
pub const WIRE_TYPE_ID: &str = "wire_type_id";

/// Catalog scope ("shared" or "owner:<uuid>").
pub const SCOPE: &str = "scope";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a listing.
pub const RESULT_COUNT: &str = "result_count";

/// Number of default records written during seeding.
pub const SEEDED_COUNT: &str = "seeded_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
