//! Structured logging field name constants.
//!
//! All crates use these names for structured `tracing` fields so log
//! aggregation can query by the same keys across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied (skipped rows) |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, composed queries, dropped filter input |
//! | TRACE | Per-row and per-parameter detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "catalog", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "rest", "mcp", "chat", "composer", "hydrator", "pool", "translator"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "fetch", "translate", "tools/call"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Recipe identifier being fetched.
pub const RECIPE_ID: &str = "recipe_id";

/// Diet preset key applied to a search.
pub const PRESET: &str = "preset";

/// JSON-RPC method name.
pub const RPC_METHOD: &str = "rpc_method";

/// Tool name for `tools/call`.
pub const TOOL: &str = "tool";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search.
pub const RESULT_COUNT: &str = "result_count";

/// Number of predicate fragments in a composed query.
pub const PREDICATE_COUNT: &str = "predicate_count";

/// Rows dropped because they failed to decode.
pub const SKIPPED_ROWS: &str = "skipped_rows";

/// Row cap applied to a search.
pub const ROW_LIMIT: &str = "row_limit";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for translation.
pub const MODEL: &str = "model";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Error class from `ErrorKind`.
pub const ERROR_KIND: &str = "error_kind";
