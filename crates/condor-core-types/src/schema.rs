//! Canonical schema constants for structured logging and events
//!
//! The logging macros and the engine/transport call sites emit these keys as
//! literal field names; the test capture layer and the log assertions read
//! events back through the constants, so a renamed field fails a test.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_OPERATION_ID: &str = "operation_id";

// Entity identifiers
pub const FIELD_KIND: &str = "kind";
pub const FIELD_NAME: &str = "name";
pub const FIELD_VERSION: &str = "version";

// Transport
pub const FIELD_METHOD: &str = "method";
pub const FIELD_URL: &str = "url";
pub const FIELD_STATUS: &str = "status";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_ANOMALY: &str = "structural_anomaly";
pub const EVENT_AMBIGUOUS_DELETE: &str = "ambiguous_delete";
