// ── Chat Widget: Error Types ───────────────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (color parsing, config,
//     serialization).
//   • This is a leaf library: errors propagate unchanged to the caller,
//     which decides whether to fall back, log, or surface to an admin.
//   • `WidgetError` → `String` conversion is provided via `Display` so
//     host boundaries that traffic in `Result<T, String>` can call
//     `.map_err(|e| e.to_string())` without boilerplate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Input is not 3 or 6 hex digits after stripping a leading `#`,
    /// or contains non-hexadecimal characters.
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// Widget configuration is invalid (detail names the offending field).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization failure building the script payload.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// All fallible crate operations return this type.
pub type WidgetResult<T> = Result<T, WidgetError>;

impl From<WidgetError> for String {
    fn from(e: WidgetError) -> Self {
        e.to_string()
    }
}
