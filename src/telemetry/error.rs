//! Telemetry errors
//!
//! Spatial queries never fail; these errors cover lifecycle misuse,
//! schema validation and telemetry file I/O.

use thiserror::Error;

/// Errors that can occur while building, validating or loading telemetry
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Telemetry session is frozen")]
    SessionFrozen,

    #[error("Unsupported telemetry version: {found}")]
    UnsupportedVersion { found: u64 },

    #[error("Telemetry document has no version field")]
    MissingVersion,

    #[error("Invalid zoom region at index {index}: {reason}")]
    InvalidZoomRegion { index: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;
