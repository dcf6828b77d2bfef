//! Telemetry store
//!
//! The versioned record of one capture session's pointer and keyboard events,
//! plus the recorder that builds it and the file format it is persisted in.

pub mod error;
pub mod file;
pub mod recorder;
pub mod session;
pub mod types;

pub use error::{TelemetryError, TelemetryResult};
pub use file::{load_session, parse_session, save_session};
pub use recorder::TelemetryRecorder;
pub use session::{TelemetrySession, TelemetryStats, TELEMETRY_VERSION};
pub use types::{KeyCategory, PointerButton, SourceBounds, SourceKind, TelemetryEvent};
