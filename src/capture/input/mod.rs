//! Input telemetry capture
//!
//! Implements a `RecordingChannel` that collects the pointer/keyboard event
//! stream pushed by the platform capture backend and persists it as a
//! telemetry file for later processing (cursor trail, auto-zoom).

pub mod channel;

pub use channel::{TelemetryCaptureChannel, TelemetrySink};
