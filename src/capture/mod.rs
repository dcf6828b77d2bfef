//! Capture-side adapters
//!
//! Platform backends own the OS hooks; this module gives them a channel to
//! push telemetry into.

pub mod input;

pub use input::{TelemetryCaptureChannel, TelemetrySink};
