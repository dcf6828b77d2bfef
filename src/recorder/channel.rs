//! Recording channel trait
//!
//! Defines the interface the capture backend drives for each recording
//! channel. The telemetry channel is the one this crate provides.

use crate::telemetry::TelemetryError;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during recording
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Already recording")]
    AlreadyRecording,

    #[error("Not recording")]
    NotRecording,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for recording operations
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Trait for recording channels
#[async_trait]
pub trait RecordingChannel: Send + Sync {
    /// Get the channel identifier (e.g., "telemetry")
    fn id(&self) -> &str;

    /// Initialize the channel with the output directory
    async fn initialize(&mut self, output_dir: &Path, session_index: usize) -> RecordingResult<()>;

    /// Start recording
    async fn start(&mut self) -> RecordingResult<()>;

    /// Stop recording
    async fn stop(&mut self) -> RecordingResult<()>;

    /// Pause recording
    async fn pause(&mut self) -> RecordingResult<()>;

    /// Resume recording (starts a new session)
    async fn resume(&mut self, session_index: usize) -> RecordingResult<()>;

    /// Check if the channel is currently recording
    fn is_recording(&self) -> bool;

    /// Get output files created by this channel
    fn output_files(&self) -> Vec<String>;
}
