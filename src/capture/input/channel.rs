use crate::recorder::channel::{RecordingChannel, RecordingError, RecordingResult};
use crate::telemetry::{
    save_session, SourceBounds, SourceKind, TelemetryError, TelemetryEvent, TelemetryRecorder,
    TelemetryResult, TelemetrySession,
};
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Recorder plus the instant its session-local epoch started
struct ActiveCapture {
    recorder: TelemetryRecorder,
    started: Instant,
}

/// Handle the capture backend pushes raw events through.
///
/// Cloneable and `Send`; once the channel stops, appends fail with
/// [`TelemetryError::SessionFrozen`].
#[derive(Clone)]
pub struct TelemetrySink {
    active: Arc<ParkingMutex<Option<ActiveCapture>>>,
}

impl TelemetrySink {
    pub fn append(&self, event: TelemetryEvent) -> TelemetryResult<()> {
        match self.active.lock().as_mut() {
            Some(capture) => {
                capture.recorder.append(event);
                Ok(())
            }
            None => {
                tracing::warn!("Dropping telemetry event after session was frozen");
                Err(TelemetryError::SessionFrozen)
            }
        }
    }

    /// Supply the capture region once known
    pub fn set_source_bounds(&self, bounds: SourceBounds) -> TelemetryResult<()> {
        match self.active.lock().as_mut() {
            Some(capture) => {
                capture.recorder.set_source_bounds(bounds);
                Ok(())
            }
            None => Err(TelemetryError::SessionFrozen),
        }
    }

    /// Milliseconds since the active session started, for stamping events
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.active
            .lock()
            .as_ref()
            .map(|capture| capture.started.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Recording channel that collects pointer/keyboard telemetry and writes
/// `recording-{n}-telemetry.json` when stopped
pub struct TelemetryCaptureChannel {
    id: String,
    source_kind: SourceKind,
    source_id: Option<String>,
    source_display_id: Option<String>,
    source_bounds: Option<SourceBounds>,
    output_dir: Option<PathBuf>,
    session_index: usize,
    output_files: Arc<ParkingMutex<Vec<String>>>,
    active: Arc<ParkingMutex<Option<ActiveCapture>>>,
    last_session: Option<TelemetrySession>,
    unsaved: Option<(PathBuf, TelemetrySession)>,
}

impl TelemetryCaptureChannel {
    pub fn new(
        source_kind: SourceKind,
        source_id: Option<String>,
        source_display_id: Option<String>,
    ) -> Self {
        Self {
            id: "telemetry".to_string(),
            source_kind,
            source_id,
            source_display_id,
            source_bounds: None,
            output_dir: None,
            session_index: 0,
            output_files: Arc::new(ParkingMutex::new(Vec::new())),
            active: Arc::new(ParkingMutex::new(None)),
            last_session: None,
            unsaved: None,
        }
    }

    /// Capture region known before recording starts
    pub fn with_source_bounds(mut self, bounds: SourceBounds) -> Self {
        self.source_bounds = Some(bounds);
        self
    }

    pub fn sink(&self) -> TelemetrySink {
        TelemetrySink {
            active: self.active.clone(),
        }
    }

    /// The session frozen by the most recent stop
    pub fn last_session(&self) -> Option<&TelemetrySession> {
        self.last_session.as_ref()
    }

    /// Whether a stopped session is still waiting to be written
    pub fn has_unsaved_session(&self) -> bool {
        self.unsaved.is_some()
    }

    fn session_basename(&self) -> String {
        format!("recording-{}", self.session_index)
    }

    fn output_path(&self) -> RecordingResult<PathBuf> {
        let output_dir = self.output_dir.clone().ok_or_else(|| {
            RecordingError::ConfigurationError("Output directory not set".to_string())
        })?;
        Ok(output_dir.join(format!("{}-telemetry.json", self.session_basename())))
    }

    /// Write a frozen session; on failure keep it so the next stop can retry
    fn write_session(&mut self, path: PathBuf, session: TelemetrySession) -> RecordingResult<()> {
        if let Err(e) = save_session(&path, &session) {
            tracing::error!(
                "Failed to write telemetry to {} ({} events kept for retry): {}",
                path.display(),
                session.stats().total,
                e
            );
            self.last_session = Some(session.clone());
            self.unsaved = Some((path, session));
            return Err(e.into());
        }

        self.output_files
            .lock()
            .push(path.to_string_lossy().to_string());

        tracing::info!(
            "Telemetry capture stopped (events={}, clicks={}, moves={})",
            session.stats().total,
            session.stats().pointer_down,
            session.stats().pointer_move_sampled
        );
        self.last_session = Some(session);
        Ok(())
    }
}

#[async_trait]
impl RecordingChannel for TelemetryCaptureChannel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn initialize(&mut self, output_dir: &Path, session_index: usize) -> RecordingResult<()> {
        self.output_dir = Some(output_dir.to_path_buf());
        self.session_index = session_index;

        tracing::info!(
            "Telemetry channel initialized (source={:?}, session={})",
            self.source_kind,
            self.session_index
        );
        Ok(())
    }

    async fn start(&mut self) -> RecordingResult<()> {
        if self.is_recording() {
            return Err(RecordingError::AlreadyRecording);
        }

        // Fail before capturing anything we could not write out
        let path = self.output_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut recorder = TelemetryRecorder::start_session(
            uuid::Uuid::new_v4().to_string(),
            chrono::Utc::now().timestamp_millis(),
            self.source_kind,
            self.source_id.clone(),
            self.source_display_id.clone(),
        );
        if let Some(bounds) = self.source_bounds {
            recorder.set_source_bounds(bounds);
        }

        *self.active.lock() = Some(ActiveCapture {
            recorder,
            started: Instant::now(),
        });

        tracing::info!("Telemetry capture started");
        Ok(())
    }

    async fn stop(&mut self) -> RecordingResult<()> {
        if let Some((path, session)) = self.unsaved.take() {
            self.write_session(path, session)?;
        }

        let Some(capture) = self.active.lock().take() else {
            return Ok(());
        };

        let session = capture.recorder.freeze();
        let path = match self.output_path() {
            Ok(path) => path,
            Err(e) => {
                self.last_session = Some(session);
                return Err(e);
            }
        };
        self.write_session(path, session)
    }

    async fn pause(&mut self) -> RecordingResult<()> {
        if !self.is_recording() {
            return Err(RecordingError::NotRecording);
        }
        self.stop().await
    }

    async fn resume(&mut self, session_index: usize) -> RecordingResult<()> {
        self.session_index = session_index;
        self.start().await
    }

    fn is_recording(&self) -> bool {
        self.active.lock().is_some()
    }

    fn output_files(&self) -> Vec<String> {
        self.output_files.lock().clone()
    }
}
