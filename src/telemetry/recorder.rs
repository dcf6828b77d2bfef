//! Append-only telemetry recorder
//!
//! A recorder exists only while a recording is active. `freeze` consumes it
//! and hands back the immutable [`TelemetrySession`].

use crate::telemetry::session::{TelemetrySession, TelemetryStats};
use crate::telemetry::types::{SourceBounds, SourceKind, TelemetryEvent};

/// Builds a telemetry session during an active recording
#[derive(Debug)]
pub struct TelemetryRecorder {
    session: TelemetrySession,
}

impl TelemetryRecorder {
    /// Open a new session at recording start
    pub fn start_session(
        session_id: impl Into<String>,
        started_at_ms: i64,
        source_kind: SourceKind,
        source_id: Option<String>,
        source_display_id: Option<String>,
    ) -> Self {
        let mut session = TelemetrySession::empty(session_id, started_at_ms);
        session.source_kind = source_kind;
        session.source_id = source_id;
        session.source_display_id = source_display_id;

        tracing::info!(
            "Telemetry session {} started (source={:?}, id={:?}, display={:?})",
            session.session_id,
            session.source_kind,
            session.source_id,
            session.source_display_id
        );

        Self { session }
    }

    /// Set or update the capture region. May arrive after the first events.
    pub fn set_source_bounds(&mut self, bounds: SourceBounds) {
        if !bounds.is_usable() {
            tracing::warn!(
                "Session {} received degenerate source bounds {:?}",
                self.session.session_id,
                bounds
            );
        }
        self.session.source_bounds = Some(bounds);
    }

    /// Append one event and update stats
    pub fn append(&mut self, event: TelemetryEvent) {
        self.session.stats.record(&event);
        self.session.events.push(event);
    }

    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    pub fn len(&self) -> usize {
        self.session.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.session.events.is_empty()
    }

    pub fn stats(&self) -> &TelemetryStats {
        &self.session.stats
    }

    /// Finish recording and return the immutable session
    pub fn freeze(self) -> TelemetrySession {
        let session = self.session;
        tracing::info!(
            "Telemetry session {} frozen (events={}, duration={:.0}ms, bounds={})",
            session.session_id,
            session.stats.total,
            session.duration_ms(),
            if session.has_spatial_signal() { "set" } else { "none" }
        );
        session
    }
}
