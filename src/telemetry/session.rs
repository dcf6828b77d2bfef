//! The frozen telemetry record of a single capture session

use crate::telemetry::error::TelemetryResult;
use crate::telemetry::types::{SourceBounds, SourceKind, TelemetryEvent};
use crate::zoom::{validate_regions, GeneratedAutoZoom};
use serde::{Deserialize, Serialize};

/// Current telemetry schema version
pub const TELEMETRY_VERSION: u64 = 1;

/// Per-kind event counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryStats {
    pub pointer_down: u64,
    pub pointer_up: u64,
    pub pointer_move_sampled: u64,
    pub wheel: u64,
    pub key_down: u64,
    pub total: u64,
}

impl TelemetryStats {
    /// Count one event
    pub fn record(&mut self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::PointerDown { .. } => self.pointer_down += 1,
            TelemetryEvent::PointerUp { .. } => self.pointer_up += 1,
            TelemetryEvent::PointerMoveSampled { .. } => self.pointer_move_sampled += 1,
            TelemetryEvent::Wheel { .. } => self.wheel += 1,
            TelemetryEvent::KeyDownCategory { .. } => self.key_down += 1,
        }
        self.total += 1;
    }

    /// Recompute stats from scratch
    pub fn from_events(events: &[TelemetryEvent]) -> Self {
        let mut stats = Self::default();
        for event in events {
            stats.record(event);
        }
        stats
    }
}

/// A frozen telemetry session.
///
/// `events` and `stats` are only reachable through read-only accessors, so a
/// session handed out by [`TelemetryRecorder::freeze`](crate::telemetry::TelemetryRecorder::freeze)
/// or loaded from disk can be shared freely between render callers. The only
/// post-freeze mutation is [`attach_auto_zoom`](Self::attach_auto_zoom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySession {
    pub version: u64,
    pub session_id: String,
    pub started_at_ms: i64,
    #[serde(default)]
    pub source_kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_display_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_bounds: Option<SourceBounds>,
    #[serde(default)]
    pub(crate) events: Vec<TelemetryEvent>,
    #[serde(default)]
    pub(crate) stats: TelemetryStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_auto_zoom: Option<GeneratedAutoZoom>,
}

impl TelemetrySession {
    /// An explicit empty session with no events and no bounds
    pub fn empty(session_id: impl Into<String>, started_at_ms: i64) -> Self {
        Self {
            version: TELEMETRY_VERSION,
            session_id: session_id.into(),
            started_at_ms,
            source_kind: SourceKind::Unknown,
            source_id: None,
            source_display_id: None,
            source_bounds: None,
            events: Vec::new(),
            stats: TelemetryStats::default(),
            generated_auto_zoom: None,
        }
    }

    pub fn events(&self) -> &[TelemetryEvent] {
        &self.events
    }

    pub fn stats(&self) -> &TelemetryStats {
        &self.stats
    }

    pub fn generated_auto_zoom(&self) -> Option<&GeneratedAutoZoom> {
        self.generated_auto_zoom.as_ref()
    }

    /// Bounds usable for spatial queries, if any
    pub fn usable_bounds(&self) -> Option<SourceBounds> {
        self.source_bounds.filter(SourceBounds::is_usable)
    }

    pub fn has_spatial_signal(&self) -> bool {
        self.usable_bounds().is_some()
    }

    /// Latest event timestamp, or 0 for an empty session
    pub fn duration_ms(&self) -> f64 {
        self.events
            .iter()
            .map(TelemetryEvent::ts)
            .fold(0.0, f64::max)
    }

    /// Attach an auto-zoom generation result.
    ///
    /// Replaces any previous result wholesale; regions are never merged.
    pub fn attach_auto_zoom(&mut self, auto_zoom: GeneratedAutoZoom) -> TelemetryResult<()> {
        validate_regions(&auto_zoom.regions)?;

        if let Some(previous) = &self.generated_auto_zoom {
            tracing::info!(
                "Replacing auto-zoom for session {} ({} -> {} regions, {} -> {})",
                self.session_id,
                previous.regions.len(),
                auto_zoom.regions.len(),
                previous.algorithm_version,
                auto_zoom.algorithm_version
            );
        } else {
            tracing::info!(
                "Attached auto-zoom to session {} ({} regions, preset={:?})",
                self.session_id,
                auto_zoom.regions.len(),
                auto_zoom.preset
            );
        }

        self.generated_auto_zoom = Some(auto_zoom);
        Ok(())
    }

    /// Drop the auto-generated tag, e.g. once the user hand-edits the regions
    pub fn clear_auto_zoom(&mut self) -> Option<GeneratedAutoZoom> {
        self.generated_auto_zoom.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::types::{KeyCategory, PointerButton};
    use crate::zoom::{AutoZoomPreset, ZoomFocus, ZoomRegion};

    fn auto_zoom(version: &str, count: usize) -> GeneratedAutoZoom {
        GeneratedAutoZoom {
            algorithm_version: version.to_string(),
            preset: AutoZoomPreset::Balanced,
            generated_at_ms: 1_700_000_000_000,
            regions: (0..count)
                .map(|i| ZoomRegion {
                    start_ms: i as f64 * 1000.0,
                    end_ms: i as f64 * 1000.0 + 500.0,
                    depth: 1.5,
                    focus: ZoomFocus::new(0.5, 0.5),
                })
                .collect(),
        }
    }

    #[test]
    fn test_stats_count_every_kind() {
        let events = vec![
            TelemetryEvent::PointerDown {
                ts: 0.0,
                x: 0.0,
                y: 0.0,
                button: PointerButton::Left,
            },
            TelemetryEvent::PointerUp {
                ts: 1.0,
                x: 0.0,
                y: 0.0,
                button: PointerButton::Left,
            },
            TelemetryEvent::PointerMoveSampled {
                ts: 2.0,
                x: 0.0,
                y: 0.0,
            },
            TelemetryEvent::PointerMoveSampled {
                ts: 3.0,
                x: 0.0,
                y: 0.0,
            },
            TelemetryEvent::KeyDownCategory {
                ts: 4.0,
                category: KeyCategory::Printable,
            },
        ];
        let stats = TelemetryStats::from_events(&events);
        assert_eq!(stats.pointer_down, 1);
        assert_eq!(stats.pointer_up, 1);
        assert_eq!(stats.pointer_move_sampled, 2);
        assert_eq!(stats.wheel, 0);
        assert_eq!(stats.key_down, 1);
        assert_eq!(stats.total, 5);
    }

    #[test]
    fn test_empty_session_has_no_spatial_signal() {
        let session = TelemetrySession::empty("s", 0);
        assert!(!session.has_spatial_signal());
        assert_eq!(session.duration_ms(), 0.0);
    }

    #[test]
    fn test_attach_auto_zoom_replaces_wholesale() {
        let mut session = TelemetrySession::empty("s", 0);
        session.attach_auto_zoom(auto_zoom("v1", 3)).unwrap();
        session.attach_auto_zoom(auto_zoom("v2", 1)).unwrap();

        let attached = session.generated_auto_zoom().unwrap();
        assert_eq!(attached.algorithm_version, "v2");
        assert_eq!(attached.regions.len(), 1);
    }

    #[test]
    fn test_attach_rejects_invalid_regions() {
        let mut session = TelemetrySession::empty("s", 0);
        session.attach_auto_zoom(auto_zoom("v1", 1)).unwrap();

        let mut bad = auto_zoom("v2", 1);
        bad.regions[0].end_ms = bad.regions[0].start_ms;
        assert!(session.attach_auto_zoom(bad).is_err());

        // Previous result is kept on rejection
        assert_eq!(session.generated_auto_zoom().unwrap().algorithm_version, "v1");
    }

    #[test]
    fn test_clear_auto_zoom() {
        let mut session = TelemetrySession::empty("s", 0);
        session.attach_auto_zoom(auto_zoom("v1", 1)).unwrap();
        assert!(session.clear_auto_zoom().is_some());
        assert!(session.generated_auto_zoom().is_none());
    }
}
