//! Boundary to the external auto-zoom generator
//!
//! The heuristics that decide when to zoom live outside this crate. A
//! generator only has to be deterministic per (telemetry, preset,
//! algorithm version) and emit regions that pass [`validate_regions`].

use crate::telemetry::error::TelemetryResult;
use crate::telemetry::session::TelemetrySession;
use crate::zoom::types::{validate_regions, AutoZoomPreset, GeneratedAutoZoom, ZoomRegion};

/// An auto-zoom heuristic
pub trait AutoZoomGenerator {
    /// Version tag recorded alongside the regions it produced
    fn algorithm_version(&self) -> &str;

    /// Produce zoom regions for a frozen session
    fn generate(&self, telemetry: &TelemetrySession, preset: AutoZoomPreset) -> Vec<ZoomRegion>;
}

/// Run a generator and wrap its output in the attachable contract type
pub fn run_generator<G: AutoZoomGenerator + ?Sized>(
    generator: &G,
    telemetry: &TelemetrySession,
    preset: AutoZoomPreset,
    generated_at_ms: i64,
) -> TelemetryResult<GeneratedAutoZoom> {
    let regions = generator.generate(telemetry, preset);
    validate_regions(&regions)?;

    tracing::debug!(
        "Auto-zoom generator {} produced {} regions for session {} (preset={:?})",
        generator.algorithm_version(),
        regions.len(),
        telemetry.session_id,
        preset
    );

    Ok(GeneratedAutoZoom {
        algorithm_version: generator.algorithm_version().to_string(),
        preset,
        generated_at_ms,
        regions,
    })
}

/// Run a generator and replace the session's auto-zoom result with its output
pub fn regenerate_auto_zoom<G: AutoZoomGenerator + ?Sized>(
    generator: &G,
    telemetry: &mut TelemetrySession,
    preset: AutoZoomPreset,
    generated_at_ms: i64,
) -> TelemetryResult<()> {
    let auto_zoom = run_generator(generator, telemetry, preset, generated_at_ms)?;
    telemetry.attach_auto_zoom(auto_zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{PointerButton, SourceBounds, SourceKind, TelemetryEvent, TelemetryRecorder};
    use crate::zoom::types::ZoomFocus;

    /// Zooms around every pointer-down for a preset-dependent duration
    struct ClickZoom;

    impl AutoZoomGenerator for ClickZoom {
        fn algorithm_version(&self) -> &str {
            "click-zoom-1"
        }

        fn generate(&self, telemetry: &TelemetrySession, preset: AutoZoomPreset) -> Vec<ZoomRegion> {
            let Some(bounds) = telemetry.usable_bounds() else {
                return vec![];
            };
            let depth = match preset {
                AutoZoomPreset::Subtle => 1.25,
                AutoZoomPreset::Balanced => 1.5,
                AutoZoomPreset::Intense => 2.0,
            };
            telemetry
                .events()
                .iter()
                .filter_map(|event| match event {
                    TelemetryEvent::PointerDown { ts, x, y, .. } => {
                        let (fx, fy) = bounds.normalize(*x, *y);
                        Some(ZoomRegion {
                            start_ms: *ts,
                            end_ms: ts + 1500.0,
                            depth,
                            focus: ZoomFocus::new(fx, fy),
                        })
                    }
                    _ => None,
                })
                .collect()
        }
    }

    /// Emits an inverted region
    struct Broken;

    impl AutoZoomGenerator for Broken {
        fn algorithm_version(&self) -> &str {
            "broken"
        }

        fn generate(&self, _: &TelemetrySession, _: AutoZoomPreset) -> Vec<ZoomRegion> {
            vec![ZoomRegion {
                start_ms: 10.0,
                end_ms: 5.0,
                depth: 2.0,
                focus: ZoomFocus::center(),
            }]
        }
    }

    fn session_with_clicks() -> TelemetrySession {
        let mut recorder = TelemetryRecorder::start_session("s", 0, SourceKind::Screen, None, None);
        recorder.set_source_bounds(SourceBounds::new(0.0, 0.0, 1000.0, 1000.0));
        for ts in [100.0, 4000.0] {
            recorder.append(TelemetryEvent::PointerDown {
                ts,
                x: 250.0,
                y: 750.0,
                button: PointerButton::Left,
            });
        }
        recorder.freeze()
    }

    #[test]
    fn test_run_generator_tags_output() {
        let session = session_with_clicks();
        let result = run_generator(&ClickZoom, &session, AutoZoomPreset::Intense, 42).unwrap();
        assert_eq!(result.algorithm_version, "click-zoom-1");
        assert_eq!(result.preset, AutoZoomPreset::Intense);
        assert_eq!(result.generated_at_ms, 42);
        assert_eq!(result.regions.len(), 2);
        assert_eq!(result.regions[0].focus, ZoomFocus::new(0.25, 0.75));
    }

    #[test]
    fn test_generation_is_repeatable() {
        let session = session_with_clicks();
        let a = run_generator(&ClickZoom, &session, AutoZoomPreset::Balanced, 1).unwrap();
        let b = run_generator(&ClickZoom, &session, AutoZoomPreset::Balanced, 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_regenerate_replaces() {
        let mut session = session_with_clicks();
        regenerate_auto_zoom(&ClickZoom, &mut session, AutoZoomPreset::Subtle, 1).unwrap();
        regenerate_auto_zoom(&ClickZoom, &mut session, AutoZoomPreset::Intense, 2).unwrap();

        let attached = session.generated_auto_zoom().unwrap();
        assert_eq!(attached.preset, AutoZoomPreset::Intense);
        assert_eq!(attached.regions.len(), 2);
        assert!(attached.regions.iter().all(|r| r.depth == 2.0));
    }

    #[test]
    fn test_invalid_output_is_rejected() {
        let mut session = session_with_clicks();
        assert!(regenerate_auto_zoom(&Broken, &mut session, AutoZoomPreset::Balanced, 1).is_err());
        assert!(session.generated_auto_zoom().is_none());
    }
}
