//! Cursor trail sampling for playback overlays
//!
//! Turns the raw telemetry log into a short, decaying set of recent pointer
//! positions for the frame at `at_ms`. The trail is recomputed from scratch
//! on every call: the result depends only on the session and the arguments,
//! so scrubbing backward renders exactly what forward playback did.

use crate::project::schema::TrailConfig;
use crate::telemetry::session::TelemetrySession;
use crate::telemetry::types::TelemetryEvent;
use serde::{Deserialize, Serialize};

/// Default trail lifetime in milliseconds
pub const DEFAULT_MAX_AGE_MS: f64 = 1100.0;

/// Default cap on trail points
pub const DEFAULT_MAX_POINTS: usize = 14;

/// Minimum spacing between kept pointer-move samples
pub const MIN_MOVE_SPACING_MS: f64 = 45.0;

/// One rendered trail sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailPoint {
    /// X position normalized to the source bounds (0-1)
    pub x_norm: f64,
    /// Y position normalized to the source bounds (0-1)
    pub y_norm: f64,
    /// 1 = freshest, 0 = about to expire
    pub age_ratio: f64,
    /// Renderer weight for opacity/size
    pub emphasis: f64,
}

/// Emphasis weight for events that can appear on the trail.
///
/// Keyboard events carry no position and never contribute.
fn emphasis(event: &TelemetryEvent) -> Option<f64> {
    match event {
        TelemetryEvent::PointerDown { .. } => Some(1.0),
        TelemetryEvent::PointerUp { .. } => Some(0.9),
        TelemetryEvent::Wheel { .. } => Some(0.85),
        TelemetryEvent::PointerMoveSampled { .. } => Some(0.7),
        TelemetryEvent::KeyDownCategory { .. } => None,
    }
}

/// Clicks and scrolls are never thinned
fn is_decimable(event: &TelemetryEvent) -> bool {
    match event {
        TelemetryEvent::PointerMoveSampled { .. } => true,
        TelemetryEvent::PointerDown { .. }
        | TelemetryEvent::PointerUp { .. }
        | TelemetryEvent::Wheel { .. }
        | TelemetryEvent::KeyDownCategory { .. } => false,
    }
}

/// Trail points at `at_ms`, oldest first, using the default move spacing
///
/// # Arguments
/// * `session` - Frozen telemetry session
/// * `at_ms` - Current playback time in the session's timestamp domain
/// * `max_age_ms` - How far back positions stay visible
/// * `max_points` - Upper bound on the returned length
///
/// # Returns
/// An empty vector when the session has no usable bounds or nothing falls in
/// the window; never an error.
pub fn trail_points(
    session: &TelemetrySession,
    at_ms: f64,
    max_age_ms: f64,
    max_points: usize,
) -> Vec<TrailPoint> {
    sample_trail(session, at_ms, max_age_ms, max_points, MIN_MOVE_SPACING_MS)
}

/// Trail points using settings from a [`TrailConfig`]
pub fn trail_points_with_config(
    session: &TelemetrySession,
    at_ms: f64,
    config: &TrailConfig,
) -> Vec<TrailPoint> {
    sample_trail(
        session,
        at_ms,
        config.max_age_ms,
        config.max_points,
        config.min_move_spacing_ms,
    )
}

fn sample_trail(
    session: &TelemetrySession,
    at_ms: f64,
    max_age_ms: f64,
    max_points: usize,
    min_move_spacing_ms: f64,
) -> Vec<TrailPoint> {
    let Some(bounds) = session.usable_bounds() else {
        return vec![];
    };
    if max_points == 0 || !at_ms.is_finite() || !(max_age_ms.is_finite() && max_age_ms > 0.0) {
        return vec![];
    }

    let window_start = at_ms - max_age_ms;
    let mut window: Vec<&TelemetryEvent> = session
        .events()
        .iter()
        .filter(|e| matches!(e.position(), Some((x, y)) if x.is_finite() && y.is_finite()))
        .filter(|e| {
            let ts = e.ts();
            ts >= window_start && ts <= at_ms
        })
        .collect();
    // Storage order is only near-sorted; a stable sort keeps ties in place.
    window.sort_by(|a, b| a.ts().total_cmp(&b.ts()));

    let mut kept: Vec<&TelemetryEvent> = Vec::with_capacity(max_points.min(window.len()));
    let mut last_kept_ts: Option<f64> = None;

    for event in window.into_iter().rev() {
        if kept.len() >= max_points {
            break;
        }
        if is_decimable(event) {
            if let Some(last_ts) = last_kept_ts {
                if last_ts - event.ts() < min_move_spacing_ms {
                    continue;
                }
            }
        }
        last_kept_ts = Some(event.ts());
        kept.push(event);
    }

    kept.reverse();

    kept.into_iter()
        .filter_map(|event| {
            let (x, y) = event.position()?;
            let weight = emphasis(event)?;
            let (x_norm, y_norm) = bounds.normalize(x, y);
            Some(TrailPoint {
                x_norm,
                y_norm,
                age_ratio: (1.0 - (at_ms - event.ts()) / max_age_ms).clamp(0.0, 1.0),
                emphasis: weight,
            })
        })
        .collect()
}
