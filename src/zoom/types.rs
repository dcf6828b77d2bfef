use crate::telemetry::error::{TelemetryError, TelemetryResult};
use crate::telemetry::types::SourceBounds;
use serde::{Deserialize, Serialize};

/// Normalized focus point (0-1 in both axes, relative to the source bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomFocus {
    pub x: f64,
    pub y: f64,
}

impl ZoomFocus {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self { x: 0.5, y: 0.5 }
    }

    /// Focus under a pointer dragged over the preview, clamped into [0, 1].
    ///
    /// Degenerate bounds fall back to the center.
    pub fn from_pointer(x: f64, y: f64, bounds: &SourceBounds) -> Self {
        if !bounds.is_usable() {
            return Self::center();
        }
        let (fx, fy) = bounds.normalize(x, y);
        if fx.is_nan() || fy.is_nan() {
            return Self::center();
        }
        Self::new(fx, fy)
    }
}

/// A timed zoom interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRegion {
    pub start_ms: f64,
    pub end_ms: f64,
    /// Zoom factor; 1.0 means unzoomed, below 1.0 zooms out
    pub depth: f64,
    pub focus: ZoomFocus,
}

impl ZoomRegion {
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// Whether `ms` falls inside `[start_ms, end_ms)`
    pub fn contains(&self, ms: f64) -> bool {
        ms >= self.start_ms && ms < self.end_ms
    }

    /// Move the start boundary; `None` if that would leave start >= end
    pub fn with_start(&self, start_ms: f64) -> Option<Self> {
        (start_ms.is_finite() && start_ms < self.end_ms).then(|| Self { start_ms, ..*self })
    }

    /// Move the end boundary; `None` if that would leave start >= end
    pub fn with_end(&self, end_ms: f64) -> Option<Self> {
        (end_ms.is_finite() && end_ms > self.start_ms).then(|| Self { end_ms, ..*self })
    }

    fn check(&self) -> Result<(), String> {
        if !self.start_ms.is_finite() || !self.end_ms.is_finite() {
            return Err("timestamps must be finite".to_string());
        }
        if self.start_ms >= self.end_ms {
            return Err(format!(
                "startMs {} must be before endMs {}",
                self.start_ms, self.end_ms
            ));
        }
        if !self.depth.is_finite() || self.depth <= 0.0 {
            return Err(format!("depth {} must be finite and positive", self.depth));
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.focus.x) || !in_unit(self.focus.y) {
            return Err(format!(
                "focus ({}, {}) must lie within [0, 1]",
                self.focus.x, self.focus.y
            ));
        }
        Ok(())
    }
}

/// Auto-zoom intensity preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoZoomPreset {
    Subtle,
    #[default]
    Balanced,
    Intense,
}

/// Auto-zoom generation result attached to a telemetry session.
///
/// Its presence marks the regions as "auto-generated, not hand-edited".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAutoZoom {
    pub algorithm_version: String,
    pub preset: AutoZoomPreset,
    pub generated_at_ms: i64,
    pub regions: Vec<ZoomRegion>,
}

/// Check every region against the contract invariants
pub fn validate_regions(regions: &[ZoomRegion]) -> TelemetryResult<()> {
    for (index, region) in regions.iter().enumerate() {
        region
            .check()
            .map_err(|reason| TelemetryError::InvalidZoomRegion { index, reason })?;
    }
    Ok(())
}

/// Region active at `ms`. Overlaps resolve to the last region in storage order.
pub fn active_region_at(regions: &[ZoomRegion], ms: f64) -> Option<&ZoomRegion> {
    regions.iter().rev().find(|r| r.contains(ms))
}
