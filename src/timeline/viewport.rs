//! Pixel <-> millisecond mapping for the interactive timeline
//!
//! The viewport is supplied by the host view (pan/zoom live outside this
//! crate). Every conversion here is pure math over that snapshot.

use serde::{Deserialize, Serialize};

/// Visible timeline range and its pixel geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineViewport {
    pub range_start_ms: f64,
    pub range_end_ms: f64,
    /// Width of the track-label sidebar to the left of the time area
    pub sidebar_width_px: f64,
    /// Full element width, sidebar included
    pub total_width_px: f64,
}

impl TimelineViewport {
    pub fn new(
        range_start_ms: f64,
        range_end_ms: f64,
        sidebar_width_px: f64,
        total_width_px: f64,
    ) -> Self {
        Self {
            range_start_ms,
            range_end_ms,
            sidebar_width_px,
            total_width_px,
        }
    }

    /// Pixel width of the time area
    pub fn visible_width_px(&self) -> f64 {
        (self.total_width_px - self.sidebar_width_px).max(0.0)
    }

    pub fn range_ms(&self) -> f64 {
        self.range_end_ms - self.range_start_ms
    }

    /// A degenerate viewport maps every delta to zero
    pub fn is_degenerate(&self) -> bool {
        let range = self.range_ms();
        let width = self.visible_width_px();
        !(range.is_finite() && width.is_finite() && range > 0.0 && width > 0.0)
    }

    /// Convert a duration in ms to a pixel delta
    pub fn value_to_pixels(&self, delta_ms: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        delta_ms * (self.visible_width_px() / self.range_ms())
    }

    /// Convert a pixel delta to a duration in ms
    pub fn pixels_to_value(&self, delta_px: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        delta_px * (self.range_ms() / self.visible_width_px())
    }

    /// Element-local x for an absolute timestamp (for drawing keyframes/regions)
    pub fn ms_to_x(&self, ms: f64) -> f64 {
        self.sidebar_width_px + self.value_to_pixels(ms - self.range_start_ms)
    }

    /// Absolute timestamp under an element-local x, unclamped
    pub fn x_to_ms(&self, local_x: f64) -> f64 {
        self.range_start_ms + self.pixels_to_value(local_x - self.sidebar_width_px)
    }

    /// Timestamp under a pointer, clamped into `[0, total_duration_ms]`.
    ///
    /// `timeline_left` is the element's left edge in the pointer's coordinate
    /// space. Never fails; garbage input lands on 0.
    pub fn pointer_to_ms(&self, pointer_x: f64, timeline_left: f64, total_duration_ms: f64) -> f64 {
        let upper = if total_duration_ms.is_finite() {
            total_duration_ms.max(0.0)
        } else {
            0.0
        };
        let relative_ms = self.pixels_to_value(pointer_x - timeline_left - self.sidebar_width_px);
        let absolute_ms = self.range_start_ms + relative_ms;
        if absolute_ms.is_nan() {
            return 0.0;
        }
        absolute_ms.clamp(0.0, upper)
    }

    /// Whether a timestamp falls inside the visible range
    pub fn is_visible(&self, ms: f64) -> bool {
        ms >= self.range_start_ms && ms <= self.range_end_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> TimelineViewport {
        TimelineViewport::new(2000.0, 12000.0, 80.0, 1000.0)
    }

    #[test]
    fn test_scale_factors() {
        let vp = viewport();
        assert_eq!(vp.visible_width_px(), 920.0);
        assert!((vp.value_to_pixels(10000.0) - 920.0).abs() < 1e-9);
        assert!((vp.pixels_to_value(920.0) - 10000.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let vp = viewport();
        for x in [0.0, 1.0, -250.5, 5434.78, 1e9, -1e-6, 123456.789] {
            let back = vp.pixels_to_value(vp.value_to_pixels(x));
            let tolerance = f64::EPSILON * x.abs().max(1.0) * 4.0;
            assert!((back - x).abs() <= tolerance, "{} -> {}", x, back);
        }
    }

    #[test]
    fn test_pointer_to_ms() {
        let vp = viewport();
        let ms = vp.pointer_to_ms(580.0, 0.0, 60000.0);
        assert!((ms - 7434.78).abs() < 0.01, "got {}", ms);

        // Timeline offset within the page
        let shifted = vp.pointer_to_ms(680.0, 100.0, 60000.0);
        assert!((shifted - ms).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_to_ms_clamps() {
        let vp = TimelineViewport::new(0.0, 10000.0, 80.0, 1080.0);
        // Left of the sidebar edge
        assert_eq!(vp.pointer_to_ms(-500.0, 0.0, 8000.0), 0.0);
        // Past the end of the recording
        assert_eq!(vp.pointer_to_ms(5000.0, 0.0, 8000.0), 8000.0);
        // Nonsense durations never panic
        assert_eq!(vp.pointer_to_ms(500.0, 0.0, -1.0), 0.0);
        assert_eq!(vp.pointer_to_ms(500.0, 0.0, f64::NAN), 0.0);
        assert_eq!(vp.pointer_to_ms(f64::NAN, 0.0, 8000.0), 0.0);
    }

    #[test]
    fn test_ms_to_x_inverts_x_to_ms() {
        let vp = viewport();
        let x = vp.ms_to_x(7000.0);
        assert!((x - (80.0 + 460.0)).abs() < 1e-9);
        assert!((vp.x_to_ms(x) - 7000.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_viewport_maps_to_zero() {
        let empty_range = TimelineViewport::new(500.0, 500.0, 80.0, 1000.0);
        assert!(empty_range.is_degenerate());
        assert_eq!(empty_range.value_to_pixels(100.0), 0.0);
        assert_eq!(empty_range.pixels_to_value(100.0), 0.0);

        let no_width = TimelineViewport::new(0.0, 1000.0, 200.0, 100.0);
        assert_eq!(no_width.visible_width_px(), 0.0);
        assert_eq!(no_width.pointer_to_ms(150.0, 0.0, 1000.0), 0.0);
    }

    #[test]
    fn test_is_visible() {
        let vp = viewport();
        assert!(vp.is_visible(2000.0));
        assert!(vp.is_visible(12000.0));
        assert!(!vp.is_visible(1999.0));
    }
}
