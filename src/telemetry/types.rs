use serde::{Deserialize, Serialize};

/// Mouse button carried by pointer down/up events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Coarse key category. Raw key codes are never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCategory {
    Printable,
    Backspace,
    Enter,
    Tab,
    Modifier,
    Shortcut,
    Other,
}

/// A single telemetry event.
///
/// `ts` is milliseconds since the session-local epoch. Events are stored in
/// near-sorted order; consumers tolerate ties and small inversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TelemetryEvent {
    PointerDown {
        ts: f64,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    PointerUp {
        ts: f64,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    PointerMoveSampled {
        ts: f64,
        x: f64,
        y: f64,
    },
    Wheel {
        ts: f64,
        x: f64,
        y: f64,
        #[serde(rename = "deltaX")]
        delta_x: f64,
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    KeyDownCategory {
        ts: f64,
        category: KeyCategory,
    },
}

impl TelemetryEvent {
    /// Timestamp in milliseconds
    pub fn ts(&self) -> f64 {
        match self {
            TelemetryEvent::PointerDown { ts, .. }
            | TelemetryEvent::PointerUp { ts, .. }
            | TelemetryEvent::PointerMoveSampled { ts, .. }
            | TelemetryEvent::Wheel { ts, .. }
            | TelemetryEvent::KeyDownCategory { ts, .. } => *ts,
        }
    }

    /// Pointer position in capture-region pixels, if the event carries one
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            TelemetryEvent::PointerDown { x, y, .. }
            | TelemetryEvent::PointerUp { x, y, .. }
            | TelemetryEvent::PointerMoveSampled { x, y, .. }
            | TelemetryEvent::Wheel { x, y, .. } => Some((*x, *y)),
            TelemetryEvent::KeyDownCategory { .. } => None,
        }
    }
}

/// Kind of capture source the session was recorded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Screen,
    Window,
    #[default]
    Unknown,
}

/// Capture-region rectangle, in the same pixel space as pointer events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle has positive, finite area.
    ///
    /// Degenerate bounds mean "no spatial telemetry".
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Map a pixel position into the [0, 1] square of this rectangle.
    ///
    /// NaN coordinates map to 0.
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        (unit((x - self.x) / self.width), unit((y - self.y) / self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_uses_type_tag() {
        let event = TelemetryEvent::Wheel {
            ts: 12.0,
            x: 1.0,
            y: 2.0,
            delta_x: 0.0,
            delta_y: -3.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "wheel");
        assert_eq!(json["deltaY"], -3.0);

        let parsed: TelemetryEvent = serde_json::from_str(
            r#"{"type":"keyDownCategory","ts":40,"category":"shortcut"}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            TelemetryEvent::KeyDownCategory {
                ts: 40.0,
                category: KeyCategory::Shortcut
            }
        );
    }

    #[test]
    fn test_key_events_have_no_position() {
        let key = TelemetryEvent::KeyDownCategory {
            ts: 5.0,
            category: KeyCategory::Enter,
        };
        assert_eq!(key.position(), None);
        assert_eq!(key.ts(), 5.0);

        let down = TelemetryEvent::PointerDown {
            ts: 7.0,
            x: 3.0,
            y: 4.0,
            button: PointerButton::Left,
        };
        assert_eq!(down.position(), Some((3.0, 4.0)));
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(SourceBounds::new(0.0, 0.0, 1920.0, 1080.0).is_usable());
        assert!(!SourceBounds::new(0.0, 0.0, 0.0, 1080.0).is_usable());
        assert!(!SourceBounds::new(0.0, 0.0, 1920.0, -1.0).is_usable());
        assert!(!SourceBounds::new(0.0, 0.0, f64::NAN, 10.0).is_usable());
    }

    #[test]
    fn test_normalize_clamps_outside_points() {
        let bounds = SourceBounds::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(bounds.normalize(200.0, 100.0), (0.5, 0.5));
        assert_eq!(bounds.normalize(0.0, 400.0), (0.0, 1.0));
        assert_eq!(bounds.normalize(f64::INFINITY, f64::NEG_INFINITY), (1.0, 0.0));
    }

    #[test]
    fn test_normalize_never_yields_nan() {
        let bounds = SourceBounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(bounds.normalize(f64::NAN, 50.0), (0.0, 0.5));
        assert_eq!(bounds.normalize(25.0, f64::NAN), (0.25, 0.0));
    }
}
