//! Serializable tunables
//!
//! Every field has a default so partially specified settings documents
//! deserialize cleanly.

use crate::processing::trail::{DEFAULT_MAX_AGE_MS, DEFAULT_MAX_POINTS, MIN_MOVE_SPACING_MS};
use serde::{Deserialize, Serialize};

/// Cursor trail sampling settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailConfig {
    /// How far back (ms) a position stays on the trail
    pub max_age_ms: f64,
    /// Upper bound on rendered points
    pub max_points: usize,
    /// Minimum gap (ms) between kept pointer-move samples
    pub min_move_spacing_ms: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_age_ms: DEFAULT_MAX_AGE_MS,
            max_points: DEFAULT_MAX_POINTS,
            min_move_spacing_ms: MIN_MOVE_SPACING_MS,
        }
    }
}
