//! Processing module for post-recording transformations
//!
//! Algorithms applied to frozen telemetry during playback and export.

pub mod trail;

pub use trail::{
    trail_points, trail_points_with_config, TrailPoint, DEFAULT_MAX_AGE_MS, DEFAULT_MAX_POINTS,
    MIN_MOVE_SPACING_MS,
};
