//! Zoom region contract
//!
//! Schema the external auto-zoom generator must emit, and the helpers the
//! timeline and playback use to consume it.

pub mod generator;
pub mod types;

pub use generator::{regenerate_auto_zoom, run_generator, AutoZoomGenerator};
pub use types::{
    active_region_at, validate_regions, AutoZoomPreset, GeneratedAutoZoom, ZoomFocus, ZoomRegion,
};
