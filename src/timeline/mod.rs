//! Interactive timeline support
//!
//! Viewport math and the drag protocol used to retime keyframes and
//! zoom-region boundaries.

pub mod drag;
pub mod viewport;

pub use drag::{apply_region_drag, AlwaysListening, DragListeners, RegionEdge, RegionHandle, TimelineDrag};
pub use viewport::TimelineViewport;
