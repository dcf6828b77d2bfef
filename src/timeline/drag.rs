//! Drag-to-retime protocol for timeline keyframes and zoom-region edges
//!
//! A [`TimelineDrag`] belongs to one interactive timeline instance. While a
//! drag is active it keeps broad-scope pointer listeners attached (pointer-up
//! must end the drag even when released outside the element). Listeners are
//! detached on every exit path: [`end`](TimelineDrag::end), a replacing
//! [`start`](TimelineDrag::start), and drop.

use crate::timeline::viewport::TimelineViewport;
use crate::zoom::ZoomRegion;
use std::fmt::Debug;

/// Host hook for the pointer-move/pointer-up listeners a drag needs
pub trait DragListeners {
    /// Register move/up listeners at a scope broader than the timeline element
    fn attach(&mut self);

    /// Deregister the listeners registered by `attach`
    fn detach(&mut self);
}

/// For hosts whose pointer routing is always on
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysListening;

impl DragListeners for AlwaysListening {
    fn attach(&mut self) {}

    fn detach(&mut self) {}
}

/// Drag state for one timeline instance
pub struct TimelineDrag<Id: Debug, L: DragListeners> {
    listeners: L,
    active: Option<Id>,
}

impl<Id: Debug, L: DragListeners> TimelineDrag<Id, L> {
    pub fn new(listeners: L) -> Self {
        Self {
            listeners,
            active: None,
        }
    }

    /// Begin dragging `id`. A drag already in progress is abandoned.
    pub fn start(&mut self, id: Id) {
        if let Some(previous) = self.active.take() {
            tracing::debug!("Abandoning drag of {:?} for {:?}", previous, id);
            self.listeners.detach();
        }
        tracing::debug!("Drag started: {:?}", id);
        self.listeners.attach();
        self.active = Some(id);
    }

    /// Handle a pointer move while dragging.
    ///
    /// Maps the pointer to a clamped timestamp and hands it to `on_move`
    /// together with the dragged id. Runs on every move, unbatched. Returns
    /// the timestamp, or `None` when no drag is active.
    pub fn pointer_move<F>(
        &self,
        pointer_x: f64,
        timeline_left: f64,
        viewport: &TimelineViewport,
        total_duration_ms: f64,
        mut on_move: F,
    ) -> Option<f64>
    where
        F: FnMut(&Id, f64),
    {
        let id = self.active.as_ref()?;
        let absolute_ms = viewport.pointer_to_ms(pointer_x, timeline_left, total_duration_ms);
        on_move(id, absolute_ms);
        Some(absolute_ms)
    }

    /// Pointer released anywhere, or the drag was cancelled.
    ///
    /// Always clears the drag; returns the id that was being dragged.
    pub fn end(&mut self) -> Option<Id> {
        let ended = self.active.take();
        if let Some(id) = &ended {
            tracing::debug!("Drag ended: {:?}", id);
            self.listeners.detach();
        }
        ended
    }

    pub fn dragging(&self) -> Option<&Id> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn listeners(&self) -> &L {
        &self.listeners
    }
}

impl<Id: Debug, L: DragListeners> Drop for TimelineDrag<Id, L> {
    fn drop(&mut self) {
        self.end();
    }
}

/// Which boundary of a zoom region is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionEdge {
    Start,
    End,
}

/// Drag target for a zoom-region boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle {
    pub index: usize,
    pub edge: RegionEdge,
}

/// Move callback for region-edge drags.
///
/// Sets the boundary to `ms` when that keeps start < end and leaves the region
/// untouched otherwise. Reapplying the same (handle, ms) is a no-op.
pub fn apply_region_drag(regions: &mut [ZoomRegion], handle: &RegionHandle, ms: f64) -> bool {
    let Some(region) = regions.get_mut(handle.index) else {
        return false;
    };
    let moved = match handle.edge {
        RegionEdge::Start => region.with_start(ms),
        RegionEdge::End => region.with_end(ms),
    };
    match moved {
        Some(updated) => {
            *region = updated;
            true
        }
        None => false,
    }
}
