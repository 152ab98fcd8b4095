//! Overlay host backed by a winit window.

use scrawl_core::{
    ContentFreezer, FrameHandle, FrameScheduler, Instant, OverlayHost, OverlayResult, Platform, PointerId,
};
use scrawl_render::{SurfaceGeometry, VelloSurface};
use std::collections::HashSet;
use std::sync::Arc;
use winit::window::Window;

/// Bookkeeping for the single outstanding animation frame.
///
/// Frames map onto winit redraw requests; a cancelled frame is forgotten so
/// the next redraw does not deliver it.
#[derive(Debug, Default)]
pub(crate) struct FrameSlot {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameSlot {
    pub(crate) fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    pub(crate) fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    pub(crate) fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

/// The demo window, acting as the document view under the overlay.
pub struct WindowHost {
    window: Arc<Window>,
    geometry: SurfaceGeometry,
    frames: FrameSlot,
    frozen: bool,
    interactive: bool,
    captured: HashSet<PointerId>,
}

impl WindowHost {
    pub fn new(window: Arc<Window>, geometry: SurfaceGeometry) -> Self {
        Self {
            window,
            geometry,
            frames: FrameSlot::default(),
            frozen: false,
            interactive: false,
            captured: HashSet::new(),
        }
    }

    /// Track the window's current bounds.
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    /// Frame due on this redraw, if one is still wanted.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frames.take()
    }

    /// Whether the overlay currently takes pointer input.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl FrameScheduler for WindowHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = self.frames.request();
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(handle);
    }
}

impl ContentFreezer for WindowHost {
    fn freeze(&mut self) {
        if !self.frozen {
            log::debug!("Document frozen");
        }
        self.frozen = true;
    }

    fn unfreeze(&mut self) {
        if self.frozen {
            log::debug!("Document unfrozen");
        }
        self.frozen = false;
    }
}

impl OverlayHost for WindowHost {
    type Surface = VelloSurface;

    fn attach_surface(&mut self, pen_only: bool) -> OverlayResult<VelloSurface> {
        self.interactive = !pen_only;
        log::debug!(
            "Attached {}x{} surface",
            self.geometry.width_px(),
            self.geometry.height_px()
        );
        Ok(VelloSurface::new(self.geometry))
    }

    fn detach_surface(&mut self) {
        self.interactive = false;
        self.captured.clear();
        self.window.request_redraw();
    }

    fn set_surface_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    // Winit keeps delivering a pressed button's events to the window, so
    // capture is bookkeeping only.
    fn capture_pointer(&mut self, id: PointerId) {
        self.captured.insert(id);
    }

    fn release_pointer_capture(&mut self, id: PointerId) {
        self.captured.remove(&id);
    }

    fn has_pointer_capture(&self, id: PointerId) -> bool {
        self.captured.contains(&id)
    }

    fn platform(&self) -> Platform {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_slot_delivers_latest_request() {
        let mut slot = FrameSlot::default();
        let first = slot.request();
        let second = slot.request();
        assert_ne!(first, second);
        assert_eq!(slot.take(), Some(second));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_cancelled_frame_is_not_delivered() {
        let mut slot = FrameSlot::default();
        let stale = slot.request();
        slot.cancel(stale);
        assert_eq!(slot.take(), None);

        let live = slot.request();
        slot.cancel(stale);
        assert_eq!(slot.take(), Some(live));
    }
}
