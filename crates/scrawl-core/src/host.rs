//! Boundary traits implemented by the application hosting the overlay.
//!
//! The overlay never talks to a window system directly. Everything it needs
//! from the outside world (a surface to draw on, frame ticks, a clock, the
//! document container to freeze) comes through these traits.

use crate::error::OverlayResult;
use crate::pointer::PointerId;
use crate::stroke::{Point, Stroke, StrokeColor};
use crate::Instant;

/// Drawing surface the overlay renders strokes onto.
pub trait StrokeRenderer {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Draw a flat-width polyline. Fewer than two points draws nothing.
    fn draw_polyline(&mut self, points: &[Point], color: StrokeColor, width: f64, opacity: f64);

    /// Re-measure the host bounds and resize the backing buffer.
    ///
    /// Resizing discards the surface contents.
    fn resize(&mut self);

    /// Map a client-space position into surface-local coordinates.
    fn to_surface_point(&self, client: Point) -> Point;

    /// Draw a committed stroke using its own attributes.
    fn draw_stroke(&mut self, stroke: &Stroke, opacity: f64) {
        self.draw_polyline(stroke.points(), stroke.color(), stroke.width(), opacity);
    }
}

/// Handle of a scheduled animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Source of animation frame ticks.
///
/// When a requested frame fires, the host calls
/// [`DrawingOverlay::on_animation_frame`](crate::DrawingOverlay::on_animation_frame)
/// with the handle it returned here.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Disables interaction on the document content under the overlay.
pub trait ContentFreezer {
    fn freeze(&mut self);
    fn unfreeze(&mut self);
}

/// Receives the overlay's status text.
pub trait StatusIndicator {
    fn set_text(&mut self, text: &str);
}

impl<F: FnMut(&str)> StatusIndicator for F {
    fn set_text(&mut self, text: &str) {
        self(text)
    }
}

/// Which input modalities the host offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Keyboard, wheel and a custom cursor.
    #[default]
    Desktop,
    /// Touch toolbar instead of keyboard and wheel.
    Mobile,
}

impl Platform {
    pub fn is_mobile(self) -> bool {
        self == Platform::Mobile
    }
}

/// The document view hosting an overlay.
pub trait OverlayHost: FrameScheduler + ContentFreezer {
    type Surface: StrokeRenderer;

    /// Inject the overlay surface into the document view.
    ///
    /// In pen-only mode the surface starts non-interactive so touches reach
    /// the document underneath.
    fn attach_surface(&mut self, pen_only: bool) -> OverlayResult<Self::Surface>;

    /// Remove everything injected by [`attach_surface`](Self::attach_surface).
    fn detach_surface(&mut self);

    /// Toggle whether the surface receives pointer input.
    fn set_surface_interactive(&mut self, interactive: bool);

    fn capture_pointer(&mut self, id: PointerId);
    fn release_pointer_capture(&mut self, id: PointerId);
    fn has_pointer_capture(&self, id: PointerId) -> bool;

    fn platform(&self) -> Platform;

    fn now(&self) -> Instant;
}
