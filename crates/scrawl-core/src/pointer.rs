//! Pointer ownership and touch gesture classification.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Vertical travel (in surface units) past which a finger touch counts as a scroll.
pub const SCROLL_THRESHOLD: f64 = 20.0;

/// Identifier of a pointer stream, as reported by the host.
pub type PointerId = u64;

/// Kind of device behind a pointer stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Start sample of a finger touch, kept for scroll classification.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FingerStart {
    position: Point,
    id: PointerId,
}

/// Tracks which pointer owns drawing, whether a pen is in contact, and the
/// start of the current finger touch.
///
/// The three pieces of state are independent. Drawing ownership spans a
/// whole stroke, while the finger sample is only consulted on move events
/// against its fixed origin.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    active_draw: Option<PointerId>,
    active_pen: Option<PointerId>,
    finger_start: Option<FingerStart>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the drawing pointer.
    pub fn claim(&mut self, id: PointerId) {
        self.active_draw = Some(id);
    }

    /// Drop drawing ownership.
    pub fn release(&mut self) {
        self.active_draw = None;
    }

    /// Whether any pointer currently owns drawing.
    pub fn is_owned(&self) -> bool {
        self.active_draw.is_some()
    }

    /// Whether `id` is the drawing pointer.
    pub fn owns(&self, id: PointerId) -> bool {
        self.active_draw == Some(id)
    }

    /// True when a different pointer than `id` owns drawing.
    pub fn owned_by_other(&self, id: PointerId) -> bool {
        self.is_owned() && !self.owns(id)
    }

    pub fn owner(&self) -> Option<PointerId> {
        self.active_draw
    }

    pub fn claim_pen(&mut self, id: PointerId) {
        self.active_pen = Some(id);
    }

    pub fn release_pen(&mut self) {
        self.active_pen = None;
    }

    pub fn pen_active(&self) -> bool {
        self.active_pen.is_some()
    }

    /// Record the start of a finger touch.
    pub fn begin_finger_track(&mut self, position: Point, id: PointerId) {
        self.finger_start = Some(FingerStart { position, id });
    }

    pub fn end_finger_track(&mut self) {
        self.finger_start = None;
    }

    /// Id of the tracked finger, if any.
    pub fn tracked_id(&self) -> Option<PointerId> {
        self.finger_start.map(|start| start.id)
    }

    /// Classify a move of finger `id` to `current` against its start sample.
    ///
    /// A scroll is vertical-dominant travel beyond [`SCROLL_THRESHOLD`].
    pub fn is_scroll_gesture(&self, current: Point, id: PointerId) -> bool {
        let Some(start) = self.finger_start.filter(|start| start.id == id) else {
            return false;
        };
        let dy = (current.y - start.position.y).abs();
        let dx = (current.x - start.position.x).abs();
        dy > SCROLL_THRESHOLD && dy > dx
    }
}
