//! Host-neutral input events consumed by the overlay.

use crate::pointer::{PointerId, PointerKind};
use kurbo::Point;
use winit::keyboard::Key;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// A pointer down/move/up/cancel sample in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInput {
    pub id: PointerId,
    pub kind: PointerKind,
    pub position: Point,
    /// Samples the platform batched into this event, in arrival order.
    ///
    /// Empty when the platform does not coalesce, in which case `position`
    /// is the only sample.
    pub coalesced: Vec<Point>,
}

impl PointerInput {
    pub fn new(id: PointerId, kind: PointerKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            coalesced: Vec::new(),
        }
    }

    pub fn mouse(position: Point) -> Self {
        Self::new(crate::MOUSE_POINTER_ID, PointerKind::Mouse, position)
    }

    pub fn with_coalesced(mut self, samples: Vec<Point>) -> Self {
        self.coalesced = samples;
        self
    }

    /// All samples carried by this event, in arrival order.
    pub fn samples(&self) -> &[Point] {
        if self.coalesced.is_empty() {
            std::slice::from_ref(&self.position)
        } else {
            &self.coalesced
        }
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Plain character key without modifiers.
    pub fn character(c: &str) -> Self {
        Self::new(Key::Character(c.into()), Modifiers::NONE)
    }
}

/// A wheel notch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    /// Vertical scroll amount; positive means scrolling up, away from the user.
    pub delta_y: f64,
    pub modifiers: Modifiers,
}

/// Any input the overlay reacts to, for hosts that dispatch through a single entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayInput {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    PointerCancel(PointerInput),
    Key(KeyInput),
    Wheel(WheelInput),
    /// The surface's host bounds changed.
    Resize,
    /// The document layout changed; resizing is debounced.
    LayoutChange,
}

/// Whether the overlay consumed an event.
///
/// `Consumed` tells the host to suppress default handling and propagation
/// (context menu, text selection, native scroll or zoom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EventOutcome {
    Consumed,
    PassThrough,
}

impl EventOutcome {
    pub fn is_consumed(self) -> bool {
        self == EventOutcome::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_fall_back_to_position() {
        let input = PointerInput::new(1, PointerKind::Pen, Point::new(3.0, 4.0));
        assert_eq!(input.samples(), &[Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_samples_prefer_coalesced() {
        let input = PointerInput::new(1, PointerKind::Touch, Point::new(3.0, 4.0))
            .with_coalesced(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
        assert_eq!(input.samples(), &[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    }

    #[test]
    fn test_modifiers_from_winit() {
        let state = winit::keyboard::ModifiersState::CONTROL | winit::keyboard::ModifiersState::SHIFT;
        let modifiers = Modifiers::from(state);
        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.meta);
    }
}
