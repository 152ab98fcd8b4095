//! Translation of winit window events into overlay input.

use crate::input::{KeyInput, Modifiers, OverlayInput, PointerInput, WheelInput};
use crate::pointer::{PointerId, PointerKind};
use crate::MOUSE_POINTER_ID;
use kurbo::Point;
use winit::event::{ElementState, Force, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};

/// Pixels per wheel line, used to normalize pixel deltas.
const LINE_HEIGHT: f64 = 20.0;

/// Stateful translator from [`WindowEvent`]s to [`OverlayInput`]s.
///
/// Winit reports mouse buttons and cursor motion separately, so the last
/// cursor position and modifier state are tracked here.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    cursor: Point,
    modifiers: Modifiers,
    mouse_down: bool,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor_position(&self) -> Point {
        self.cursor
    }

    /// Translate one window event. Events the overlay does not care about
    /// yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<OverlayInput> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state().into();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                Some(OverlayInput::PointerMove(PointerInput::mouse(self.cursor)))
            }
            WindowEvent::CursorLeft { .. } if self.mouse_down => {
                self.mouse_down = false;
                Some(OverlayInput::PointerCancel(PointerInput::mouse(self.cursor)))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let input = PointerInput::mouse(self.cursor);
                match state {
                    ElementState::Pressed => {
                        self.mouse_down = true;
                        Some(OverlayInput::PointerDown(input))
                    }
                    ElementState::Released => {
                        self.mouse_down = false;
                        Some(OverlayInput::PointerUp(input))
                    }
                }
            }
            WindowEvent::Touch(touch) => Some(translate_touch(touch)),
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(position) => position.y / LINE_HEIGHT,
                };
                Some(OverlayInput::Wheel(WheelInput {
                    delta_y,
                    modifiers: self.modifiers,
                }))
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                Some(OverlayInput::Key(KeyInput::new(event.logical_key.clone(), self.modifiers)))
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => Some(OverlayInput::Resize),
            _ => None,
        }
    }
}

/// Pointer id of a touch contact, kept clear of the mouse id.
pub fn touch_pointer_id(touch_id: u64) -> PointerId {
    touch_id.saturating_add(1)
}

/// Winit has no stylus device type; platforms that report an altitude
/// angle (Apple Pencil) are treated as pens.
pub fn touch_kind(touch: &Touch) -> PointerKind {
    match touch.force {
        Some(Force::Calibrated {
            altitude_angle: Some(_),
            ..
        }) => PointerKind::Pen,
        _ => PointerKind::Touch,
    }
}

fn translate_touch(touch: &Touch) -> OverlayInput {
    let input = PointerInput::new(
        touch_pointer_id(touch.id),
        touch_kind(touch),
        Point::new(touch.location.x, touch.location.y),
    );
    match touch.phase {
        TouchPhase::Started => OverlayInput::PointerDown(input),
        TouchPhase::Moved => OverlayInput::PointerMove(input),
        TouchPhase::Ended => OverlayInput::PointerUp(input),
        TouchPhase::Cancelled => OverlayInput::PointerCancel(input),
    }
}
