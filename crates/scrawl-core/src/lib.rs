//! Scrawl Core Library
//!
//! Platform-agnostic engine for an ephemeral freehand drawing overlay:
//! pointer ownership and gesture classification, stroke accumulation, and the
//! time-based fade loop. Hosts plug in through the traits in [`host`].

pub mod config;
pub mod cursor;
pub mod error;
pub mod fade;
pub mod host;
pub mod input;
pub mod overlay;
pub mod pointer;
pub mod session;
pub mod shortcuts;
pub mod stroke;
pub mod toolbar;
pub mod winit_input;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Pointer id used for the mouse.
pub const MOUSE_POINTER_ID: pointer::PointerId = 0;

pub use config::OverlaySettings;
pub use cursor::CursorIndicator;
pub use error::{OverlayError, OverlayResult};
pub use fade::{FadeAnimator, FadeMode};
pub use host::{ContentFreezer, FrameHandle, FrameScheduler, OverlayHost, Platform, StatusIndicator, StrokeRenderer};
pub use input::{EventOutcome, KeyInput, Modifiers, OverlayInput, PointerInput, WheelInput};
pub use overlay::{DrawingOverlay, LAYOUT_DEBOUNCE};
pub use pointer::{PointerId, PointerKind, PointerTracker, SCROLL_THRESHOLD};
pub use session::{DrawingSession, StrokeStore};
pub use shortcuts::{OverlayAction, Shortcut, ShortcutRegistry};
pub use stroke::{clamp_width, Point, Stroke, StrokeColor, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
pub use toolbar::{ToolbarButton, ToolbarState};
pub use winit_input::WinitInput;
