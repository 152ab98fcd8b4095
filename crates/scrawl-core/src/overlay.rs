//! The drawing overlay: input state machine and stroke lifecycle.
//!
//! A [`DrawingOverlay`] sits on top of a document view. Pointer events are
//! checked against [`PointerTracker`] ownership, accepted samples are appended
//! to the stroke in progress and drawn incrementally, and on release the
//! stroke is committed and the fade loop (re)started.
//!
//! Every handler is a silent no-op when its preconditions do not hold. High
//! frequency pointer streams make that the steady state, not an error.

use crate::config::OverlaySettings;
use crate::cursor::CursorIndicator;
use crate::error::OverlayResult;
use crate::fade::{FadeAnimator, FadeMode};
use crate::host::{FrameHandle, OverlayHost, Platform, StatusIndicator, StrokeRenderer};
use crate::input::{EventOutcome, KeyInput, OverlayInput, PointerInput, WheelInput};
use crate::pointer::{PointerKind, PointerTracker};
use crate::session::{DrawingSession, StrokeStore};
use crate::shortcuts::{OverlayAction, ShortcutRegistry};
use crate::stroke::{Point, Stroke, StrokeColor};
use crate::toolbar::{ToolbarButton, ToolbarState};
use crate::Instant;
use std::time::Duration;

/// Delay between a layout change notification and the resulting resize.
pub const LAYOUT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Callback invoked when the user asks to leave the overlay.
pub type ExitCallback = Box<dyn FnMut()>;

/// An ephemeral drawing overlay bound to one document view.
pub struct DrawingOverlay<H: OverlayHost> {
    host: H,
    surface: H::Surface,
    settings: OverlaySettings,
    platform: Platform,
    session: DrawingSession,
    tracker: PointerTracker,
    animator: FadeAnimator,
    cursor: Option<CursorIndicator>,
    toolbar: Option<ToolbarState>,
    status: Option<Box<dyn StatusIndicator>>,
    on_exit: Option<ExitCallback>,
    /// A resize arrived mid-stroke and runs once the stroke ends.
    pending_resize: bool,
    layout_deadline: Option<Instant>,
    destroyed: bool,
}

impl<H: OverlayHost> DrawingOverlay<H> {
    /// Attach an overlay to `host`.
    ///
    /// Fails with [`OverlayError::SurfaceUnavailable`](crate::OverlayError::SurfaceUnavailable)
    /// when the host cannot provide a drawing surface; nothing stays frozen in
    /// that case.
    ///
    /// `on_exit` runs when the user presses Escape or the toolbar's Exit
    /// button. The host is expected to [`destroy`](Self::destroy) the overlay
    /// afterwards.
    pub fn create<F>(
        mut host: H,
        settings: OverlaySettings,
        status: Option<Box<dyn StatusIndicator>>,
        on_exit: F,
    ) -> OverlayResult<Self>
    where
        F: FnMut() + 'static,
    {
        let platform = host.platform();

        if !settings.pen_only_mode {
            host.freeze();
        }

        let mut surface = match host.attach_surface(settings.pen_only_mode) {
            Ok(surface) => surface,
            Err(e) => {
                if !settings.pen_only_mode {
                    host.unfreeze();
                }
                log::warn!("Cannot create drawing overlay: {}", e);
                return Err(e);
            }
        };
        surface.resize();

        let session = DrawingSession::new(host.now());
        let cursor = match platform {
            Platform::Desktop => Some(CursorIndicator::new(session.color(), session.width())),
            Platform::Mobile => None,
        };
        let toolbar = match platform {
            Platform::Mobile => Some(ToolbarState::new(session.width(), session.fade_mode())),
            Platform::Desktop => None,
        };

        let mut overlay = Self {
            host,
            surface,
            settings,
            platform,
            session,
            tracker: PointerTracker::new(),
            animator: FadeAnimator::new(),
            cursor,
            toolbar,
            status,
            on_exit: Some(Box::new(on_exit)),
            pending_resize: false,
            layout_deadline: None,
            destroyed: false,
        };
        overlay.update_status();

        log::info!(
            "Drawing overlay created ({:?}, pen only: {})",
            platform,
            settings.pen_only_mode
        );
        Ok(overlay)
    }

    /// Dispatch any input to its handler.
    pub fn handle(&mut self, input: &OverlayInput) -> EventOutcome {
        match input {
            OverlayInput::PointerDown(pointer) => self.on_pointer_down(pointer),
            OverlayInput::PointerMove(pointer) => self.on_pointer_move(pointer),
            OverlayInput::PointerUp(pointer) => self.on_pointer_up(pointer),
            OverlayInput::PointerCancel(pointer) => self.on_pointer_cancel(pointer),
            OverlayInput::Key(key) => self.on_key(key),
            OverlayInput::Wheel(wheel) => self.on_wheel(*wheel),
            OverlayInput::Resize => {
                self.on_resize();
                EventOutcome::PassThrough
            }
            OverlayInput::LayoutChange => {
                self.on_layout_change();
                EventOutcome::PassThrough
            }
        }
    }

    pub fn on_pointer_down(&mut self, input: &PointerInput) -> EventOutcome {
        if self.destroyed {
            return EventOutcome::PassThrough;
        }

        if self.settings.pen_only_mode && input.kind == PointerKind::Touch {
            // Fingers only scroll; remember where the touch began.
            self.tracker.begin_finger_track(input.position, input.id);
            return EventOutcome::PassThrough;
        }

        if self.session.is_drawing() && self.tracker.owned_by_other(input.id) {
            return EventOutcome::PassThrough;
        }

        // Claimed only once the pen owns the stroke, so its release always clears it.
        if self.settings.pen_only_mode && input.kind == PointerKind::Pen {
            self.tracker.claim_pen(input.id);
            self.enable_surface();
        }

        let point = self.surface.to_surface_point(input.position);
        self.session.begin_stroke(point);
        self.tracker.claim(input.id);
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.set_hidden(true);
        }
        self.host.capture_pointer(input.id);

        EventOutcome::Consumed
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) -> EventOutcome {
        if self.destroyed {
            return EventOutcome::PassThrough;
        }

        if input.kind == PointerKind::Mouse {
            if let Some(cursor) = self.cursor.as_mut() {
                cursor.move_to(input.position);
            }
        }

        if self.settings.pen_only_mode
            && input.kind == PointerKind::Touch
            && self.tracker.is_scroll_gesture(input.position, input.id)
        {
            self.tracker.end_finger_track();
            self.disable_surface();
            return EventOutcome::PassThrough;
        }

        if !self.session.is_drawing() || !self.tracker.owns(input.id) {
            return EventOutcome::PassThrough;
        }

        let surface = &mut self.surface;
        let samples: Vec<Point> = input
            .samples()
            .iter()
            .map(|&position| surface.to_surface_point(position))
            .collect();
        let previous = self.session.extend_stroke(samples);

        // Only the new tail is drawn: previous last point through the new end.
        let points = self.session.current_points();
        let segment = if previous > 0 {
            &points[previous - 1..]
        } else {
            points
        };
        surface.draw_polyline(segment, self.session.color(), self.session.width(), 1.0);

        EventOutcome::Consumed
    }

    pub fn on_pointer_up(&mut self, input: &PointerInput) -> EventOutcome {
        if self.destroyed {
            return EventOutcome::PassThrough;
        }
        if self.end_tracked_finger(input) {
            return EventOutcome::PassThrough;
        }
        if !self.session.is_drawing() || !self.tracker.owns(input.id) {
            return EventOutcome::PassThrough;
        }

        self.commit_stroke();
        self.finish_gesture(input);
        EventOutcome::Consumed
    }

    /// The platform aborted a pointer stream. The partial stroke is kept.
    pub fn on_pointer_cancel(&mut self, input: &PointerInput) -> EventOutcome {
        if self.destroyed {
            return EventOutcome::PassThrough;
        }
        if self.end_tracked_finger(input) {
            return EventOutcome::PassThrough;
        }
        if !self.session.is_drawing() || !self.tracker.owns(input.id) {
            return EventOutcome::PassThrough;
        }

        self.commit_stroke();
        self.finish_gesture(input);
        EventOutcome::PassThrough
    }

    /// Desktop key bindings. Unbound keys pass through.
    pub fn on_key(&mut self, input: &KeyInput) -> EventOutcome {
        if self.destroyed || self.platform.is_mobile() {
            return EventOutcome::PassThrough;
        }
        match ShortcutRegistry::resolve(input) {
            Some(action) => {
                self.apply(action);
                EventOutcome::Consumed
            }
            None => EventOutcome::PassThrough,
        }
    }

    /// Ctrl/Cmd + wheel adjusts the width by one per notch.
    pub fn on_wheel(&mut self, input: WheelInput) -> EventOutcome {
        if self.destroyed || self.platform.is_mobile() {
            return EventOutcome::PassThrough;
        }
        if !(input.modifiers.ctrl || input.modifiers.meta) {
            return EventOutcome::PassThrough;
        }
        if input.delta_y > 0.0 {
            self.adjust_width(1.0);
        } else if input.delta_y < 0.0 {
            self.adjust_width(-1.0);
        }
        EventOutcome::Consumed
    }

    /// The surface's host bounds changed. Deferred while a stroke is in progress.
    pub fn on_resize(&mut self) {
        if self.destroyed {
            return;
        }
        if self.session.is_drawing() {
            if !self.pending_resize {
                log::debug!("Resize deferred until the stroke ends");
            }
            self.pending_resize = true;
            return;
        }
        self.perform_resize();
    }

    /// The document layout changed. Resizes after [`LAYOUT_DEBOUNCE`]; call
    /// [`poll`](Self::poll) to let it run.
    pub fn on_layout_change(&mut self) {
        if self.destroyed {
            return;
        }
        self.layout_deadline = Some(self.host.now() + LAYOUT_DEBOUNCE);
    }

    /// Run due timers. Returns when the next one is due, if any.
    pub fn poll(&mut self) -> Option<Instant> {
        let deadline = self.layout_deadline?;
        if self.host.now() < deadline {
            return Some(deadline);
        }
        self.layout_deadline = None;
        self.on_resize();
        None
    }

    /// A frame requested through the host's scheduler fired.
    pub fn on_animation_frame(&mut self, handle: FrameHandle) {
        if self.destroyed {
            return;
        }
        let now = self.host.now();
        self.animator
            .on_frame(handle, now, &mut self.session, &mut self.surface, &mut self.host);
    }

    /// Carry out a user action from a shortcut or toolbar button.
    pub fn apply(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::SetColor(color) => self.set_color(color),
            OverlayAction::SetWidth(width) => self.set_width(width),
            OverlayAction::AdjustWidth(delta) => self.adjust_width(delta),
            OverlayAction::SetFadeMode(mode) => self.set_fade_mode(mode),
            OverlayAction::CycleFadeMode => self.cycle_fade_mode(),
            OverlayAction::Clear => self.clear(),
            OverlayAction::Exit => self.request_exit(),
        }
    }

    /// Tap a toolbar button. Returns `None` when there is no toolbar.
    pub fn press_toolbar(&mut self, button: ToolbarButton) -> Option<OverlayAction> {
        if self.destroyed {
            return None;
        }
        let action = self.toolbar.as_mut()?.press(button);
        self.apply(action);
        Some(action)
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.session.set_color(color);
        self.update_cursor();
        log::debug!("Color set to {} ({})", color.name(), color.hex());
    }

    /// Set the width of future strokes, clamped to `[1, 32]`.
    pub fn set_width(&mut self, width: f64) {
        let width = self.session.set_width(width);
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.set_width(width);
        }
        self.update_cursor();
    }

    pub fn adjust_width(&mut self, delta: f64) {
        self.set_width(self.session.width() + delta);
    }

    pub fn set_fade_mode(&mut self, mode: FadeMode) {
        self.session.set_fade_mode(mode);
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.set_fade_mode(mode);
        }
        self.update_status();
        log::debug!("Fade mode set to {}", mode.short_label());

        if mode.is_off() {
            self.animator.stop(&mut self.host);
            // Strokes no longer age; show them opaque again.
            self.redraw_all();
        } else if !self.session.strokes().is_empty() {
            if self.animator.mode() != mode {
                self.animator.stop(&mut self.host);
            }
            self.animator.start(mode, &mut self.host);
        }
    }

    /// Advance through off, 1s, 3s, 5s, 7s and back to off.
    pub fn cycle_fade_mode(&mut self) {
        self.set_fade_mode(self.session.fade_mode().next());
    }

    /// Erase every stroke and stop fading.
    pub fn clear(&mut self) {
        self.session.clear_strokes();
        self.surface.clear();
        self.animator.stop(&mut self.host);
    }

    /// Tear the overlay down. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        self.host.unfreeze();
        self.animator.stop(&mut self.host);
        if let Some(id) = self.tracker.owner() {
            if self.host.has_pointer_capture(id) {
                self.host.release_pointer_capture(id);
            }
        }
        self.host.detach_surface();

        self.status = None;
        self.cursor = None;
        self.toolbar = None;
        self.on_exit = None;
        self.session.reset();
        self.tracker = PointerTracker::new();
        self.pending_resize = false;
        self.layout_deadline = None;

        log::info!("Drawing overlay destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize
    }

    pub fn is_fading(&self) -> bool {
        self.animator.is_running()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.session.strokes()
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn cursor(&self) -> Option<&CursorIndicator> {
        self.cursor.as_ref()
    }

    pub fn toolbar(&self) -> Option<&ToolbarState> {
        self.toolbar.as_ref()
    }

    pub fn status_text(&self) -> String {
        self.session.fade_mode().label()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut H::Surface {
        &mut self.surface
    }

    fn commit_stroke(&mut self) {
        let now = self.host.now();
        if self.session.finish_stroke(now) {
            log::debug!("Committed stroke #{}", self.session.strokes().len());
            self.animator.start(self.session.fade_mode(), &mut self.host);
        }
    }

    fn finish_gesture(&mut self, input: &PointerInput) {
        self.tracker.release();
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.set_hidden(false);
        }
        if self.host.has_pointer_capture(input.id) {
            self.host.release_pointer_capture(input.id);
        }
        if input.kind == PointerKind::Pen {
            self.tracker.release_pen();
        }
        if self.pending_resize {
            self.perform_resize();
        }
    }

    /// A tracked finger lifting only ends scroll tracking.
    fn end_tracked_finger(&mut self, input: &PointerInput) -> bool {
        if self.settings.pen_only_mode
            && input.kind == PointerKind::Touch
            && self.tracker.tracked_id() == Some(input.id)
        {
            self.tracker.end_finger_track();
            return true;
        }
        false
    }

    fn perform_resize(&mut self) {
        self.pending_resize = false;
        self.surface.resize();
        self.surface.clear();
        for stroke in self.session.strokes() {
            self.surface.draw_stroke(stroke, 1.0);
        }
        log::debug!("Surface resized, redrew {} strokes", self.session.strokes().len());
    }

    fn redraw_all(&mut self) {
        self.surface.clear();
        for stroke in self.session.strokes() {
            self.surface.draw_stroke(stroke, 1.0);
        }
        if let Some(current) = self.session.in_progress() {
            self.surface
                .draw_polyline(current.points, current.color, current.width, 1.0);
        }
    }

    /// Pen contact in pen-only mode: take input and freeze the document.
    fn enable_surface(&mut self) {
        if !self.settings.pen_only_mode {
            return;
        }
        self.host.set_surface_interactive(true);
        self.host.freeze();
    }

    /// Finger scroll in pen-only mode: hand input back to the document.
    fn disable_surface(&mut self) {
        if !self.settings.pen_only_mode {
            return;
        }
        if self.settings.clears_on_scroll() {
            self.clear();
        }
        self.host.set_surface_interactive(false);
        self.host.unfreeze();
    }

    fn update_cursor(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.update(self.session.color(), self.session.width());
        }
    }

    fn update_status(&mut self) {
        let label = self.session.fade_mode().label();
        if let Some(status) = self.status.as_mut() {
            status.set_text(&label);
        }
    }

    fn request_exit(&mut self) {
        log::debug!("Exit requested");
        if let Some(on_exit) = self.on_exit.as_mut() {
            on_exit();
        }
    }
}

impl<H: OverlayHost> Drop for DrawingOverlay<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
