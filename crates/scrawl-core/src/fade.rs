//! Time-based fading of committed strokes.
//!
//! While a fade mode is active, [`FadeAnimator`] runs one redraw pass per
//! animation frame: strokes at or past the mode's duration are evicted, the
//! survivors are redrawn at `1 - age / duration` opacity, and the stroke in
//! progress is drawn on top at full opacity. The loop stops scheduling frames
//! once no strokes remain.

use crate::host::{FrameHandle, FrameScheduler, StrokeRenderer};
use crate::session::StrokeStore;
use crate::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long strokes stay on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeMode {
    /// Strokes never fade.
    #[default]
    Off,
    /// 1 second.
    Fading,
    /// 3 seconds.
    Medium,
    /// 5 seconds.
    Long,
    /// 7 seconds.
    VeryLong,
}

impl FadeMode {
    /// All modes in cycling order.
    pub const ALL: [FadeMode; 5] = [
        FadeMode::Off,
        FadeMode::Fading,
        FadeMode::Medium,
        FadeMode::Long,
        FadeMode::VeryLong,
    ];

    /// Cycle to the next fade mode, wrapping back to `Off`.
    pub fn next(self) -> Self {
        match self {
            FadeMode::Off => FadeMode::Fading,
            FadeMode::Fading => FadeMode::Medium,
            FadeMode::Medium => FadeMode::Long,
            FadeMode::Long => FadeMode::VeryLong,
            FadeMode::VeryLong => FadeMode::Off,
        }
    }

    pub fn is_off(self) -> bool {
        self == FadeMode::Off
    }

    /// Maximum stroke age, or `None` when strokes live forever.
    pub fn duration(self) -> Option<Duration> {
        let millis = match self {
            FadeMode::Off => return None,
            FadeMode::Fading => 1000,
            FadeMode::Medium => 3000,
            FadeMode::Long => 5000,
            FadeMode::VeryLong => 7000,
        };
        Some(Duration::from_millis(millis))
    }

    /// Opacity of a stroke of the given age, in `[0, 1]`.
    pub fn opacity_at(self, age: Duration) -> f64 {
        match self.duration() {
            Some(duration) => (1.0 - age.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Short label for the duration.
    pub fn short_label(self) -> &'static str {
        match self {
            FadeMode::Off => "Off",
            FadeMode::Fading => "1s",
            FadeMode::Medium => "3s",
            FadeMode::Long => "5s",
            FadeMode::VeryLong => "7s",
        }
    }

    /// Status text shown while the overlay is active.
    pub fn label(self) -> String {
        format!("🎨 Drawing (Fade: {})", self.short_label())
    }
}

/// Drives the per-frame fade loop.
///
/// The animator does not own the strokes; every frame reads and evicts
/// through the [`StrokeStore`] it is handed, so evictions are immediately
/// visible to the owner.
#[derive(Debug, Default)]
pub struct FadeAnimator {
    frame: Option<FrameHandle>,
    mode: FadeMode,
}

impl FadeAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Mode the running loop fades with.
    pub fn mode(&self) -> FadeMode {
        self.mode
    }

    /// Start the loop. No-op if already running or `mode` is `Off`.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, mode: FadeMode, scheduler: &mut S) {
        if self.frame.is_some() || mode.is_off() {
            return;
        }
        self.mode = mode;
        self.frame = Some(scheduler.request_frame());
        log::debug!("Fade loop started ({})", mode.short_label());
    }

    /// Cancel the scheduled frame, if any.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
            log::debug!("Fade loop stopped");
        }
    }

    /// Run one frame of the loop.
    ///
    /// Frames whose handle is not the one currently scheduled are ignored.
    /// Returns whether another frame was scheduled.
    pub fn on_frame<T, R, S>(
        &mut self,
        handle: FrameHandle,
        now: Instant,
        store: &mut T,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> bool
    where
        T: StrokeStore + ?Sized,
        R: StrokeRenderer + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.frame != Some(handle) {
            return false;
        }
        self.frame = None;

        let Some(duration) = self.mode.duration() else {
            return false;
        };

        store.retain_strokes(|stroke| stroke.age(now) < duration);

        renderer.clear();
        for stroke in store.strokes() {
            renderer.draw_stroke(stroke, self.mode.opacity_at(stroke.age(now)));
        }
        if let Some(current) = store.in_progress() {
            if !current.points.is_empty() {
                renderer.draw_polyline(current.points, current.color, current.width, 1.0);
            }
        }

        if store.strokes().is_empty() {
            log::debug!("Fade loop finished, no strokes left");
            return false;
        }
        self.frame = Some(scheduler.request_frame());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DrawingSession;
    use crate::stroke::{Point, StrokeColor};

    #[derive(Default)]
    struct Frames {
        next: u64,
        pending: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for Frames {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            let handle = FrameHandle(self.next);
            self.pending.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.pending.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    impl Frames {
        fn take(&mut self) -> FrameHandle {
            self.pending.remove(0)
        }
    }

    #[derive(Default)]
    struct Canvas {
        clears: usize,
        drawn: Vec<(usize, StrokeColor, f64)>,
    }

    impl StrokeRenderer for Canvas {
        fn clear(&mut self) {
            self.clears += 1;
            self.drawn.clear();
        }

        fn draw_polyline(&mut self, points: &[Point], color: StrokeColor, _width: f64, opacity: f64) {
            self.drawn.push((points.len(), color, opacity));
        }

        fn resize(&mut self) {}

        fn to_surface_point(&self, client: Point) -> Point {
            client
        }
    }

    fn commit(session: &mut DrawingSession, color: StrokeColor, at: Instant) {
        session.set_color(color);
        session.begin_stroke(Point::new(0.0, 0.0));
        session.extend_stroke([Point::new(10.0, 10.0)]);
        session.finish_stroke(at);
    }

    #[test]
    fn test_cycle_wraps_after_five() {
        let mut mode = FadeMode::Off;
        for _ in 0..5 {
            mode = mode.next();
        }
        assert_eq!(mode, FadeMode::Off);

        for (i, mode) in FadeMode::ALL.iter().enumerate() {
            assert_eq!(mode.next(), FadeMode::ALL[(i + 1) % FadeMode::ALL.len()]);
        }
    }

    #[test]
    fn test_durations() {
        assert_eq!(FadeMode::Off.duration(), None);
        assert_eq!(FadeMode::Fading.duration(), Some(Duration::from_millis(1000)));
        assert_eq!(FadeMode::Medium.duration(), Some(Duration::from_millis(3000)));
        assert_eq!(FadeMode::Long.duration(), Some(Duration::from_millis(5000)));
        assert_eq!(FadeMode::VeryLong.duration(), Some(Duration::from_millis(7000)));
    }

    #[test]
    fn test_opacity_is_linear() {
        let half = FadeMode::Fading.opacity_at(Duration::from_millis(500));
        assert!((half - 0.5).abs() < 1e-9);
        assert!((FadeMode::Fading.opacity_at(Duration::ZERO) - 1.0).abs() < 1e-9);
        assert!(FadeMode::Fading.opacity_at(Duration::from_millis(2000)).abs() < 1e-9);
        assert!((FadeMode::Off.opacity_at(Duration::from_secs(100)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FadeMode::Off.label(), "🎨 Drawing (Fade: Off)");
        assert_eq!(FadeMode::VeryLong.label(), "🎨 Drawing (Fade: 7s)");
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut frames = Frames::default();
        let mut animator = FadeAnimator::new();

        animator.start(FadeMode::Off, &mut frames);
        assert!(!animator.is_running());

        animator.start(FadeMode::Fading, &mut frames);
        animator.start(FadeMode::Fading, &mut frames);
        assert!(animator.is_running());
        assert_eq!(frames.pending.len(), 1);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut frames = Frames::default();
        let mut animator = FadeAnimator::new();
        animator.start(FadeMode::Medium, &mut frames);

        animator.stop(&mut frames);
        animator.stop(&mut frames);
        assert!(!animator.is_running());
        assert!(frames.pending.is_empty());
        assert_eq!(frames.cancelled.len(), 1);
    }

    #[test]
    fn test_frame_fades_and_evicts() {
        let t0 = Instant::now();
        let mut frames = Frames::default();
        let mut canvas = Canvas::default();
        let mut session = DrawingSession::new(t0);
        let mut animator = FadeAnimator::new();

        commit(&mut session, StrokeColor::Blue, t0);
        animator.start(FadeMode::Fading, &mut frames);

        let handle = frames.take();
        let again = animator.on_frame(handle, t0 + Duration::from_millis(500), &mut session, &mut canvas, &mut frames);
        assert!(again);
        assert_eq!(canvas.drawn.len(), 1);
        assert!((canvas.drawn[0].2 - 0.5).abs() < 1e-6);

        let handle = frames.take();
        let again = animator.on_frame(handle, t0 + Duration::from_millis(1001), &mut session, &mut canvas, &mut frames);
        assert!(!again);
        assert!(session.strokes().is_empty());
        assert!(canvas.drawn.is_empty());
        assert!(!animator.is_running());
        assert!(frames.pending.is_empty());
    }

    #[test]
    fn test_in_progress_drawn_at_full_opacity() {
        let t0 = Instant::now();
        let mut frames = Frames::default();
        let mut canvas = Canvas::default();
        let mut session = DrawingSession::new(t0);
        let mut animator = FadeAnimator::new();

        commit(&mut session, StrokeColor::Red, t0);
        session.set_color(StrokeColor::Yellow);
        session.begin_stroke(Point::new(1.0, 1.0));
        session.extend_stroke([Point::new(2.0, 2.0)]);

        animator.start(FadeMode::Long, &mut frames);
        let handle = frames.take();
        animator.on_frame(handle, t0 + Duration::from_millis(2500), &mut session, &mut canvas, &mut frames);

        assert_eq!(canvas.drawn.len(), 2);
        assert_eq!(canvas.drawn[0].1, StrokeColor::Red);
        assert!((canvas.drawn[0].2 - 0.5).abs() < 1e-6);
        assert_eq!(canvas.drawn[1].1, StrokeColor::Yellow);
        assert!((canvas.drawn[1].2 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stale_frame_ignored() {
        let t0 = Instant::now();
        let mut frames = Frames::default();
        let mut canvas = Canvas::default();
        let mut session = DrawingSession::new(t0);
        let mut animator = FadeAnimator::new();

        commit(&mut session, StrokeColor::Red, t0);
        animator.start(FadeMode::Fading, &mut frames);
        let handle = frames.take();
        animator.stop(&mut frames);

        let again = animator.on_frame(handle, t0 + Duration::from_secs(5), &mut session, &mut canvas, &mut frames);
        assert!(!again);
        assert_eq!(canvas.clears, 0);
        assert_eq!(session.strokes().len(), 1);
    }
}
