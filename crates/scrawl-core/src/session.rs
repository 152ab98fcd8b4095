//! Mutable drawing session state owned by the overlay.

use crate::fade::FadeMode;
use crate::stroke::{clamp_width, Point, Stroke, StrokeColor, DEFAULT_STROKE_WIDTH};
use crate::Instant;

/// Borrowed view of the stroke currently being drawn.
#[derive(Debug, Clone, Copy)]
pub struct InProgress<'a> {
    pub points: &'a [Point],
    pub color: StrokeColor,
    pub width: f64,
}

/// Access to the stroke collections, used by the fade animator.
pub trait StrokeStore {
    /// Committed strokes in commit order.
    fn strokes(&self) -> &[Stroke];

    /// Keep only the committed strokes matching `keep`.
    fn retain_strokes<F: FnMut(&Stroke) -> bool>(&mut self, keep: F);

    /// The stroke being drawn, if a gesture is in progress.
    fn in_progress(&self) -> Option<InProgress<'_>>;
}

/// Current color, width and fade mode plus the stroke collections.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    color: StrokeColor,
    width: f64,
    fade_mode: FadeMode,
    drawing: bool,
    current: Vec<Point>,
    strokes: Vec<Stroke>,
    started_at: Instant,
}

impl DrawingSession {
    pub fn new(started_at: Instant) -> Self {
        Self {
            color: StrokeColor::default(),
            width: DEFAULT_STROKE_WIDTH,
            fade_mode: FadeMode::default(),
            drawing: false,
            current: Vec::new(),
            strokes: Vec::new(),
            started_at,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.color = color;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the width, clamped to the allowed range. Returns the stored value.
    pub fn set_width(&mut self, width: f64) -> f64 {
        self.width = clamp_width(width);
        self.width
    }

    pub fn fade_mode(&self) -> FadeMode {
        self.fade_mode
    }

    pub fn set_fade_mode(&mut self, mode: FadeMode) {
        self.fade_mode = mode;
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Start a new stroke seeded with `point`, dropping any unfinished one.
    pub fn begin_stroke(&mut self, point: Point) {
        self.drawing = true;
        self.current.clear();
        self.current.push(point);
    }

    /// Append points to the stroke in progress.
    ///
    /// Returns the number of points held before the append.
    pub fn extend_stroke<I: IntoIterator<Item = Point>>(&mut self, points: I) -> usize {
        let previous = self.current.len();
        self.current.extend(points);
        previous
    }

    pub fn current_points(&self) -> &[Point] {
        &self.current
    }

    /// Commit the stroke in progress, if it has any points, and return to idle.
    ///
    /// Returns whether a stroke was committed.
    pub fn finish_stroke(&mut self, now: Instant) -> bool {
        let points = std::mem::take(&mut self.current);
        self.drawing = false;
        match Stroke::new(points, self.color, self.width, now) {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Empty both the committed strokes and the points of the stroke in progress.
    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
        self.current.clear();
    }

    /// Forget everything, including an unfinished gesture.
    pub fn reset(&mut self) {
        self.clear_strokes();
        self.drawing = false;
    }
}

impl StrokeStore for DrawingSession {
    fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    fn retain_strokes<F: FnMut(&Stroke) -> bool>(&mut self, keep: F) {
        self.strokes.retain(keep);
    }

    fn in_progress(&self) -> Option<InProgress<'_>> {
        self.drawing.then(|| InProgress {
            points: &self.current,
            color: self.color,
            width: self.width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let session = DrawingSession::new(Instant::now());
        assert_eq!(session.color(), StrokeColor::Red);
        assert!((session.width() - 4.0).abs() < f64::EPSILON);
        assert_eq!(session.fade_mode(), FadeMode::Off);
        assert!(!session.is_drawing());
        assert!(session.strokes().is_empty());
    }

    #[test]
    fn test_set_width_clamps() {
        let mut session = DrawingSession::new(Instant::now());
        assert!((session.set_width(-5.0) - 1.0).abs() < f64::EPSILON);
        assert!((session.set_width(999.0) - 32.0).abs() < f64::EPSILON);
        assert!((session.width() - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finish_commits_points_in_order() {
        let start = Instant::now();
        let mut session = DrawingSession::new(start);
        session.set_color(StrokeColor::Green);
        session.begin_stroke(Point::new(1.0, 1.0));
        let previous = session.extend_stroke([Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);
        assert_eq!(previous, 1);

        let now = start + Duration::from_millis(10);
        assert!(session.finish_stroke(now));
        assert!(!session.is_drawing());
        assert!(session.current_points().is_empty());

        let stroke = &session.strokes()[0];
        assert_eq!(
            stroke.points(),
            &[Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)]
        );
        assert_eq!(stroke.color(), StrokeColor::Green);
        assert!(stroke.created_at() >= session.started_at());
    }

    #[test]
    fn test_finish_discards_empty_stroke() {
        let mut session = DrawingSession::new(Instant::now());
        session.begin_stroke(Point::new(1.0, 1.0));
        session.clear_strokes();
        assert!(session.is_drawing());

        assert!(!session.finish_stroke(Instant::now()));
        assert!(session.strokes().is_empty());
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_in_progress_only_while_drawing() {
        let mut session = DrawingSession::new(Instant::now());
        assert!(session.in_progress().is_none());

        session.begin_stroke(Point::new(4.0, 4.0));
        let current = session.in_progress().unwrap();
        assert_eq!(current.points.len(), 1);
        assert_eq!(current.color, StrokeColor::Red);
    }
}
