//! Custom cursor indicator shown on desktop while the overlay is active.

use crate::stroke::StrokeColor;
use kurbo::{Circle, Point};

/// A dot following the mouse that previews the current color and width.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorIndicator {
    position: Point,
    color: StrokeColor,
    width: f64,
    hidden: bool,
}

impl CursorIndicator {
    pub fn new(color: StrokeColor, width: f64) -> Self {
        Self {
            position: Point::ZERO,
            color,
            width,
            hidden: false,
        }
    }

    /// Follow the mouse, in client coordinates.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Track the current color and width.
    pub fn update(&mut self, color: StrokeColor, width: f64) {
        self.color = color;
        self.width = width;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    /// Dot diameter: twice the stroke width.
    pub fn diameter(&self) -> f64 {
        self.width * 2.0
    }

    /// Style class naming the current color.
    pub fn class_name(&self) -> String {
        format!("scrawl-cursor scrawl-cursor-{}", self.color.name())
    }

    /// Outline of the dot centred on the pointer.
    pub fn shape(&self) -> Circle {
        Circle::new(self.position, self.diameter() / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diameter_follows_width() {
        let mut cursor = CursorIndicator::new(StrokeColor::Red, 4.0);
        assert!((cursor.diameter() - 8.0).abs() < f64::EPSILON);

        cursor.update(StrokeColor::Green, 12.0);
        assert!((cursor.diameter() - 24.0).abs() < f64::EPSILON);
        assert_eq!(cursor.class_name(), "scrawl-cursor scrawl-cursor-green");
    }

    #[test]
    fn test_move_and_hide() {
        let mut cursor = CursorIndicator::new(StrokeColor::Blue, 2.0);
        cursor.move_to(Point::new(30.0, 40.0));
        assert_eq!(cursor.position(), Point::new(30.0, 40.0));
        assert!((cursor.shape().radius - 2.0).abs() < f64::EPSILON);

        cursor.set_hidden(true);
        assert!(!cursor.is_visible());
        cursor.set_hidden(false);
        assert!(cursor.is_visible());
    }
}
