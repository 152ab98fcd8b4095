//! Stroke geometry and drawing attributes.

use crate::Instant;
use kurbo::BezPath;
use peniko::Color;
use serde::{Deserialize, Serialize};

pub use kurbo::Point;

/// Smallest allowed stroke width.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Largest allowed stroke width.
pub const MAX_STROKE_WIDTH: f64 = 32.0;
/// Width used when an overlay is created.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Widths bound to the digit keys 1-5.
pub const PRESET_WIDTHS: [f64; 5] = [2.0, 4.0, 8.0, 12.0, 16.0];

/// Clamp a requested width into `[MIN_STROKE_WIDTH, MAX_STROKE_WIDTH]`.
///
/// NaN collapses to the minimum.
pub fn clamp_width(width: f64) -> f64 {
    if width.is_nan() {
        return MIN_STROKE_WIDTH;
    }
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

/// The fixed drawing palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
    #[default]
    Red,
    Yellow,
    Blue,
    Green,
    Orange,
    Pink,
}

impl StrokeColor {
    /// All palette entries in toolbar order.
    pub const ALL: [StrokeColor; 6] = [
        StrokeColor::Red,
        StrokeColor::Yellow,
        StrokeColor::Blue,
        StrokeColor::Green,
        StrokeColor::Orange,
        StrokeColor::Pink,
    ];

    /// Lowercase name, also used as the cursor class suffix.
    pub fn name(self) -> &'static str {
        match self {
            StrokeColor::Red => "red",
            StrokeColor::Yellow => "yellow",
            StrokeColor::Blue => "blue",
            StrokeColor::Green => "green",
            StrokeColor::Orange => "orange",
            StrokeColor::Pink => "pink",
        }
    }

    /// Single-letter label shown on toolbar buttons and bound as a shortcut.
    pub fn label(self) -> &'static str {
        match self {
            StrokeColor::Red => "R",
            StrokeColor::Yellow => "Y",
            StrokeColor::Blue => "B",
            StrokeColor::Green => "G",
            StrokeColor::Orange => "O",
            StrokeColor::Pink => "P",
        }
    }

    /// Hex notation of the color.
    pub fn hex(self) -> &'static str {
        match self {
            StrokeColor::Red => "#ff0000",
            StrokeColor::Yellow => "#ffff00",
            StrokeColor::Blue => "#0000ff",
            StrokeColor::Green => "#00ff00",
            StrokeColor::Orange => "#ff8800",
            StrokeColor::Pink => "#ff69b4",
        }
    }

    /// Get the opaque peniko color.
    pub fn to_color(self) -> Color {
        match self {
            StrokeColor::Red => Color::from_rgba8(255, 0, 0, 255),
            StrokeColor::Yellow => Color::from_rgba8(255, 255, 0, 255),
            StrokeColor::Blue => Color::from_rgba8(0, 0, 255, 255),
            StrokeColor::Green => Color::from_rgba8(0, 255, 0, 255),
            StrokeColor::Orange => Color::from_rgba8(255, 136, 0, 255),
            StrokeColor::Pink => Color::from_rgba8(255, 105, 180, 255),
        }
    }

    /// Get the color with `opacity` (clamped to `[0, 1]`) applied to alpha.
    pub fn with_opacity(self, opacity: f64) -> Color {
        let rgba = self.to_color().to_rgba8();
        let alpha = (rgba.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        color.to_color()
    }
}

/// A committed drawing action.
///
/// Created at pointer release and never mutated afterwards. Color and width
/// are frozen at commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    color: StrokeColor,
    width: f64,
    created_at: Instant,
}

impl Stroke {
    /// Build a stroke from recorded points. Returns `None` for an empty sequence.
    pub fn new(points: Vec<Point>, color: StrokeColor, width: f64, created_at: Instant) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            color,
            width: clamp_width(width),
            created_at,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> StrokeColor {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Age of the stroke at `now`, saturating at zero.
    pub fn age(&self, now: Instant) -> std::time::Duration {
        now.saturating_duration_since(self.created_at)
    }

    /// Polyline path through the stroke's points.
    pub fn to_path(&self) -> BezPath {
        polyline(&self.points)
    }
}

/// Build a polyline path through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(*first);
    for point in &points[1..] {
        path.line_to(*point);
    }
    path
}
