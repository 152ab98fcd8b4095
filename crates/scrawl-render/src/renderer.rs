//! Surface geometry and renderer errors.

use kurbo::{Point, Size};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Placement of the drawing surface inside its host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Top-left corner of the surface in client coordinates.
    pub origin: Point,
    /// Surface size in physical pixels.
    pub size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            size: Size::ZERO,
            scale_factor: 1.0,
        }
    }
}

impl SurfaceGeometry {
    /// Create a geometry covering `size` from the window origin.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the surface origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Backing buffer width, at least one pixel.
    pub fn width_px(&self) -> u32 {
        (self.size.width.round() as u32).max(1)
    }

    /// Backing buffer height, at least one pixel.
    pub fn height_px(&self) -> u32 {
        (self.size.height.round() as u32).max(1)
    }

    /// Map a client position into surface-local coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.origin.x, client.y - self.origin.y)
    }

    /// Whether the surface has no visible area (e.g. a minimized window).
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_subtracts_origin() {
        let geometry = SurfaceGeometry::new(Size::new(800.0, 600.0)).with_origin(Point::new(10.0, 40.0));
        assert_eq!(geometry.to_local(Point::new(15.0, 45.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_pixel_size_never_zero() {
        let geometry = SurfaceGeometry::default();
        assert!(geometry.is_empty());
        assert_eq!(geometry.width_px(), 1);
        assert_eq!(geometry.height_px(), 1);
    }
}
