//! Vello-based stroke surface.

use crate::renderer::SurfaceGeometry;
use kurbo::{Affine, BezPath, Cap, Circle, Join, Point};
use peniko::{Color, Fill};
use scrawl_core::stroke::polyline;
use scrawl_core::{CursorIndicator, Stroke, StrokeColor, StrokeRenderer};
use vello::Scene;

/// Opacity of the cursor dot fill.
const CURSOR_OPACITY: f64 = 0.6;

/// Stroke surface backed by a retained Vello scene.
///
/// Draw calls append to the scene the way a raster canvas accumulates
/// pixels; [`clear`](StrokeRenderer::clear) resets it. The host renders
/// [`compose`](Self::compose) every frame.
pub struct VelloSurface {
    /// Strokes drawn since the last clear.
    scene: Scene,
    geometry: SurfaceGeometry,
    /// Geometry reported by the host, applied on the next resize.
    pending_geometry: Option<SurfaceGeometry>,
    draw_count: usize,
}

impl VelloSurface {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            scene: Scene::new(),
            geometry,
            pending_geometry: None,
            draw_count: 0,
        }
    }

    /// Record new host bounds. They take effect on the next
    /// [`resize`](StrokeRenderer::resize).
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.pending_geometry = Some(geometry);
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Number of polylines in the scene.
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Build the frame to present: strokes, then the cursor dot on top.
    pub fn compose(&self, cursor: Option<&CursorIndicator>) -> Scene {
        let mut frame = Scene::new();
        frame.append(&self.scene, None);

        if let Some(cursor) = cursor.filter(|c| c.is_visible()) {
            let scale = self.geometry.scale_factor;
            let center = self.to_surface_point(cursor.position());
            let dot = Circle::new(center, cursor.diameter() * scale / 2.0);
            frame.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                cursor.color().with_opacity(CURSOR_OPACITY),
                None,
                &dot,
            );
            frame.stroke(
                &kurbo::Stroke::new(scale),
                Affine::IDENTITY,
                Color::from_rgba8(255, 255, 255, 200),
                None,
                &dot,
            );
        }

        frame
    }

    fn stroke_style(&self, width: f64) -> kurbo::Stroke {
        kurbo::Stroke::new(width * self.geometry.scale_factor)
            .with_caps(Cap::Round)
            .with_join(Join::Round)
    }

    fn stroke_path(&mut self, path: &BezPath, color: StrokeColor, width: f64, opacity: f64) {
        let style = self.stroke_style(width);
        self.scene
            .stroke(&style, Affine::IDENTITY, color.with_opacity(opacity), None, path);
        self.draw_count += 1;
    }
}

impl StrokeRenderer for VelloSurface {
    fn clear(&mut self) {
        self.scene.reset();
        self.draw_count = 0;
    }

    fn draw_polyline(&mut self, points: &[Point], color: StrokeColor, width: f64, opacity: f64) {
        if points.len() < 2 {
            return;
        }
        self.stroke_path(&polyline(points), color, width, opacity);
    }

    fn draw_stroke(&mut self, stroke: &Stroke, opacity: f64) {
        if stroke.points().len() < 2 {
            return;
        }
        self.stroke_path(&stroke.to_path(), stroke.color(), stroke.width(), opacity);
    }

    fn resize(&mut self) {
        if let Some(geometry) = self.pending_geometry.take() {
            self.geometry = geometry;
        }
        self.clear();
        log::debug!(
            "Surface resized to {}x{}",
            self.geometry.width_px(),
            self.geometry.height_px()
        );
    }

    fn to_surface_point(&self, client: Point) -> Point {
        self.geometry.to_local(client)
    }
}
