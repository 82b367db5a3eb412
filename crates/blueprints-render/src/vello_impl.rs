//! Vello-backed drawing surface.

use crate::surface::DrawingSurface;
use kurbo::{Affine, BezPath, Circle, Point, Rect, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// A fixed-size drawing surface that builds a Vello scene.
///
/// The scene is in surface-local coordinates; place it in a window with
/// [`Scene::append`] and a translation.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    /// Size of the drawable area.
    size: Size,
}

impl VelloSurface {
    /// Create an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
        }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl DrawingSurface for VelloSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, region: Rect, background: Color) {
        // A scene only ever grows; dropping it is the only way to erase.
        if region.union(self.size.to_rect()) == region {
            self.scene.reset();
        }
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, background, None, &region);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.scene.stroke(&Stroke::new(width), Affine::IDENTITY, color, None, path);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let circle = Circle::new(center, radius);
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_count(surface: &VelloSurface) -> u32 {
        surface.scene().encoding().n_paths
    }

    #[test]
    fn test_surface_creation() {
        let surface = VelloSurface::new(Size::new(600.0, 500.0));
        assert!(surface.scene().encoding().is_empty());
        assert_eq!(surface.size(), Size::new(600.0, 500.0));
    }

    #[test]
    fn test_full_clear_resets_scene() {
        let mut surface = VelloSurface::new(Size::new(600.0, 500.0));
        surface.fill_circle(Point::new(10.0, 10.0), 3.0, Color::BLACK);
        surface.fill_circle(Point::new(20.0, 20.0), 3.0, Color::BLACK);
        assert_eq!(path_count(&surface), 2);

        surface.clear(surface.bounds(), Color::WHITE);
        assert_eq!(path_count(&surface), 1);
    }

    #[test]
    fn test_partial_clear_keeps_scene() {
        let mut surface = VelloSurface::new(Size::new(600.0, 500.0));
        surface.fill_circle(Point::new(10.0, 10.0), 3.0, Color::BLACK);
        surface.clear(Rect::new(0.0, 0.0, 50.0, 50.0), Color::WHITE);
        assert_eq!(path_count(&surface), 2);
    }

    #[test]
    fn test_rerender_does_not_grow_scene() {
        let mut surface = VelloSurface::new(Size::new(600.0, 500.0));
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 100.0));

        for _ in 0..3 {
            surface.clear(surface.bounds(), Color::WHITE);
            surface.stroke_path(&path, Color::BLACK, 2.0);
            surface.fill_circle(Point::new(0.0, 0.0), 3.0, Color::BLACK);
        }
        assert_eq!(path_count(&surface), 3);
    }
}
