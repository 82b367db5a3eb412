//! Command-recording surface.
//!
//! Keeps the list of drawing commands that are still visible. A clear that
//! covers the whole surface discards everything recorded before it, so two
//! identical frames leave the same command list as one.

use crate::surface::DrawingSurface;
use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;

/// A recorded drawing command. Colors are stored as RGBA bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Region erased to a background color.
    Clear { region: Rect, background: [u8; 4] },
    /// Open polyline through `points`.
    Stroke {
        points: Vec<Point>,
        color: [u8; 4],
        width: f64,
    },
    /// Filled circle.
    FillCircle {
        center: Point,
        radius: f64,
        color: [u8; 4],
    },
}

fn rgba(color: Color) -> [u8; 4] {
    let c = color.to_rgba8();
    [c.r, c.g, c.b, c.a]
}

/// Surface that records commands instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Visible commands, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of stroke commands.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count()
    }

    /// Number of straight segments across all strokes.
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .map(|c| match c {
                DrawCommand::Stroke { points, .. } => points.len().saturating_sub(1),
                _ => 0,
            })
            .sum()
    }

    /// Number of circle markers.
    pub fn marker_count(&self) -> usize {
        self.markers().len()
    }

    /// Markers as `(center, radius, rgba)`.
    pub fn markers(&self) -> Vec<(Point, f64, [u8; 4])> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    fn covers_surface(&self, region: Rect) -> bool {
        let full = self.size.to_rect();
        region.x0 <= full.x0 && region.y0 <= full.y0 && region.x1 >= full.x1 && region.y1 >= full.y1
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, region: Rect, background: Color) {
        if self.covers_surface(region) {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear {
            region,
            background: rgba(background),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let mut points = Vec::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => points.push(p),
                PathEl::ClosePath => {
                    if let Some(first) = points.first().copied() {
                        points.push(first);
                    }
                }
            }
        }
        self.commands.push(DrawCommand::Stroke {
            points,
            color: rgba(color),
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color: rgba(color),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_clear_discards_previous() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        surface.fill_circle(Point::new(5.0, 5.0), 3.0, Color::BLACK);
        surface.clear(surface.bounds(), Color::WHITE);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn test_partial_clear_keeps_previous() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        surface.fill_circle(Point::new(5.0, 5.0), 3.0, Color::BLACK);
        surface.clear(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn test_stroke_records_vertices() {
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        surface.stroke_path(&path, Color::BLACK, 2.0);
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!(surface.segment_count(), 2);
    }
}
