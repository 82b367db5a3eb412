//! Drawing surface abstraction and path styling.

use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
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

/// Default drawing surface size, in surface units.
pub const DEFAULT_VIEWPORT: Size = Size::new(600.0, 500.0);

/// Role of a point marker along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// First point in sequence order.
    Start,
    /// Every other point.
    Continuation,
}

impl MarkerRole {
    /// Role of the point at `index`.
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            MarkerRole::Start
        } else {
            MarkerRole::Continuation
        }
    }
}

/// Colors and sizes used to draw a blueprint.
#[derive(Debug, Clone, Copy)]
pub struct PathStyle {
    /// Polyline stroke color.
    pub path_color: Color,
    /// Polyline stroke width.
    pub path_width: f64,
    /// Marker radius.
    pub marker_radius: f64,
    /// Fill of the first point's marker.
    pub start_color: Color,
    /// Fill of every other marker.
    pub rest_color: Color,
    /// Margin kept between the path and the surface edges.
    pub margin: f64,
    /// Color the surface is cleared to.
    pub background_color: Color,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            path_color: Color::from_rgba8(0x34, 0x98, 0xdb, 255), // Blue
            path_width: 2.0,
            marker_radius: 3.0,
            start_color: Color::from_rgba8(0x2e, 0xcc, 0x71, 255), // Green
            rest_color: Color::from_rgba8(0xe7, 0x4c, 0x3c, 255),  // Red
            margin: 10.0,
            background_color: Color::WHITE,
        }
    }
}

impl PathStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker radius.
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Fill color for a marker role.
    pub fn marker_color(&self, role: MarkerRole) -> Color {
        match role {
            MarkerRole::Start => self.start_color,
            MarkerRole::Continuation => self.rest_color,
        }
    }
}

/// A fixed-size 2-D raster target.
///
/// Implementations can record commands, build a Vello scene, or paint
/// through any other backend.
pub trait DrawingSurface {
    /// Size of the drawable area.
    fn size(&self) -> Size;

    /// Erase everything inside `region`.
    fn clear(&mut self, region: Rect, background: Color);

    /// Stroke an open path.
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// The whole drawable area.
    fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}
