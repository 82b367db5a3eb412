//! Blueprint path rendering.
//!
//! A frame is: clear, one polyline through every point in order, then a
//! marker per point. Markers come after the stroke so they sit on top of the
//! line wherever the two overlap.

use crate::surface::{DrawingSurface, MarkerRole, PathStyle};
use blueprints_core::fit::{FitTransform, compute_fit};
use kurbo::{BezPath, Point};

/// Draw `points` on `surface` using an already computed transform.
pub fn render<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    transform: &FitTransform,
    style: &PathStyle,
) {
    let region = surface.bounds();
    surface.clear(region, style.background_color);

    if points.is_empty() {
        return;
    }

    let mapped: Vec<Point> = points.iter().map(|p| transform.apply(*p)).collect();

    // A single point has no edges to stroke.
    if mapped.len() > 1 {
        surface.stroke_path(&polyline(&mapped), style.path_color, style.path_width);
    }

    for (index, center) in mapped.iter().enumerate() {
        let color = style.marker_color(MarkerRole::for_index(index));
        surface.fill_circle(*center, style.marker_radius, color);
    }
}

/// Fit `points` into the surface and draw them.
///
/// With no points the surface is only cleared.
pub fn render_blueprint<S: DrawingSurface + ?Sized>(surface: &mut S, points: &[Point], style: &PathStyle) {
    match compute_fit(points, surface.size(), style.margin) {
        Some(transform) => {
            log::debug!(
                "Rendering {} points at scale {:.4} (offset {:.2}, {:.2})",
                points.len(),
                transform.scale,
                transform.offset_x(),
                transform.offset_y()
            );
            render(surface, points, &transform, style);
        }
        None => {
            let region = surface.bounds();
            surface.clear(region, style.background_color);
        }
    }
}

/// Open path through `points` in order.
fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
    }
    path
}
