//! Fit calculation: map a path's bounding box into a fixed viewport.
//!
//! A single uniform scale is used for both axes, so the path keeps its
//! aspect ratio. The scale is the smaller of the two per-axis candidates,
//! which guarantees the whole path fits in both dimensions.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Divisor used for an axis whose span is zero.
///
/// All points sharing one coordinate would otherwise divide by zero. With a
/// divisor of one the scale stays finite and the degenerate axis is pinned at
/// the margin offset.
pub fn guarded_span(span: f64) -> f64 {
    if span != 0.0 { span } else { 1.0 }
}

/// Map one coordinate from path space into canvas space.
pub fn map_coord(coord: f64, min: f64, scale: f64, margin: f64) -> f64 {
    (coord - min) * scale + margin
}

/// Map a point from path space into canvas space.
pub fn map_point(point: Point, min_x: f64, min_y: f64, scale: f64, margin: f64) -> Point {
    Point::new(
        map_coord(point.x, min_x, scale, margin),
        map_coord(point.y, min_y, scale, margin),
    )
}

/// Axis-aligned bounding box of a point set, in one pass.
///
/// Returns `None` for an empty set.
pub fn bounding_box(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let init = Rect::from_points(*first, *first);
    Some(rest.iter().fold(init, |acc, p| Rect {
        x0: acc.x0.min(p.x),
        y0: acc.y0.min(p.y),
        x1: acc.x1.max(p.x),
        y1: acc.y1.max(p.y),
    }))
}

/// Uniform scale plus offsets that place a path inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Uniform scale factor (always positive).
    pub scale: f64,
    /// Minimum corner of the path's bounding box.
    pub origin: Point,
    /// Raw (unguarded) span of the path on each axis.
    pub extent: Size,
    /// Margin added on both axes after scaling.
    pub margin: f64,
}

impl FitTransform {
    /// Horizontal offset: `canvas_x = x * scale + offset_x`.
    pub fn offset_x(&self) -> f64 {
        self.margin - self.origin.x * self.scale
    }

    /// Vertical offset: `canvas_y = y * scale + offset_y`.
    pub fn offset_y(&self) -> f64 {
        self.margin - self.origin.y * self.scale
    }

    /// Map a path point into canvas coordinates.
    pub fn apply(&self, point: Point) -> Point {
        map_point(point, self.origin.x, self.origin.y, self.scale, self.margin)
    }

    /// The same mapping as an affine transform.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.margin, self.margin))
            * Affine::scale(self.scale)
            * Affine::translate(-self.origin.to_vec2())
    }

    /// Largest canvas coordinate any mapped point can reach on either axis.
    pub fn max_canvas_coord(&self) -> f64 {
        self.margin + self.extent.width.max(self.extent.height) * self.scale
    }
}

/// Compute the transform fitting `points` into `viewport` with `margin`.
///
/// Returns `None` when there is nothing to fit; callers skip drawing then.
pub fn compute_fit(points: &[Point], viewport: Size, margin: f64) -> Option<FitTransform> {
    debug_assert!(viewport.width > 0.0 && viewport.height > 0.0, "viewport must be positive");
    debug_assert!(
        margin >= 0.0 && margin < viewport.width && margin < viewport.height,
        "margin must be non-negative and smaller than the viewport"
    );

    let bounds = bounding_box(points)?;
    let span_x = bounds.width();
    let span_y = bounds.height();

    let scale_x = (viewport.width - margin) / guarded_span(span_x);
    let scale_y = (viewport.height - margin) / guarded_span(span_y);

    Some(FitTransform {
        scale: scale_x.min(scale_y),
        origin: bounds.origin(),
        extent: Size::new(span_x, span_y),
        margin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(600.0, 500.0);
    const MARGIN: f64 = 10.0;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_guarded_span() {
        assert_eq!(guarded_span(0.0), 1.0);
        assert_eq!(guarded_span(-0.0), 1.0);
        assert_eq!(guarded_span(2.5), 2.5);
        assert_eq!(guarded_span(1e-9), 1e-9);
    }

    #[test]
    fn test_empty_has_nothing_to_fit() {
        assert!(compute_fit(&[], VIEWPORT, MARGIN).is_none());
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_scale_is_min_of_axis_candidates() {
        // Wide path: x span 100, y span 10.
        let points = pts(&[(0.0, 0.0), (100.0, 10.0), (50.0, 5.0)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        let candidate_x = (600.0 - MARGIN) / 100.0;
        let candidate_y = (500.0 - MARGIN) / 10.0;
        assert!((fit.scale - candidate_x.min(candidate_y)).abs() < 1e-12);
        assert!((fit.scale - 5.9).abs() < 1e-12);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let points = pts(&[(10.0, 20.0), (40.0, 80.0)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        let a = fit.apply(points[0]);
        let b = fit.apply(points[1]);
        let ratio_in = (80.0 - 20.0) / (40.0 - 10.0);
        let ratio_out = (b.y - a.y) / (b.x - a.x);
        assert!((ratio_in - ratio_out).abs() < 1e-12);
    }

    #[test]
    fn test_zero_span_x_is_finite() {
        let points = pts(&[(7.0, 0.0), (7.0, 50.0), (7.0, 25.0)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        assert!(fit.scale.is_finite());
        assert!(fit.scale > 0.0);
        // Degenerate axis is pinned at the margin.
        for p in &points {
            assert!((fit.apply(*p).x - MARGIN).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_span_y_is_finite() {
        let points = pts(&[(0.0, 3.0), (200.0, 3.0)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        assert!(fit.scale.is_finite() && fit.scale > 0.0);
        assert!((fit.scale - 590.0 / 200.0).abs() < 1e-12);
        assert!((fit.apply(points[1]).y - MARGIN).abs() < 1e-12);
    }

    #[test]
    fn test_single_point() {
        let fit = compute_fit(&pts(&[(5.0, 5.0)]), VIEWPORT, MARGIN).unwrap();
        assert!((fit.scale - 490.0).abs() < 1e-12);
        assert_eq!(fit.apply(Point::new(5.0, 5.0)), Point::new(MARGIN, MARGIN));
    }

    #[test]
    fn test_mapped_points_are_contained() {
        let points = pts(&[
            (-120.0, 33.0),
            (15.5, -8.0),
            (300.0, 410.0),
            (15.5, -8.0),
            (42.0, 99.0),
        ]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        let upper = fit.max_canvas_coord();
        for p in &points {
            let q = fit.apply(*p);
            assert!(q.x >= MARGIN - 1e-9 && q.x <= upper + 1e-9, "x out of range: {q:?}");
            assert!(q.y >= MARGIN - 1e-9 && q.y <= upper + 1e-9, "y out of range: {q:?}");
            assert!(q.x <= VIEWPORT.width + 1e-9 && q.y <= VIEWPORT.height + 1e-9);
        }
    }

    #[test]
    fn test_affine_matches_apply() {
        let points = pts(&[(1.0, 2.0), (9.0, -4.0), (3.5, 7.25)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        let affine = fit.to_affine();
        for p in &points {
            let a = fit.apply(*p);
            let b = affine * *p;
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_offsets() {
        let points = pts(&[(2.0, 4.0), (12.0, 9.0)]);
        let fit = compute_fit(&points, VIEWPORT, MARGIN).unwrap();
        let p = Point::new(6.0, 7.0);
        let q = fit.apply(p);
        assert!((q.x - (p.x * fit.scale + fit.offset_x())).abs() < 1e-9);
        assert!((q.y - (p.y * fit.scale + fit.offset_y())).abs() < 1e-9);
    }

    #[test]
    fn test_map_point_formula() {
        let q = map_point(Point::new(15.0, 30.0), 10.0, 20.0, 2.0, 10.0);
        assert_eq!(q, Point::new(20.0, 30.0));
    }
}
