//! Blueprint data model.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::fit::bounding_box;

/// A named, authored, ordered sequence of points.
///
/// The order of `points` defines the path. A blueprint may have no points at
/// all, and points may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Name, unique within one author's result set.
    pub name: String,
    /// Path vertices in drawing order.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Author the blueprint belongs to.
    pub author: String,
}

impl Blueprint {
    /// Create a blueprint from its parts.
    pub fn new(author: impl Into<String>, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
            author: author.into(),
        }
    }

    /// Number of points in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds of the path, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        bounding_box(&self.points)
    }

    /// Parse a list of blueprints from a JSON array.
    pub fn list_from_json(json: &str) -> Result<Vec<Blueprint>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize a list of blueprints to a JSON array.
    pub fn list_to_json(blueprints: &[Blueprint]) -> Result<String, serde_json::Error> {
        serde_json::to_string(blueprints)
    }
}

/// Sum of the point counts of every blueprint in the list.
pub fn total_points(blueprints: &[Blueprint]) -> usize {
    blueprints.iter().map(Blueprint::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_len(name: &str, n: usize) -> Blueprint {
        let points = (0..n).map(|i| Point::new(i as f64, i as f64 * 2.0)).collect();
        Blueprint::new("john", name, points)
    }

    #[test]
    fn test_total_points() {
        let blueprints = vec![with_len("a", 4), with_len("b", 0), with_len("c", 7)];
        assert_eq!(total_points(&blueprints), 11);
    }

    #[test]
    fn test_total_points_empty_list() {
        assert_eq!(total_points(&[]), 0);
    }

    #[test]
    fn test_parse_directory_response() {
        let json = r#"[
            {"author":"john","points":[{"x":140,"y":140},{"x":115,"y":115}],"name":"thepaint"},
            {"author":"john","points":[],"name":"empty"}
        ]"#;
        let list = Blueprint::list_from_json(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "thepaint");
        assert_eq!(list[0].points[1], Point::new(115.0, 115.0));
        assert!(list[1].is_empty());
    }

    #[test]
    fn test_missing_points_is_empty() {
        let json = r#"[{"author":"ana","name":"draft"}]"#;
        let list = Blueprint::list_from_json(json).unwrap();
        assert!(list[0].points.is_empty());
        assert!(list[0].bounds().is_none());
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let original = vec![with_len("zigzag", 5)];
        let json = Blueprint::list_to_json(&original).unwrap();
        let parsed = Blueprint::list_from_json(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_bounds() {
        let bp = Blueprint::new(
            "john",
            "tri",
            vec![Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(0.0, 0.0)],
        );
        let bounds = bp.bounds().unwrap();
        assert_eq!(bounds, Rect::new(-2.0, -1.0, 3.0, 4.0));
    }
}
