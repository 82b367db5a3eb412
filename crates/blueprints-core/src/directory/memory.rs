//! In-memory directory implementation.

use super::{BlueprintDirectory, DirectoryError, DirectoryResult};
use crate::blueprint::Blueprint;
use kurbo::Point;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory directory for testing and the bundled server.
#[derive(Default)]
pub struct MemoryDirectory {
    blueprints: RwLock<HashMap<String, Vec<Blueprint>>>,
}

impl MemoryDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the given blueprints.
    pub fn from_blueprints(blueprints: impl IntoIterator<Item = Blueprint>) -> Self {
        let directory = Self::new();
        for blueprint in blueprints {
            directory.insert(blueprint);
        }
        directory
    }

    /// Directory seeded with a few sample blueprints.
    pub fn with_sample_data() -> Self {
        let p = |x: f64, y: f64| Point::new(x, y);
        Self::from_blueprints([
            Blueprint::new("john", "thepaint", vec![p(140.0, 140.0), p(115.0, 115.0), p(220.0, 60.0)]),
            Blueprint::new(
                "john",
                "house",
                vec![
                    p(10.0, 100.0),
                    p(10.0, 40.0),
                    p(60.0, 0.0),
                    p(110.0, 40.0),
                    p(110.0, 100.0),
                    p(10.0, 100.0),
                ],
            ),
            Blueprint::new("john", "draft", Vec::new()),
            Blueprint::new("maria", "line", vec![p(0.0, 0.0), p(300.0, 0.0)]),
            Blueprint::new("maria", "dot", vec![p(42.0, 42.0)]),
            Blueprint::new(
                "maria",
                "zigzag",
                vec![p(0.0, 0.0), p(20.0, 40.0), p(40.0, 0.0), p(60.0, 40.0), p(80.0, 0.0)],
            ),
        ])
    }

    /// Add a blueprint, replacing one with the same author and name.
    pub fn insert(&self, blueprint: Blueprint) {
        let Ok(mut map) = self.blueprints.write() else {
            log::error!("Directory lock poisoned, dropping blueprint {}", blueprint.name);
            return;
        };
        let list = map.entry(blueprint.author.clone()).or_default();
        match list.iter_mut().find(|b| b.name == blueprint.name) {
            Some(existing) => *existing = blueprint,
            None => list.push(blueprint),
        }
    }

    /// Every blueprint of every author.
    pub fn all(&self) -> DirectoryResult<Vec<Blueprint>> {
        let map = self
            .blueprints
            .read()
            .map_err(|e| DirectoryError::Other(format!("Lock error: {}", e)))?;
        let mut authors: Vec<&String> = map.keys().collect();
        authors.sort();
        Ok(authors.into_iter().flat_map(|a| map[a].iter().cloned()).collect())
    }

    /// One blueprint by author and name.
    pub fn get(&self, author: &str, name: &str) -> DirectoryResult<Blueprint> {
        self.blueprints_by_author(author)?
            .into_iter()
            .find(|b| b.name == name)
            .ok_or_else(|| DirectoryError::NotFound(format!("{}/{}", author, name)))
    }
}

impl BlueprintDirectory for MemoryDirectory {
    fn blueprints_by_author(&self, author: &str) -> DirectoryResult<Vec<Blueprint>> {
        let map = self
            .blueprints
            .read()
            .map_err(|e| DirectoryError::Other(format!("Lock error: {}", e)))?;
        match map.get(author) {
            Some(list) if !list.is_empty() => Ok(list.clone()),
            _ => Err(DirectoryError::NotFound(author.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_author() {
        let directory = MemoryDirectory::with_sample_data();
        let list = directory.blueprints_by_author("john").unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|b| b.author == "john"));
    }

    #[test]
    fn test_not_found() {
        let directory = MemoryDirectory::new();
        let result = directory.blueprints_by_author("nobody");
        assert!(matches!(result, Err(DirectoryError::NotFound(ref a)) if a == "nobody"));
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let directory = MemoryDirectory::new();
        directory.insert(Blueprint::new("ana", "a", vec![Point::ZERO]));
        directory.insert(Blueprint::new("ana", "a", vec![Point::ZERO, Point::new(1.0, 1.0)]));
        let list = directory.blueprints_by_author("ana").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].len(), 2);
    }

    #[test]
    fn test_get_and_all() {
        let directory = MemoryDirectory::with_sample_data();
        assert_eq!(directory.get("maria", "dot").unwrap().len(), 1);
        assert!(directory.get("maria", "missing").unwrap_err().is_not_found());
        assert_eq!(directory.all().unwrap().len(), 6);
    }
}
