//! Thread-safe quadtree spatial index.
//!
//! `SpatialIndex` owns a recursive quadtree behind a single
//! `Arc<RwLock<..>>`. Writers (`insert`, `remove`, `update`, `clear`) hold the
//! lock exclusively for the whole call, including any split. Readers (every
//! query and `stats`) share it, so any number of queries run together but
//! never observe a half-applied write.
//!
//! # Examples
//!
//! ```rust
//! use quadspace::{Position, SpatialIndex, TrackedObject};
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index: SpatialIndex<TrackedObject> = SpatialIndex::new(100, 100, 10)?;
//!
//! // Clone the handle for use in another thread
//! let writer = index.clone();
//! let handle = thread::spawn(move || {
//!     let orc = Arc::new(TrackedObject::new("orc", Position::new(10, 10)));
//!     writer.insert(orc).unwrap();
//! });
//!
//! index.insert(Arc::new(TrackedObject::new("elf", Position::new(12, 10))))?;
//! handle.join().unwrap();
//!
//! let near = index.knn(&Position::new(11, 10), 2);
//! assert_eq!(near.len(), 2);
//! # Ok(())
//! # }
//! ```

mod node;
mod query;

pub use query::Neighbor;

use parking_lot::RwLock;
use std::sync::Arc;

use crate::builder::IndexBuilder;
use crate::config::{BoundingBox, Config, IndexStats, Position};
use crate::error::{QuadspaceError, Result};
use crate::object::Tracked;
use node::{Entry, Node};

/// A quadtree over point-located objects in the world `[0, width] x [0, height]`.
///
/// `SpatialIndex` is a handle: cloning it is cheap and every clone sees the
/// same tree. It is `Send + Sync` whenever `T` is.
#[derive(Debug)]
pub struct SpatialIndex<T: ?Sized> {
    bounds: BoundingBox,
    config: Config,
    root: Arc<RwLock<Node<T>>>,
}

impl<T: ?Sized> Clone for SpatialIndex<T> {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            config: self.config.clone(),
            root: Arc::clone(&self.root),
        }
    }
}

impl<T: Tracked + ?Sized> SpatialIndex<T> {
    /// Creates an index over `[0, width] x [0, height]` with the given minimum
    /// cell size and default settings otherwise.
    pub fn new(width: i32, height: i32, cell_size: u32) -> Result<Self> {
        let config = Config {
            cell_size,
            ..Config::default()
        };
        Self::with_config(width, height, config)
    }

    /// Creates an index with a full custom configuration.
    pub fn with_config(width: i32, height: i32, config: Config) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(QuadspaceError::InvalidConfig(format!(
                "World extent must be non-negative, got {}x{}",
                width, height
            )));
        }
        config.validate().map_err(QuadspaceError::InvalidConfig)?;

        let bounds = BoundingBox::from_extent(width, height);
        log::debug!(
            "Created spatial index over {} (cell size {}, split threshold {})",
            bounds,
            config.cell_size,
            config.split_threshold
        );

        Ok(Self {
            bounds,
            config,
            root: Arc::new(RwLock::new(Node::leaf(bounds, 0))),
        })
    }

    /// Starts a builder for an index over `[0, width] x [0, height]`.
    pub fn builder(width: i32, height: i32) -> IndexBuilder {
        IndexBuilder::new(width, height)
    }

    // ===== Mutations =====

    /// Indexes `object` at its current position.
    ///
    /// Fails with `OutOfBounds` if the position lies outside the world, and
    /// with `DuplicateId` if duplicate rejection is configured and the
    /// identity is already indexed. The index is unchanged on failure.
    pub fn insert(&self, object: Arc<T>) -> Result<()> {
        let position = object.position();
        self.check_bounds(position)?;

        let mut root = self.root.write();
        if self.config.reject_duplicate_ids && root.find(object.id()).is_some() {
            return Err(QuadspaceError::DuplicateId(object.id().to_string()));
        }

        log::trace!("Inserting {} at {}", object.id(), position);
        root.insert(Entry::new(object, position), &self.config)
    }

    /// Removes the object with identity `id` and hands it back.
    ///
    /// When several entries share the identity only the first one found is
    /// removed.
    pub fn remove(&self, id: &str) -> Result<Arc<T>> {
        let mut root = self.root.write();
        let entry = root
            .remove(id)
            .ok_or_else(|| QuadspaceError::NotFound(id.to_string()))?;

        log::trace!("Removed {} from {}", id, entry.position);
        Ok(entry.object)
    }

    /// Moves the object with identity `id` to `new_position`.
    ///
    /// The new position is checked against the world bounds before anything
    /// is removed, and a failed re-insert puts the object back where it was,
    /// so on any error the index is left exactly as it was found.
    pub fn update(&self, id: &str, new_position: Position) -> Result<()> {
        self.check_bounds(new_position)?;

        let mut root = self.root.write();
        let entry = root
            .remove(id)
            .ok_or_else(|| QuadspaceError::NotFound(id.to_string()))?;
        let previous = entry.clone();

        match root.insert(Entry::new(entry.object, new_position), &self.config) {
            Ok(()) => {
                log::trace!("Moved {} from {} to {}", id, previous.position, new_position);
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "Failed to move {} to {}, restoring at {}: {}",
                    id,
                    new_position,
                    previous.position,
                    err
                );
                root.insert(previous, &self.config)?;
                Err(err)
            }
        }
    }

    /// Drops every entry and resets the tree to one empty leaf.
    pub fn clear(&self) {
        let mut root = self.root.write();
        *root = Node::leaf(self.bounds, 0);
        log::debug!("Cleared spatial index over {}", self.bounds);
    }

    // ===== Queries =====

    /// Objects indexed exactly at `position`.
    ///
    /// Positions outside the world simply match nothing.
    pub fn query_at(&self, position: &Position) -> Vec<Arc<T>> {
        self.query_within_bbox(&BoundingBox::point(*position))
    }

    /// Objects whose indexed position lies inside `bbox` (edges inclusive).
    pub fn query_within_bbox(&self, bbox: &BoundingBox) -> Vec<Arc<T>> {
        let root = self.root.read();
        query::within_bbox(&root, bbox)
    }

    /// Objects within Euclidean distance `radius` of `center`, unordered.
    ///
    /// A negative or non-finite radius matches nothing.
    pub fn query_within_radius(&self, center: &Position, radius: f64) -> Vec<Arc<T>> {
        let root = self.root.read();
        query::within_radius(&root, center, radius)
            .into_iter()
            .map(|neighbor| neighbor.object)
            .collect()
    }

    /// The `k` objects nearest to `center`, ordered by ascending distance.
    ///
    /// Returns fewer than `k` only when the index holds fewer objects. Ties
    /// come back in no particular order.
    pub fn knn(&self, center: &Position, k: usize) -> Vec<Neighbor<T>> {
        let root = self.root.read();
        query::nearest(
            &root,
            center,
            k,
            f64::from(self.config.cell_size),
            &self.bounds,
        )
    }

    /// Every indexed object.
    pub fn all_objects(&self) -> Vec<Arc<T>> {
        self.query_within_bbox(&self.bounds)
    }

    /// Walks the whole tree and reports its shape.
    pub fn stats(&self) -> IndexStats {
        let root = self.root.read();
        let mut stats = IndexStats::new();
        root.collect_stats(&mut stats);
        stats.finish();
        stats
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.root.read().find(id).map(|entry| Arc::clone(&entry.object))
    }

    /// Where the index currently has `id`, which is the position passed to
    /// the last successful `insert` or `update`.
    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.root.read().find(id).map(|entry| entry.position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.root.read().find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.root.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ===== Accessors =====

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn cell_size(&self) -> u32 {
        self.config.cell_size
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn check_bounds(&self, position: Position) -> Result<()> {
        if self.bounds.contains(&position) {
            Ok(())
        } else {
            Err(QuadspaceError::OutOfBounds {
                position,
                bounds: self.bounds,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::TrackedObject;

    fn obj(id: &str, x: i32, y: i32) -> Arc<TrackedObject> {
        Arc::new(TrackedObject::new(id, Position::new(x, y)))
    }

    fn sorted_ids(objects: Vec<Arc<TrackedObject>>) -> Vec<String> {
        let mut ids: Vec<String> = objects.iter().map(|o| o.id.clone()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_new_validates_inputs() {
        assert!(SpatialIndex::<TrackedObject>::new(100, 100, 10).is_ok());
        assert!(SpatialIndex::<TrackedObject>::new(0, 0, 1).is_ok());
        assert!(matches!(
            SpatialIndex::<TrackedObject>::new(100, 100, 0),
            Err(QuadspaceError::InvalidConfig(_))
        ));
        assert!(matches!(
            SpatialIndex::<TrackedObject>::new(-1, 100, 10),
            Err(QuadspaceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_insert_and_query_at() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("a", 10, 20)).unwrap();
        index.insert(obj("b", 10, 20)).unwrap();
        index.insert(obj("c", 11, 20)).unwrap();

        assert_eq!(sorted_ids(index.query_at(&Position::new(10, 20))), vec!["a", "b"]);
        assert!(index.query_at(&Position::new(500, 500)).is_empty());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_insert_out_of_bounds_leaves_index_unchanged() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("in", 5, 5)).unwrap();

        let err = index.insert(obj("out", 150, 150)).unwrap_err();
        assert!(matches!(err, QuadspaceError::OutOfBounds { .. }));
        assert_eq!(index.len(), 1);
        assert!(!index.contains("out"));
    }

    #[test]
    fn test_remove() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("a", 1, 1)).unwrap();

        let removed = index.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(index.is_empty());
        assert!(matches!(index.remove("a"), Err(QuadspaceError::NotFound(id)) if id == "a"));
    }

    #[test]
    fn test_update_moves_entry() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("mover", 10, 10)).unwrap();
        index.update("mover", Position::new(90, 90)).unwrap();

        assert!(index.query_at(&Position::new(10, 10)).is_empty());
        assert_eq!(sorted_ids(index.query_at(&Position::new(90, 90))), vec!["mover"]);
        assert_eq!(index.position_of("mover"), Some(Position::new(90, 90)));
    }

    #[test]
    fn test_update_out_of_bounds_keeps_object() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("stay", 10, 10)).unwrap();

        let err = index.update("stay", Position::new(101, 0)).unwrap_err();
        assert!(matches!(err, QuadspaceError::OutOfBounds { .. }));
        assert_eq!(index.position_of("stay"), Some(Position::new(10, 10)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_update_missing() {
        let index: SpatialIndex<TrackedObject> = SpatialIndex::new(100, 100, 10).unwrap();
        assert!(matches!(
            index.update("ghost", Position::new(1, 1)),
            Err(QuadspaceError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_accepted_by_default() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        index.insert(obj("twin", 1, 1)).unwrap();
        index.insert(obj("twin", 2, 2)).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected_when_configured() {
        let config = Config::default()
            .with_cell_size(10)
            .with_reject_duplicate_ids(true);
        let index = SpatialIndex::with_config(100, 100, config).unwrap();
        index.insert(obj("twin", 1, 1)).unwrap();

        let err = index.insert(obj("twin", 2, 2)).unwrap_err();
        assert!(matches!(err, QuadspaceError::DuplicateId(id) if id == "twin"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_clear() {
        let index = SpatialIndex::new(100, 100, 5).unwrap();
        for i in 0..50 {
            index.insert(obj(&format!("o{i}"), i * 2, i * 2)).unwrap();
        }
        assert!(index.stats().total_nodes > 1);

        index.clear();
        let stats = index.stats();
        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.leaf_nodes, 1);
        assert_eq!(stats.total_objects, 0);
        assert_eq!(stats.max_depth, 0);
        assert!(index.is_empty());
        assert_eq!(index.bounds(), &BoundingBox::from_extent(100, 100));
    }

    #[test]
    fn test_stats_average() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        for i in 0..9 {
            index.insert(obj(&format!("o{i}"), i * 10, i * 10)).unwrap();
        }
        let stats = index.stats();
        assert_eq!(stats.leaf_nodes, 4);
        assert_eq!(stats.total_objects, 9);
        assert_eq!(stats.avg_objects_per_leaf, 9.0 / 4.0);
    }

    #[test]
    fn test_trait_object_index() {
        let index: SpatialIndex<dyn Tracked + Send + Sync> =
            SpatialIndex::new(100, 100, 10).unwrap();
        let tree: Arc<dyn Tracked + Send + Sync> =
            Arc::new(TrackedObject::new("oak", Position::new(3, 3)));
        index.insert(tree).unwrap();

        let hits = index.query_within_radius(&Position::new(0, 0), 5.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "oak");
    }

    #[test]
    fn test_handle_clones_share_tree() {
        let index = SpatialIndex::new(100, 100, 10).unwrap();
        let other = index.clone();
        index.insert(obj("shared", 7, 7)).unwrap();
        assert!(other.contains("shared"));
        assert_eq!(other.get("shared").unwrap().id, "shared");
    }
}
