//! Query algorithms over a locked node tree.
//!
//! Every function here takes the root by shared reference, so callers run
//! them under a single read-lock acquisition.

use std::fmt;
use std::sync::Arc;

use super::node::{Entry, Node};
use crate::config::{BoundingBox, Position};

/// A k-nearest result: the object, where it is indexed, and how far it is
/// from the query center.
pub struct Neighbor<T: ?Sized> {
    pub object: Arc<T>,
    pub position: Position,
    pub distance: f64,
}

impl<T: ?Sized> Neighbor<T> {
    fn from_entry(entry: &Entry<T>, center: &Position) -> Self {
        Self {
            object: Arc::clone(&entry.object),
            position: entry.position,
            distance: center.distance(&entry.position),
        }
    }
}

impl<T: ?Sized> Clone for Neighbor<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
            position: self.position,
            distance: self.distance,
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Neighbor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbor")
            .field("object", &self.object)
            .field("position", &self.position)
            .field("distance", &self.distance)
            .finish()
    }
}

/// Objects whose indexed position lies inside `rect`.
pub(crate) fn within_bbox<T: ?Sized>(root: &Node<T>, rect: &BoundingBox) -> Vec<Arc<T>> {
    let mut results = Vec::new();
    root.visit_within(rect, &mut |entry| results.push(Arc::clone(&entry.object)));
    results
}

/// Objects within Euclidean `radius` of `center`, with their distances.
///
/// Candidates come from a range query over the square enclosing the circle;
/// only those candidates pay for an exact distance.
pub(crate) fn within_radius<T: ?Sized>(
    root: &Node<T>,
    center: &Position,
    radius: f64,
) -> Vec<Neighbor<T>> {
    if !radius.is_finite() || radius < 0.0 {
        log::warn!("Rejecting radius query with invalid radius {}", radius);
        return Vec::new();
    }

    let enclosing = BoundingBox::around(*center, radius.ceil() as i64);
    let mut results = Vec::new();
    root.visit_within(&enclosing, &mut |entry| {
        let neighbor = Neighbor::from_entry(entry, center);
        if neighbor.distance <= radius {
            results.push(neighbor);
        }
    });
    results
}

/// The `k` objects closest to `center`, nearest first.
///
/// Searches an expanding circle starting at `initial_radius` and doubling
/// until it holds at least `k` objects. Once the radius passes the largest
/// dimension of `world` the whole tree is scanned instead.
pub(crate) fn nearest<T: ?Sized>(
    root: &Node<T>,
    center: &Position,
    k: usize,
    initial_radius: f64,
    world: &BoundingBox,
) -> Vec<Neighbor<T>> {
    if k == 0 {
        return Vec::new();
    }

    let limit = world.max_extent() as f64;
    let mut radius = initial_radius;
    while radius <= limit {
        let candidates = within_radius(root, center, radius);
        if candidates.len() >= k {
            return closest(candidates, k);
        }
        radius *= 2.0;
    }

    let mut everything = Vec::new();
    root.visit_all(&mut |entry| everything.push(Neighbor::from_entry(entry, center)));
    closest(everything, k)
}

fn closest<T: ?Sized>(mut candidates: Vec<Neighbor<T>>, k: usize) -> Vec<Neighbor<T>> {
    candidates.sort_unstable_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(k);
    candidates
}
