//! Recursive quadtree nodes.
//!
//! A node is either a leaf holding entries directly or an internal node owning
//! exactly four children that tile its bounds. Children live in a boxed array
//! inside their parent, so the tree has a single owner at every level and a
//! split can never leave two parents pointing at the same child.

use smallvec::SmallVec;
use std::sync::Arc;

use crate::config::{BoundingBox, Config, IndexStats, Position};
use crate::error::{QuadspaceError, Result};
use crate::object::Tracked;

/// Entries a leaf stores inline before spilling to the heap.
const LEAF_INLINE: usize = 8;

/// An indexed object together with the position it was indexed at.
#[derive(Debug)]
pub(crate) struct Entry<T: ?Sized> {
    pub(crate) object: Arc<T>,
    pub(crate) position: Position,
}

impl<T: ?Sized> Entry<T> {
    pub(crate) fn new(object: Arc<T>, position: Position) -> Self {
        Self { object, position }
    }
}

impl<T: ?Sized> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
            position: self.position,
        }
    }
}

type Entries<T> = SmallVec<[Entry<T>; LEAF_INLINE]>;

#[derive(Debug)]
enum NodeKind<T: ?Sized> {
    Leaf(Entries<T>),
    Internal(Box<[Node<T>; 4]>),
}

#[derive(Debug)]
pub(crate) struct Node<T: ?Sized> {
    bounds: BoundingBox,
    depth: usize,
    kind: NodeKind<T>,
}

impl<T: ?Sized> Node<T> {
    pub(crate) fn leaf(bounds: BoundingBox, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            kind: NodeKind::Leaf(SmallVec::new()),
        }
    }

    pub(crate) fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Number of entries stored in this subtree.
    pub(crate) fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.len(),
            NodeKind::Internal(children) => children.iter().map(Node::len).sum(),
        }
    }

    /// Call `visit` for every entry whose position lies inside `rect`.
    ///
    /// Subtrees whose bounds miss `rect` are skipped without being entered.
    pub(crate) fn visit_within<F>(&self, rect: &BoundingBox, visit: &mut F)
    where
        F: FnMut(&Entry<T>),
    {
        if !self.bounds.intersects(rect) {
            return;
        }

        match &self.kind {
            NodeKind::Leaf(entries) => entries
                .iter()
                .filter(|entry| rect.contains(&entry.position))
                .for_each(|entry| visit(entry)),
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.visit_within(rect, visit);
                }
            }
        }
    }

    /// Call `visit` for every entry in the subtree.
    pub(crate) fn visit_all<F>(&self, visit: &mut F)
    where
        F: FnMut(&Entry<T>),
    {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.iter().for_each(|entry| visit(entry)),
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.visit_all(visit);
                }
            }
        }
    }

    pub(crate) fn collect_stats(&self, stats: &mut IndexStats) {
        match &self.kind {
            NodeKind::Leaf(entries) => stats.record_node(self.depth, true, entries.len()),
            NodeKind::Internal(children) => {
                stats.record_node(self.depth, false, 0);
                for child in children.iter() {
                    child.collect_stats(stats);
                }
            }
        }
    }

    /// Append to this node's own list; a no-op on internal nodes.
    fn push(&mut self, entry: Entry<T>) {
        if let NodeKind::Leaf(entries) = &mut self.kind {
            entries.push(entry);
        }
    }

    /// Turn this leaf into an internal node with four fresh leaf children and
    /// move every entry into the first child that contains it.
    fn split(&mut self) -> Result<()> {
        let child_depth = self.depth + 1;
        let mut children = Box::new(
            self.bounds
                .quadrants()
                .map(|quadrant| Node::leaf(quadrant, child_depth)),
        );

        let NodeKind::Leaf(entries) = &mut self.kind else {
            return Ok(());
        };

        // Refuse before moving anything so a failed split leaves the leaf intact.
        if let Some(stray) = entries
            .iter()
            .find(|entry| !children.iter().any(|c| c.bounds.contains(&entry.position)))
        {
            return Err(QuadspaceError::StructuralInconsistency {
                position: stray.position,
                bounds: self.bounds,
            });
        }

        let entries = std::mem::take(entries);
        let moved = entries.len();
        for entry in entries {
            if let Some(child) = children
                .iter_mut()
                .find(|child| child.bounds.contains(&entry.position))
            {
                child.push(entry);
            }
        }

        self.kind = NodeKind::Internal(children);
        log::debug!(
            "Split node {} at depth {}, redistributed {} objects",
            self.bounds,
            self.depth,
            moved
        );
        Ok(())
    }
}

impl<T: Tracked + ?Sized> Node<T> {
    /// Descend to the leaf covering `entry.position` and append it there,
    /// splitting the leaf when it overflows and is still large enough.
    ///
    /// The caller guarantees the position lies within this node's bounds.
    pub(crate) fn insert(&mut self, entry: Entry<T>, config: &Config) -> Result<()> {
        let bounds = self.bounds;
        match &mut self.kind {
            NodeKind::Internal(children) => {
                let position = entry.position;
                let child = children
                    .iter_mut()
                    .find(|child| child.bounds.contains(&position))
                    .ok_or(QuadspaceError::StructuralInconsistency { position, bounds })?;
                child.insert(entry, config)
            }
            NodeKind::Leaf(entries) => {
                entries.push(entry);
                let overflowing = entries.len() > config.split_threshold;
                if overflowing && bounds.can_split(config.cell_size) {
                    self.split()?;
                }
                Ok(())
            }
        }
    }

    /// Remove the first entry with identity `id`, swapping the leaf's last
    /// entry into its slot.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Entry<T>> {
        match &mut self.kind {
            NodeKind::Leaf(entries) => {
                let index = entries.iter().position(|entry| entry.object.id() == id)?;
                Some(entries.swap_remove(index))
            }
            NodeKind::Internal(children) => {
                children.iter_mut().find_map(|child| child.remove(id))
            }
        }
    }

    pub(crate) fn find(&self, id: &str) -> Option<&Entry<T>> {
        match &self.kind {
            NodeKind::Leaf(entries) => entries.iter().find(|entry| entry.object.id() == id),
            NodeKind::Internal(children) => children.iter().find_map(|child| child.find(id)),
        }
    }
}
