use serde::{Deserialize, Serialize};

/// Aggregate shape of a spatial index tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Every node in the tree, internal and leaf
    pub total_nodes: usize,
    pub leaf_nodes: usize,
    /// Deepest level reached; the root is depth 0
    pub max_depth: usize,
    /// Objects summed across all leaves
    pub total_objects: usize,
    pub avg_objects_per_leaf: f64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one visited node at `depth` holding `objects` entries.
    pub fn record_node(&mut self, depth: usize, is_leaf: bool, objects: usize) {
        self.total_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        if is_leaf {
            self.leaf_nodes += 1;
            self.total_objects += objects;
        }
    }

    /// Derive the per-leaf average once every node has been recorded.
    pub fn finish(&mut self) {
        self.avg_objects_per_leaf = if self.leaf_nodes == 0 {
            0.0
        } else {
            self.total_objects as f64 / self.leaf_nodes as f64
        };
    }

    pub fn internal_nodes(&self) -> usize {
        self.total_nodes - self.leaf_nodes
    }
}
