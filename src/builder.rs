//! Index builder for flexible configuration
//!
//! This module provides a builder pattern for creating spatial indexes with
//! custom subdivision and identity settings.

use crate::config::Config;
use crate::error::Result;
use crate::index::SpatialIndex;
use crate::object::Tracked;

/// Builder for a [`SpatialIndex`] over `[0, width] x [0, height]`.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    width: i32,
    height: i32,
    config: Config,
}

impl IndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            config: Config::default(),
        }
    }

    /// Replace the whole configuration (for example one loaded from a file).
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum cell size. Validated in [`build`](Self::build).
    pub fn cell_size(mut self, cell_size: u32) -> Self {
        self.config.cell_size = cell_size;
        self
    }

    /// Set how many objects a leaf holds before it tries to split.
    pub fn split_threshold(mut self, threshold: usize) -> Self {
        self.config.split_threshold = threshold;
        self
    }

    /// Reject inserts whose identity is already indexed.
    pub fn reject_duplicate_ids(mut self, reject: bool) -> Self {
        self.config.reject_duplicate_ids = reject;
        self
    }

    /// Build the index. Fails with `InvalidConfig` for a negative extent or
    /// a configuration that does not validate.
    pub fn build<T: Tracked + ?Sized>(self) -> Result<SpatialIndex<T>> {
        SpatialIndex::with_config(self.width, self.height, self.config)
    }
}
