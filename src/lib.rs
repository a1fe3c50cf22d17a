//! Concurrent quadtree spatial index for point-located objects in a bounded 2D world.
//!
//! ## Features
//! - **Adaptive subdivision**: leaves split into quadrants once they overflow,
//!   down to a configurable minimum cell size
//! - **Queries**: exact position, rectangle, radius and k-nearest
//! - **Concurrency**: one reader/writer lock per index; queries run in
//!   parallel, writes are exclusive and never observed half-applied
//! - **Configuration**: JSON (and optionally TOML) config files
//!
//! ```rust
//! use quadspace::{Position, SpatialIndex, TrackedObject};
//! use std::sync::Arc;
//!
//! let index = SpatialIndex::new(100, 100, 10)?;
//! index.insert(Arc::new(TrackedObject::new("orc", Position::new(50, 50))))?;
//! index.insert(Arc::new(TrackedObject::new("elf", Position::new(53, 54))))?;
//!
//! let nearby = index.query_within_radius(&Position::new(50, 50), 5.0);
//! assert_eq!(nearby.len(), 2);
//!
//! index.update("elf", Position::new(90, 90))?;
//! let nearest = index.knn(&Position::new(50, 50), 1);
//! assert_eq!(nearest[0].object.id, "orc");
//! # Ok::<(), quadspace::QuadspaceError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod index;
pub mod object;

pub use builder::IndexBuilder;
pub use config::{BoundingBox, Config, IndexStats, Position};
pub use error::{QuadspaceError, Result};
pub use index::{Neighbor, SpatialIndex};
pub use object::{Tracked, TrackedObject};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IndexBuilder, QuadspaceError, Result, SpatialIndex};

    pub use crate::{BoundingBox, IndexStats, Position};

    pub use crate::{Config, Neighbor, Tracked, TrackedObject};

    pub use std::sync::Arc;
}
