//! # quadspace-types
//!
//! Core value types for the quadspace spatial index.
//!
//! - **Point types**: `Position`
//! - **Bounding box types**: `BoundingBox`
//! - **Statistics**: `IndexStats`
//!
//! All types are plain `Copy`/`Clone` values and serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use quadspace_types::bbox::BoundingBox;
//! use quadspace_types::point::Position;
//!
//! let world = BoundingBox::from_extent(100, 100);
//! let spawn = Position::new(50, 50);
//! assert!(world.contains(&spawn));
//! assert_eq!(world.quadrants().len(), 4);
//! ```

pub mod bbox;
pub mod point;
pub mod stats;
