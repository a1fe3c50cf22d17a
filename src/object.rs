//! The capability the index needs from the objects it tracks.

use quadspace_types::point::Position;
use serde::{Deserialize, Serialize};

/// Something with a stable identity and a readable position.
///
/// The index holds objects behind `Arc` and never mutates them. The identity
/// must not change while the object is indexed. The position is read once on
/// insert; after that the owner reports moves through
/// [`SpatialIndex::update`](crate::SpatialIndex::update).
pub trait Tracked {
    fn id(&self) -> &str;

    fn position(&self) -> Position;
}

/// A plain identity/position pair for callers without their own entity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedObject {
    pub id: String,
    pub position: Position,
}

impl TrackedObject {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

impl Tracked for TrackedObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}
