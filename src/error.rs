//! Error types for the spatial index.

use quadspace_types::bbox::BoundingBox;
use quadspace_types::point::Position;
use thiserror::Error;

/// Errors returned by index construction, mutation and configuration loading.
#[derive(Debug, Error)]
pub enum QuadspaceError {
    #[error("position {position} is outside index bounds {bounds}")]
    OutOfBounds {
        position: Position,
        bounds: BoundingBox,
    },

    #[error("object not found: {0}")]
    NotFound(String),

    /// No child of an internal node claimed a position its parent contains.
    #[error("no child of node {bounds} contains position {position}")]
    StructuralInconsistency {
        position: Position,
        bounds: BoundingBox,
    },

    #[error("object already indexed: {0}")]
    DuplicateId(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for QuadspaceError {
    fn from(err: serde_json::Error) -> Self {
        QuadspaceError::Serialization(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for QuadspaceError {
    fn from(err: toml::de::Error) -> Self {
        QuadspaceError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuadspaceError>;
