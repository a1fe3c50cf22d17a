use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer position in the 2D world.
///
/// Positions are what the index stores and compares. Distances between them
/// are Euclidean and computed in `i64`/`f64`, so the full `i32` range is safe.
///
/// # Examples
///
/// ```
/// use quadspace_types::point::Position;
///
/// let origin = Position::new(0, 0);
/// let p = Position::new(3, 4);
/// assert_eq!(origin.distance(&p), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[inline]
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
