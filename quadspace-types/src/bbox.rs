use crate::point::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned rectangle with inclusive integer edges.
///
/// A position lies inside the box when `min_x <= x <= max_x` and
/// `min_y <= y <= max_y`. Width and height are `max - min`, so the box
/// `[0, 100] x [0, 100]` has a width of 100 and holds 101 columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadspace_types::bbox::BoundingBox;
    /// use quadspace_types::point::Position;
    ///
    /// let bbox = BoundingBox::new(0, 0, 10, 10);
    /// assert!(bbox.contains(&Position::new(10, 10)));
    /// assert!(!bbox.contains(&Position::new(11, 10)));
    /// ```
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The world box `[0, width] x [0, height]`.
    pub const fn from_extent(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// A zero-area box covering exactly one position.
    pub const fn point(position: Position) -> Self {
        Self::new(position.x, position.y, position.x, position.y)
    }

    /// The smallest box enclosing every position within `reach` of `center`
    /// on either axis. Edges are clamped to the `i32` range.
    pub fn around(center: Position, reach: i64) -> Self {
        let reach = reach.max(0);
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let (x, y) = (i64::from(center.x), i64::from(center.y));
        Self::new(
            clamp(x.saturating_sub(reach)),
            clamp(y.saturating_sub(reach)),
            clamp(x.saturating_add(reach)),
            clamp(y.saturating_add(reach)),
        )
    }

    pub fn width(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y)
    }

    /// The larger of width and height.
    pub fn max_extent(&self) -> i64 {
        self.width().max(self.height())
    }

    pub fn center(&self) -> Position {
        Position::new(self.mid_x() as i32, self.mid_y() as i32)
    }

    /// Check if a position is contained within this bounding box.
    #[inline]
    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    /// Check if this bounding box overlaps another. Touching edges count.
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Whether a box of this size may be quartered given the minimum cell size.
    ///
    /// Both dimensions must exceed twice the cell size.
    pub fn can_split(&self, cell_size: u32) -> bool {
        let limit = 2 * i64::from(cell_size);
        self.width() > limit && self.height() > limit
    }

    /// Quarter the box at its midpoint.
    ///
    /// Returned in the order south-west, south-east, north-west, north-east.
    /// The low halves keep the midpoint column/row and the high halves start
    /// one past it, so the four boxes tile `self` with no gaps or overlaps.
    /// Only meaningful when both width and height are at least 1.
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        let mid_x = self.mid_x() as i32;
        let mid_y = self.mid_y() as i32;
        [
            Self::new(self.min_x, self.min_y, mid_x, mid_y),
            Self::new(mid_x + 1, self.min_y, self.max_x, mid_y),
            Self::new(self.min_x, mid_y + 1, mid_x, self.max_y),
            Self::new(mid_x + 1, mid_y + 1, self.max_x, self.max_y),
        ]
    }

    fn mid_x(&self) -> i64 {
        i64::from(self.min_x) + self.width() / 2
    }

    fn mid_y(&self) -> i64 {
        i64::from(self.min_y) + self.height() / 2
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
