use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::dimensions::{AsXY, Dimension2D, Position2D};

/// An axis-aligned rectangle in the plane.
///
/// `position` is the corner with the smallest coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Object2D {
    pub dimensions: Dimension2D,
    pub position: Position2D,
}

impl Object2D {
    pub const fn new(dimensions: Dimension2D, position: Position2D) -> Self {
        Self {
            dimensions,
            position,
        }
    }

    /// Rectangle of `length x width` with its origin corner at `(x, y)`.
    pub const fn from_parts(length: f64, width: f64, x: f64, y: f64) -> Self {
        Self::new(Dimension2D::new(length, width), Position2D::new(x, y))
    }

    /// The four corners: origin, `+length`, opposite, `+width`.
    pub fn corners(&self) -> [Position2D; 4] {
        let p = self.position;
        let d = self.dimensions;
        [
            p,
            p + (d.length, 0.0),
            p + d,
            p + (0.0, d.width),
        ]
    }

    /// Closed-interval containment.
    pub fn contains(&self, point: Position2D) -> bool {
        let end = self.end();
        point.x >= self.position.x
            && point.x <= end.x
            && point.y >= self.position.y
            && point.y <= end.y
    }

    /// True when one of this rectangle's corners lies inside `other`.
    ///
    /// The test is one-directional: a large rectangle fully enclosing a small
    /// one does not overlap it, while the small one overlaps the large one.
    pub fn overlaps(&self, other: &Object2D) -> bool {
        self.corners().iter().any(|c| other.contains(*c))
    }

    /// Corner opposite to `position`.
    pub fn end(&self) -> Position2D {
        self.position + self.dimensions
    }

    pub fn center(&self) -> Position2D {
        self.position + self.dimensions / 2.0
    }
}

impl fmt::Display for Object2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.dimensions, self.position)
    }
}

impl<T: AsXY> Add<T> for Object2D {
    type Output = Object2D;

    fn add(self, rhs: T) -> Self::Output {
        Object2D::new(self.dimensions, self.position + rhs)
    }
}

impl<T: AsXY> Sub<T> for Object2D {
    type Output = Object2D;

    fn sub(self, rhs: T) -> Self::Output {
        Object2D::new(self.dimensions, self.position - rhs)
    }
}
