//! Similarity transforms of the plane.

use crate::geometry::Line;
use crate::math::{rotate_vector, Point2, Vector2};

/// A rigid motion, reflection, or uniform scaling of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform2D {
    /// Moves every point by a vector.
    Translate(Vector2),
    /// Rotates counter-clockwise by `angle` radians about `center`.
    Rotate { center: Point2, angle: f64 },
    /// Reflects across the carrier line of the axis. A zero-length axis
    /// reflects through its start point.
    Mirror(Line),
    /// Scales uniformly about `center`; a negative factor also turns by π.
    Scale { center: Point2, factor: f64 },
}

impl Transform2D {
    /// Maps a single point.
    #[must_use]
    pub fn apply(&self, p: &Point2) -> Point2 {
        match self {
            Self::Translate(v) => p + v,
            Self::Rotate { center, angle } => center + rotate_vector(&(p - center), *angle),
            Self::Mirror(axis) => {
                let foot = axis.foot(p);
                foot + (foot - p)
            }
            Self::Scale { center, factor } => center + (p - center) * *factor,
        }
    }

    /// Returns `true` if the transform reverses orientation.
    #[must_use]
    pub fn is_reflection(&self) -> bool {
        matches!(self, Self::Mirror(axis) if axis.length() > 0.0)
    }
}
