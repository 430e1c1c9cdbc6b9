use crate::math::intersect_2d::{line_line_intersect_2d, segment_segment_intersect_2d};
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Tolerance, Vector2};

use super::Bounds2;

/// A straight segment between two points.
///
/// The segment also stands for its infinite carrier line in the queries that
/// say so (`foot`, `signed_distance`, `intersect_line`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Point2,
    end: Point2,
}

impl Line {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from a point, a direction angle, and a length.
    #[must_use]
    pub fn from_angle(start: Point2, angle: f64, length: f64) -> Self {
        Self {
            start,
            end: start + crate::math::unit_at(angle) * length,
        }
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Returns the vector from start to end.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Returns the unit direction, or `None` for a zero-length segment.
    #[must_use]
    pub fn direction(&self, tol: Tolerance) -> Option<Vector2> {
        self.vector().try_normalize(tol.epsilon())
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Evaluates `start + t * (end - start)`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.vector() * t
    }

    /// Parameter of the orthogonal projection of `p` onto the carrier line.
    ///
    /// Returns `0.0` for a degenerate segment.
    #[must_use]
    pub fn parameter_of(&self, p: &Point2) -> f64 {
        let v = self.vector();
        let len_sq = v.norm_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        (p - self.start).dot(&v) / len_sq
    }

    /// Foot of the perpendicular from `p` onto the carrier line.
    #[must_use]
    pub fn foot(&self, p: &Point2) -> Point2 {
        self.point_at(self.parameter_of(p))
    }

    /// Closest point of the bounded segment to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Point2) -> Point2 {
        self.point_at(self.parameter_of(p).clamp(0.0, 1.0))
    }

    /// Signed distance from the carrier line; positive on the left side.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        let v = self.vector();
        let len = v.norm();
        if len == 0.0 {
            return (p - self.start).norm();
        }
        v.perp(&(p - self.start)) / len
    }

    /// Returns `true` if `p` lies on the bounded segment within tolerance.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: Tolerance) -> bool {
        let len = self.length();
        if len < tol.epsilon() {
            return tol.points_eq(p, &self.start);
        }
        if self.signed_distance(p).abs() >= tol.epsilon() {
            return false;
        }
        let t = self.parameter_of(p);
        let slack = tol.epsilon() / len;
        t >= -slack && t <= 1.0 + slack
    }

    /// Shifts the segment perpendicular to itself; positive moves it left.
    ///
    /// A zero-length segment is returned unchanged.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        let v = self.vector();
        let len = v.norm();
        if len == 0.0 {
            return *self;
        }
        let shift = left_normal(v / len) * distance;
        Self::new(self.start + shift, self.end + shift)
    }

    /// Keeps `start` and direction, setting the length to `length`.
    ///
    /// A zero-length segment is returned unchanged.
    #[must_use]
    pub fn with_length(&self, length: f64) -> Self {
        let v = self.vector();
        let len = v.norm();
        if len == 0.0 {
            return *self;
        }
        Self::new(self.start, self.start + v * (length / len))
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Intersection of the two carrier lines; `None` if parallel.
    #[must_use]
    pub fn intersect_line(&self, other: &Self, tol: Tolerance) -> Option<Point2> {
        let (t, _) = line_line_intersect_2d(
            &self.start,
            &self.vector(),
            &other.start,
            &other.vector(),
            tol,
        )?;
        Some(self.point_at(t))
    }

    /// Intersection of the two bounded segments.
    #[must_use]
    pub fn intersect_segment(&self, other: &Self, tol: Tolerance) -> Option<Point2> {
        segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end, tol)
            .map(|(p, _, _)| p)
    }

    /// Returns `true` if the carrier lines are parallel within tolerance.
    #[must_use]
    pub fn is_parallel(&self, other: &Self, tol: Tolerance) -> bool {
        match (self.direction(tol), other.direction(tol)) {
            (Some(a), Some(b)) => a.perp(&b).abs() < tol.epsilon(),
            _ => true,
        }
    }

    /// Returns the axis-aligned bounds of the segment.
    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_corners(self.start, self.end)
    }
}
