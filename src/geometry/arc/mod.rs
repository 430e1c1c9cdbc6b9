//! Circular arcs and full circles.
//!
//! An [`Arc`] always runs counter-clockwise from `start` to `end`. After
//! [`Arc::normalize`] the span satisfies `0 ≤ start < 2π` and
//! `start < end ≤ start + 2π`, so `end` may exceed `2π` when the arc wraps
//! across the 0° direction. A full circle has `end − start = 2π`.
//!
//! Traversal direction is not part of the arc: curves that need it derive a
//! [`Winding`] from their defining points.

mod fillet;
mod intersect;
mod tangent;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub use fillet::Fillet;

use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::polygon_2d::left_normal;
use crate::math::{
    angle_of, normalize_angle, unit_at, AxisOrientation, Point2, Tolerance, Vector2, Winding,
};
use crate::operations::transform::Transform2D;

use super::Bounds2;

/// A circular arc or full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    center: Point2,
    radius: f64,
    start: f64,
    end: f64,
}

impl Arc {
    /// Creates an arc from a center, radius, and start/end angles in radians.
    ///
    /// The span is normalized with the default tolerance; a negative radius is
    /// stored as its magnitude.
    #[must_use]
    pub fn new(center: Point2, radius: f64, start: f64, end: f64) -> Self {
        Self::with_tolerance(center, radius, start, end, Tolerance::default())
    }

    /// Like [`Arc::new`], normalizing with an explicit tolerance.
    #[must_use]
    pub fn with_tolerance(
        center: Point2,
        radius: f64,
        start: f64,
        end: f64,
        tol: Tolerance,
    ) -> Self {
        let mut arc = Self {
            center,
            radius: radius.abs(),
            start,
            end,
        };
        arc.normalize(tol);
        arc
    }

    /// Creates a full circle spanning `[0, 2π)`.
    #[must_use]
    pub fn circle(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
            start: 0.0,
            end: TAU,
        }
    }

    /// Creates the arc through three points.
    ///
    /// The center is the intersection of the perpendicular bisectors of
    /// `p1 p2` and `p2 p3`. The span runs from `p1` to `p3` when the points are
    /// counter-clockwise and from `p3` to `p1` otherwise, so it always contains
    /// `p2`. Returns `None` if the points are collinear or two coincide.
    #[must_use]
    pub fn through(p1: &Point2, p2: &Point2, p3: &Point2, tol: Tolerance) -> Option<Self> {
        let winding = Winding::of(p1, p2, p3, tol)?;

        let m12 = nalgebra::center(p1, p2);
        let m23 = nalgebra::center(p2, p3);
        let d12 = left_normal(p2 - p1);
        let d23 = left_normal(p3 - p2);
        let (t, _) = line_line_intersect_2d(&m12, &d12, &m23, &d23, tol)?;
        let center = m12 + d12 * t;
        let radius = (p1 - center).norm();

        let (start, end) = match winding {
            Winding::CounterClockwise => (angle_of(&center, p1), angle_of(&center, p3)),
            Winding::Clockwise => (angle_of(&center, p3), angle_of(&center, p1)),
        };
        Some(Self::with_tolerance(center, radius, start, end, tol))
    }

    /// Creates an arc from its center, a start point, and a signed sweep.
    ///
    /// A negative sweep runs clockwise from `start_point`; it is stored as the
    /// equivalent counter-clockwise span ending at `start_point`.
    #[must_use]
    pub fn from_sweep(center: Point2, start_point: &Point2, sweep: f64) -> Self {
        let radius = (start_point - center).norm();
        let a = angle_of(&center, start_point);
        if sweep >= 0.0 {
            Self::new(center, radius, a, a + sweep)
        } else {
            Self::new(center, radius, a + sweep, a)
        }
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end
    }

    /// Canonicalizes the span.
    ///
    /// `start` is wrapped into `[0, 2π)` and `end` is moved onto the branch
    /// `(start, start + 2π]`. A span shorter than epsilon is read as a full turn
    /// rather than collapsing the arc, and spans within epsilon of `2π` become
    /// exact circles. Idempotent.
    pub fn normalize(&mut self, tol: Tolerance) {
        let eps = tol.epsilon();
        let span = self.end - self.start;
        self.start = normalize_angle(self.start);
        let sweep = if span >= TAU - eps {
            TAU
        } else {
            let s = span.rem_euclid(TAU);
            if s <= eps || s >= TAU - eps {
                TAU
            } else {
                s
            }
        };
        self.end = self.start + sweep;
    }

    /// Angular extent `end − start`, always positive.
    #[must_use]
    pub fn open_angle(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` for a full circle.
    #[must_use]
    pub fn is_circle(&self, tol: Tolerance) -> bool {
        self.open_angle() >= TAU - tol.epsilon()
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.open_angle()
    }

    /// Maps an angle onto the branch of `start`: the result lies in
    /// `[start − ε, start + 2π)` so it can be compared directly with `end`.
    #[must_use]
    pub fn branch_angle(&self, angle: f64, tol: Tolerance) -> f64 {
        let a = normalize_angle(angle);
        if a < self.start - tol.epsilon() {
            a + TAU
        } else {
            a
        }
    }

    /// Angle of `p` about the center, on the branch of `start`.
    ///
    /// Every comparison of a point's angle against `[start, end]` goes through
    /// this shift; without it arcs crossing 0° would reject their own points.
    #[must_use]
    pub fn angle_of(&self, p: &Point2, tol: Tolerance) -> f64 {
        self.branch_angle(angle_of(&self.center, p), tol)
    }

    /// Returns `true` if `angle` falls inside the span.
    #[must_use]
    pub fn contains_angle(&self, angle: f64, tol: Tolerance) -> bool {
        if self.is_circle(tol) {
            return true;
        }
        let eps = tol.epsilon();
        let a = self.branch_angle(angle, tol);
        (a >= self.start - eps && a <= self.end + eps) || a - TAU >= self.start - eps
    }

    /// Returns `true` if `p` lies on the arc: on the circle within epsilon and
    /// inside the span.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: Tolerance) -> bool {
        let d = (p - self.center).norm();
        if (d - self.radius).abs() >= tol.epsilon() {
            return false;
        }
        if d < tol.epsilon() {
            // Zero-radius arc: the center is its only point.
            return true;
        }
        self.contains_angle(angle_of(&self.center, p), tol)
    }

    /// Point on the circle at `angle`.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point2 {
        self.center + unit_at(angle) * self.radius
    }

    /// Point on the circle at `angle` in a coordinate system whose y axis may
    /// point down.
    #[must_use]
    pub fn point_at_oriented(&self, angle: f64, orientation: AxisOrientation) -> Point2 {
        match orientation {
            AxisOrientation::YUp => self.point_at(angle),
            AxisOrientation::YDown => Point2::new(
                self.center.x + self.radius * angle.cos(),
                self.center.y - self.radius * angle.sin(),
            ),
        }
    }

    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.point_at(self.start)
    }

    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.point_at(self.end)
    }

    /// Point halfway along the span.
    #[must_use]
    pub fn mid_point(&self) -> Point2 {
        self.point_at(0.5 * (self.start + self.end))
    }

    /// Unit tangent at `angle` in the counter-clockwise direction.
    #[must_use]
    pub fn tangent_at(&self, angle: f64) -> Vector2 {
        Vector2::new(-angle.sin(), angle.cos())
    }

    /// Sweep travelled on this circle from `from` to `to` in the direction of
    /// `winding`, in `[0, 2π)`. Both points are taken by their angle only.
    #[must_use]
    pub fn sweep_between(&self, from: &Point2, to: &Point2, winding: Winding) -> f64 {
        let a = angle_of(&self.center, from);
        let b = angle_of(&self.center, to);
        match winding {
            Winding::CounterClockwise => (b - a).rem_euclid(TAU),
            Winding::Clockwise => (a - b).rem_euclid(TAU),
        }
    }

    /// Point on this circle halfway between `from` and `to` when travelling in
    /// the direction of `winding`.
    #[must_use]
    pub fn mid_between(&self, from: &Point2, to: &Point2, winding: Winding) -> Point2 {
        let a = angle_of(&self.center, from);
        let half = 0.5 * self.sweep_between(from, to, winding);
        self.point_at(a + winding.sign() * half)
    }

    /// The arc covering the rest of the circle.
    #[must_use]
    pub fn complement(&self, tol: Tolerance) -> Self {
        Self::with_tolerance(self.center, self.radius, self.end, self.start + TAU, tol)
    }

    /// Axis-aligned bounds including the circle's extreme points inside the span.
    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        let mut bounds = Bounds2::from_corners(self.start_point(), self.end_point());
        for k in 0..8_u8 {
            let a = f64::from(k) * FRAC_PI_2;
            if a > self.start && a < self.end {
                bounds.include(&self.point_at(a));
            }
        }
        bounds
    }

    /// Applies a similarity transform.
    ///
    /// Mirroring reverses the sense of rotation, so the mirrored span runs from
    /// the image of `end` to the image of `start`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform2D, tol: Tolerance) -> Self {
        let center = transform.apply(&self.center);
        let (radius, start, end) = match transform {
            Transform2D::Translate(_) => (self.radius, self.start, self.end),
            Transform2D::Rotate { angle, .. } => {
                (self.radius, self.start + angle, self.end + angle)
            }
            Transform2D::Scale { factor, .. } => {
                let turn = if *factor < 0.0 { PI } else { 0.0 };
                (self.radius * factor.abs(), self.start + turn, self.end + turn)
            }
            Transform2D::Mirror(axis) => match axis.direction(tol) {
                Some(dir) => {
                    let phi = dir.y.atan2(dir.x);
                    (self.radius, 2.0 * phi - self.end, 2.0 * phi - self.start)
                }
                // Degenerate axis: reflection through a point.
                None => (self.radius, self.start + PI, self.end + PI),
            },
        };
        let mut arc = Self {
            center,
            radius,
            start,
            end,
        };
        if !self.is_circle(tol) {
            arc.normalize(tol);
        } else {
            arc.start = normalize_angle(arc.start);
            arc.end = arc.start + TAU;
        }
        arc
    }

    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self {
            center: self.center + offset,
            ..*self
        }
    }
}
