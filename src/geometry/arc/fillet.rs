//! Tangent fillet arcs between lines, arcs, and chains.

use std::f64::consts::PI;

use crate::geometry::curve::{SegmentChain, SegmentShape};
use crate::geometry::Line;
use crate::math::{angle_of, Point2, Tolerance};

use super::Arc;

/// A fillet arc together with its tangency points.
///
/// `first_tangent` lies on the first element passed to the constructor and
/// `second_tangent` on the second. The arc is the short way round, so its
/// sweep never exceeds π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fillet {
    pub arc: Arc,
    pub first_tangent: Point2,
    pub second_tangent: Point2,
}

/// One side of a fillet: an infinite line or a full circle.
#[derive(Debug, Clone, Copy)]
enum Side {
    Line(Line),
    Circle(Arc),
}

impl Side {
    fn from_shape(shape: SegmentShape) -> Self {
        match shape {
            SegmentShape::Line(line) => Self::Line(line),
            SegmentShape::Arc(arc, _) => Self::Circle(arc),
        }
    }

    /// Moves the element by `radius` toward the side of `pick`.
    fn offset_toward(&self, pick: &Point2, radius: f64, tol: Tolerance) -> Option<Self> {
        match self {
            Self::Line(line) => {
                let side = line.signed_distance(pick);
                if side.abs() < tol.epsilon() {
                    tracing::debug!("fillet pick lies on the line; side is ambiguous");
                    return None;
                }
                Some(Self::Line(line.offset(radius.copysign(side))))
            }
            Self::Circle(arc) => {
                let outside = (pick - arc.center()).norm() > arc.radius();
                let r = if outside {
                    arc.radius() + radius
                } else {
                    arc.radius() - radius
                };
                if r <= tol.epsilon() {
                    tracing::debug!(
                        radius = arc.radius(),
                        fillet = radius,
                        "fillet shrinks circle to nothing"
                    );
                    return None;
                }
                Some(Self::Circle(Arc::circle(arc.center(), r)))
            }
        }
    }

    fn intersect(&self, other: &Self, tol: Tolerance) -> Vec<Point2> {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => a.intersect_line(b, tol).into_iter().collect(),
            (Self::Line(l), Self::Circle(c)) | (Self::Circle(c), Self::Line(l)) => {
                c.intersect_line(l, tol)
            }
            (Self::Circle(a), Self::Circle(b)) => a.intersect_circle(b, tol),
        }
    }

    /// Point where a circle centered at `center` touches this element.
    fn tangent_point(&self, center: &Point2, tol: Tolerance) -> Option<Point2> {
        match self {
            Self::Line(line) => Some(line.foot(center)),
            Self::Circle(arc) => arc.project_point(center, tol),
        }
    }
}

fn fillet_between(
    first: Side,
    first_pick: &Point2,
    second: Side,
    second_pick: &Point2,
    radius: f64,
    tol: Tolerance,
) -> Option<Fillet> {
    if radius <= tol.epsilon() {
        return None;
    }
    let a = first.offset_toward(first_pick, radius, tol)?;
    let b = second.offset_toward(second_pick, radius, tol)?;

    let score = |c: &Point2| (c - first_pick).norm() + (c - second_pick).norm();
    let Some(center) = a
        .intersect(&b, tol)
        .into_iter()
        .min_by(|p, q| score(p).total_cmp(&score(q)))
    else {
        tracing::debug!(radius, "no fillet center candidate");
        return None;
    };

    let first_tangent = first.tangent_point(&center, tol)?;
    let second_tangent = second.tangent_point(&center, tol)?;
    let a1 = angle_of(&center, &first_tangent);
    let a2 = angle_of(&center, &second_tangent);
    let mut arc = Arc::with_tolerance(center, radius, a1, a2, tol);
    if arc.open_angle() > PI {
        arc = Arc::with_tolerance(center, radius, a2, a1, tol);
    }
    Some(Fillet {
        arc,
        first_tangent,
        second_tangent,
    })
}

fn nearest_side<C: SegmentChain + ?Sized>(
    chain: &C,
    pick: &Point2,
    tol: Tolerance,
) -> Option<Side> {
    let (_, segment) = chain.nearest_segment(pick, tol)?;
    Some(Side::from_shape(segment.shape(tol)))
}

impl Arc {
    /// Fillet of radius `radius` between two lines.
    ///
    /// Each pick point selects the side of its line on which the fillet
    /// sits. Returns `None` for parallel lines or a pick exactly on its line.
    #[must_use]
    pub fn fillet_line_line(
        first: &Line,
        first_pick: &Point2,
        second: &Line,
        second_pick: &Point2,
        radius: f64,
        tol: Tolerance,
    ) -> Option<Fillet> {
        fillet_between(
            Side::Line(*first),
            first_pick,
            Side::Line(*second),
            second_pick,
            radius,
            tol,
        )
    }

    /// Fillet between a line and the circle of an arc.
    ///
    /// The fillet touches the circle from outside when `arc_pick` is outside
    /// it, from inside otherwise.
    #[must_use]
    pub fn fillet_line_arc(
        line: &Line,
        line_pick: &Point2,
        arc: &Self,
        arc_pick: &Point2,
        radius: f64,
        tol: Tolerance,
    ) -> Option<Fillet> {
        fillet_between(Side::Line(*line), line_pick, Side::Circle(*arc), arc_pick, radius, tol)
    }

    #[must_use]
    pub fn fillet_arc_arc(
        first: &Self,
        first_pick: &Point2,
        second: &Self,
        second_pick: &Point2,
        radius: f64,
        tol: Tolerance,
    ) -> Option<Fillet> {
        fillet_between(
            Side::Circle(*first),
            first_pick,
            Side::Circle(*second),
            second_pick,
            radius,
            tol,
        )
    }

    /// Fillet between a line and the segment of `chain` nearest `chain_pick`.
    #[must_use]
    pub fn fillet_line_chain<C: SegmentChain + ?Sized>(
        line: &Line,
        line_pick: &Point2,
        chain: &C,
        chain_pick: &Point2,
        radius: f64,
        tol: Tolerance,
    ) -> Option<Fillet> {
        let second = nearest_side(chain, chain_pick, tol)?;
        fillet_between(Side::Line(*line), line_pick, second, chain_pick, radius, tol)
    }

    /// Fillet between the segments of two chains nearest their pick points.
    #[must_use]
    pub fn fillet_chain_chain<A, B>(
        first: &A,
        first_pick: &Point2,
        second: &B,
        second_pick: &Point2,
        radius: f64,
        tol: Tolerance,
    ) -> Option<Fillet>
    where
        A: SegmentChain + ?Sized,
        B: SegmentChain + ?Sized,
    {
        let a = nearest_side(first, first_pick, tol)?;
        let b = nearest_side(second, second_pick, tol)?;
        fillet_between(a, first_pick, b, second_pick, radius, tol)
    }
}
