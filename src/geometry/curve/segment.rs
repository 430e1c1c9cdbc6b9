use crate::geometry::{Arc, Bounds2, Line};
use crate::math::{Point2, Tolerance, Winding};

use super::Step;

/// One segment of a chain, with explicit endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { from: Point2, to: Point2 },
    Arc { from: Point2, through: Point2, to: Point2 },
}

/// Exact geometry of a segment.
///
/// The arc variant carries the direction in which the segment travels its
/// (always counter-clockwise) span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentShape {
    Line(Line),
    Arc(Arc, Winding),
}

impl Segment {
    #[must_use]
    pub fn from(&self) -> Point2 {
        match self {
            Self::Line { from, .. } | Self::Arc { from, .. } => *from,
        }
    }

    #[must_use]
    pub fn to(&self) -> Point2 {
        match self {
            Self::Line { to, .. } | Self::Arc { to, .. } => *to,
        }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc { .. })
    }

    /// The step that reproduces this segment after `from`.
    #[must_use]
    pub fn step(&self) -> Step {
        match *self {
            Self::Line { to, .. } => Step::Line { to },
            Self::Arc { through, to, .. } => Step::Arc { through, to },
        }
    }

    /// Reconstructs the exact geometry.
    ///
    /// An arc whose three points are collinear (or coincide) degrades to the
    /// line between its ends.
    #[must_use]
    pub fn shape(&self, tol: Tolerance) -> SegmentShape {
        match *self {
            Self::Line { from, to } => SegmentShape::Line(Line::new(from, to)),
            Self::Arc { from, through, to } => {
                match (
                    Arc::through(&from, &through, &to, tol),
                    Winding::of(&from, &through, &to, tol),
                ) {
                    (Some(arc), Some(winding)) => SegmentShape::Arc(arc, winding),
                    _ => SegmentShape::Line(Line::new(from, to)),
                }
            }
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { from, to } => Self::Line { from: to, to: from },
            Self::Arc { from, through, to } => Self::Arc {
                from: to,
                through,
                to: from,
            },
        }
    }

    #[must_use]
    pub fn length(&self, tol: Tolerance) -> f64 {
        self.shape(tol).length()
    }

    /// Point halfway along the segment.
    #[must_use]
    pub fn midpoint(&self, tol: Tolerance) -> Point2 {
        match self.shape(tol) {
            SegmentShape::Line(line) => line.midpoint(),
            SegmentShape::Arc(arc, winding) => arc.mid_between(&self.from(), &self.to(), winding),
        }
    }

    /// The part of this segment's carrier running from `a` to `b`.
    ///
    /// Both points are assumed to lie on the carrier (they may lie beyond the
    /// segment's ends). Arcs keep their travel direction and get a fresh
    /// through-point halfway between `a` and `b`.
    #[must_use]
    pub fn sub_segment(&self, a: Point2, b: Point2, tol: Tolerance) -> Self {
        match self.shape(tol) {
            SegmentShape::Line(_) => Self::Line { from: a, to: b },
            SegmentShape::Arc(arc, winding) => Self::Arc {
                from: a,
                through: arc.mid_between(&a, &b, winding),
                to: b,
            },
        }
    }

    /// Splits the segment at `p`, which is assumed to lie on it.
    #[must_use]
    pub fn split_at(&self, p: Point2, tol: Tolerance) -> (Self, Self) {
        (
            self.sub_segment(self.from(), p, tol),
            self.sub_segment(p, self.to(), tol),
        )
    }
}

impl SegmentShape {
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Line(line) => line.length(),
            Self::Arc(arc, _) => arc.length(),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        match self {
            Self::Line(line) => line.bounds(),
            Self::Arc(arc, _) => arc.bounds(),
        }
    }

    /// Returns `true` if `p` lies on the segment.
    #[must_use]
    pub fn contains(&self, p: &Point2, tol: Tolerance) -> bool {
        match self {
            Self::Line(line) => line.contains(p, tol),
            Self::Arc(arc, _) => arc.contains(p, tol),
        }
    }

    /// Perpendicular foot of `p` on the carrier (line or full circle).
    #[must_use]
    pub fn foot(&self, p: &Point2, tol: Tolerance) -> Option<Point2> {
        match self {
            Self::Line(line) => Some(line.foot(p)),
            Self::Arc(arc, _) => arc.project_point(p, tol),
        }
    }

    /// Closest point of the bounded segment to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Point2, tol: Tolerance) -> Point2 {
        match self {
            Self::Line(line) => line.closest_point(p),
            Self::Arc(arc, _) => {
                if let Some(q) = arc.project_point(p, tol) {
                    if arc.contains(&q, tol) {
                        return q;
                    }
                }
                let (s, e) = (arc.start_point(), arc.end_point());
                if (p - s).norm() <= (p - e).norm() {
                    s
                } else {
                    e
                }
            }
        }
    }

    /// Bounded intersections with a line segment.
    #[must_use]
    pub fn intersect_line(&self, line: &Line, tol: Tolerance) -> Vec<Point2> {
        match self {
            Self::Line(own) => own.intersect_segment(line, tol).into_iter().collect(),
            Self::Arc(arc, _) => arc.intersect_line_bounded(line, tol),
        }
    }

    /// Bounded intersections with an arc.
    #[must_use]
    pub fn intersect_arc(&self, arc: &Arc, tol: Tolerance) -> Vec<Point2> {
        match self {
            Self::Line(line) => arc.intersect_line_bounded(line, tol),
            Self::Arc(own, _) => own.intersect_arc(arc, tol),
        }
    }

    /// Bounded intersections with another segment.
    #[must_use]
    pub fn intersect(&self, other: &Self, tol: Tolerance) -> Vec<Point2> {
        match other {
            Self::Line(line) => self.intersect_line(line, tol),
            Self::Arc(arc, _) => self.intersect_arc(arc, tol),
        }
    }
}
