//! Composite line/arc chains.
//!
//! A chain is stored as a start point followed by a list of [`Step`]s, each
//! ending at a vertex. Arc steps carry the point they pass through, so a
//! chain never holds a dangling or doubled arc-through point. The flat
//! [`CurvePoint`] list is kept as the interchange form.

mod chain;
mod closed;
mod open;
mod segment;

pub use chain::{Crossing, SegmentChain, Segments};
pub use closed::Polygon;
pub use open::Curve;
pub use segment::{Segment, SegmentShape};

use crate::error::{OperationError, Result};
use crate::math::Point2;

/// Role of a point in the flat interchange form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointKind {
    /// A vertex ending the previous segment.
    LineEnd,
    /// An interior point of the arc through its two neighbours.
    ArcThrough,
}

/// A point of the flat interchange form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub position: Point2,
    pub kind: PointKind,
}

impl CurvePoint {
    #[must_use]
    pub fn line_end(position: Point2) -> Self {
        Self {
            position,
            kind: PointKind::LineEnd,
        }
    }

    #[must_use]
    pub fn arc_through(position: Point2) -> Self {
        Self {
            position,
            kind: PointKind::ArcThrough,
        }
    }
}

/// One stored segment, relative to the end of the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    Line { to: Point2 },
    Arc { through: Point2, to: Point2 },
}

impl Step {
    /// End vertex of the step.
    #[must_use]
    pub fn to(&self) -> Point2 {
        match self {
            Self::Line { to } | Self::Arc { to, .. } => *to,
        }
    }

    #[must_use]
    pub fn through(&self) -> Option<Point2> {
        match self {
            Self::Line { .. } => None,
            Self::Arc { through, .. } => Some(*through),
        }
    }

    /// The segment this step draws when it starts at `from`.
    #[must_use]
    pub fn segment_from(&self, from: Point2) -> Segment {
        match *self {
            Self::Line { to } => Segment::Line { from, to },
            Self::Arc { through, to } => Segment::Arc { from, through, to },
        }
    }

    /// Applies `f` to every stored point.
    #[must_use]
    pub fn map_points(&self, f: impl Fn(&Point2) -> Point2) -> Self {
        match self {
            Self::Line { to } => Self::Line { to: f(to) },
            Self::Arc { through, to } => Self::Arc {
                through: f(through),
                to: f(to),
            },
        }
    }

    pub(crate) fn set_to(&mut self, p: Point2) {
        match self {
            Self::Line { to } | Self::Arc { to, .. } => *to = p,
        }
    }
}

/// Start point and steps produced by a chain operation, before they are
/// wrapped back into a [`Curve`] or [`Polygon`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChainParts {
    pub(crate) start: Point2,
    pub(crate) steps: Vec<Step>,
}

impl ChainParts {
    pub(crate) fn of<C: SegmentChain + ?Sized>(chain: &C) -> Self {
        Self {
            start: chain.start(),
            steps: chain.steps().to_vec(),
        }
    }
}

/// Flattens a step list into the interchange form. When `closed`, the final
/// vertex (equal to `start`) is omitted.
pub(crate) fn points_from_steps(start: Point2, steps: &[Step], closed: bool) -> Vec<CurvePoint> {
    let mut points = Vec::with_capacity(steps.len() * 2 + 1);
    points.push(CurvePoint::line_end(start));
    let last = steps.len().saturating_sub(1);
    for (i, step) in steps.iter().enumerate() {
        if let Some(through) = step.through() {
            points.push(CurvePoint::arc_through(through));
        }
        if !(closed && i == last) {
            points.push(CurvePoint::line_end(step.to()));
        }
    }
    points
}

/// Parses the interchange form into a start point and steps.
///
/// For a closed chain an arc-through point at index `i` uses its neighbours
/// modulo the length, and a final closing step back to the start is added.
pub(crate) fn steps_from_points(
    points: &[CurvePoint],
    closed: bool,
) -> Result<(Point2, Vec<Step>)> {
    let n = points.len();
    let min = if closed { 3 } else { 2 };
    if n < min {
        return Err(OperationError::InvalidInput(format!(
            "need at least {min} points, got {n}"
        ))
        .into());
    }

    let is_arc = |i: usize| points[i].kind == PointKind::ArcThrough;
    for i in 0..n {
        if !is_arc(i) {
            continue;
        }
        if !closed && i == 0 {
            return Err(OperationError::DanglingArcThrough { index: i, side: "previous" }.into());
        }
        if !closed && i == n - 1 {
            return Err(OperationError::DanglingArcThrough { index: i, side: "next" }.into());
        }
        let next = (i + 1) % n;
        if (closed || next != 0) && is_arc(next) {
            return Err(OperationError::ConsecutiveArcThrough {
                first: i,
                second: next,
            }
            .into());
        }
    }

    // A closed ring may start on an arc-through point; begin at the first vertex.
    let offset = (0..n).find(|&i| !is_arc(i)).unwrap_or(0);
    let at = |i: usize| points[(i + offset) % n];

    let start = at(0).position;
    let mut steps = Vec::with_capacity(n);
    let mut i = 1;
    while i < n {
        let p = at(i);
        match p.kind {
            PointKind::LineEnd => {
                steps.push(Step::Line { to: p.position });
                i += 1;
            }
            PointKind::ArcThrough => {
                // `i + 1 == n` only happens when closed: the arc returns to start.
                let to = if i + 1 < n { at(i + 1).position } else { start };
                steps.push(Step::Arc {
                    through: p.position,
                    to,
                });
                i += 2;
            }
        }
    }
    if closed && !matches!(at(n - 1).kind, PointKind::ArcThrough) {
        steps.push(Step::Line { to: start });
    }
    Ok((start, steps))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DraftError;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn open_points_roundtrip() {
        let points = vec![
            CurvePoint::line_end(p(0.0, 0.0)),
            CurvePoint::line_end(p(4.0, 0.0)),
            CurvePoint::arc_through(p(5.0, 1.0)),
            CurvePoint::line_end(p(4.0, 2.0)),
        ];
        let (start, steps) = steps_from_points(&points, false).unwrap();
        assert_eq!(start, p(0.0, 0.0));
        assert_eq!(steps.len(), 2);
        assert_eq!(points_from_steps(start, &steps, false), points);
    }

    #[test]
    fn closed_points_roundtrip_with_closing_arc() {
        let points = vec![
            CurvePoint::line_end(p(0.0, 0.0)),
            CurvePoint::line_end(p(4.0, 0.0)),
            CurvePoint::line_end(p(4.0, 4.0)),
            CurvePoint::arc_through(p(1.0, 3.0)),
        ];
        let (start, steps) = steps_from_points(&points, true).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], Step::Arc { through: p(1.0, 3.0), to: p(0.0, 0.0) });
        assert_eq!(points_from_steps(start, &steps, true), points);
    }

    #[test]
    fn closed_ring_starting_on_arc_through() {
        let points = vec![
            CurvePoint::arc_through(p(1.0, -1.0)),
            CurvePoint::line_end(p(2.0, 0.0)),
            CurvePoint::line_end(p(2.0, 2.0)),
            CurvePoint::line_end(p(0.0, 0.0)),
        ];
        let (start, steps) = steps_from_points(&points, true).unwrap();
        assert_eq!(start, p(2.0, 0.0));
        assert_eq!(steps.last().unwrap().to(), start);
        assert!(matches!(steps[2], Step::Arc { .. }));
    }

    #[test]
    fn rejects_malformed_tags() {
        let dangling = [
            CurvePoint::arc_through(p(0.0, 0.0)),
            CurvePoint::line_end(p(1.0, 0.0)),
        ];
        assert!(matches!(
            steps_from_points(&dangling, false),
            Err(DraftError::Operation(OperationError::DanglingArcThrough { index: 0, .. }))
        ));

        let doubled = [
            CurvePoint::line_end(p(0.0, 0.0)),
            CurvePoint::arc_through(p(1.0, 1.0)),
            CurvePoint::arc_through(p(2.0, 1.0)),
            CurvePoint::line_end(p(3.0, 0.0)),
        ];
        assert!(matches!(
            steps_from_points(&doubled, false),
            Err(DraftError::Operation(OperationError::ConsecutiveArcThrough {
                first: 1,
                second: 2,
            }))
        ));

        let wrapped = [
            CurvePoint::arc_through(p(0.0, 0.0)),
            CurvePoint::line_end(p(1.0, 0.0)),
            CurvePoint::line_end(p(1.0, 1.0)),
            CurvePoint::arc_through(p(0.0, 1.0)),
        ];
        assert!(steps_from_points(&wrapped, true).is_err());
        assert!(steps_from_points(&wrapped[1..3], false).is_ok());
        assert!(steps_from_points(&wrapped[..1], false).is_err());
    }
}
