use crate::error::{OperationError, Result};
use crate::geometry::Line;
use crate::math::{Point2, Tolerance, Vector2};
use crate::operations::modification::{squeeze, DivideOpen, FilletCorner, Stretch, Trim, TrimKind};
use crate::operations::offset::ChainOffset;
use crate::operations::transform::Transform2D;

use super::{steps_from_points, ChainParts, CurvePoint, Polygon, SegmentChain, Step};

/// An open chain of line and arc segments.
///
/// Built from a start point with [`line_to`](Curve::line_to) and
/// [`arc_to`](Curve::arc_to), or from a vertex or tagged point list.
/// Editing operations return a new curve and leave `self` untouched; they
/// return `None` when the result would be degenerate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    start: Point2,
    steps: Vec<Step>,
}

impl SegmentChain for Curve {
    fn start(&self) -> Point2 {
        self.start
    }

    fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl Curve {
    /// Starts an empty curve at `start`.
    #[must_use]
    pub fn new(start: Point2) -> Self {
        Self {
            start,
            steps: Vec::new(),
        }
    }

    /// Appends a straight segment.
    #[must_use]
    pub fn line_to(mut self, to: Point2) -> Self {
        self.steps.push(Step::Line { to });
        self
    }

    /// Appends an arc from the current end through `through` to `to`.
    #[must_use]
    pub fn arc_to(mut self, through: Point2, to: Point2) -> Self {
        self.steps.push(Step::Arc { through, to });
        self
    }

    /// Polyline through the given vertices.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than two vertices.
    pub fn from_vertices(vertices: &[Point2]) -> Result<Self> {
        let too_few = || OperationError::InvalidInput("a curve needs at least 2 vertices".into());
        let [start, rest @ ..] = vertices else {
            return Err(too_few().into());
        };
        if rest.is_empty() {
            return Err(too_few().into());
        }
        Ok(Self {
            start: *start,
            steps: rest.iter().map(|&to| Step::Line { to }).collect(),
        })
    }

    /// Parses the flat tagged form.
    ///
    /// # Errors
    ///
    /// Returns an `OperationError` for fewer than two points, an arc-through
    /// point in the first or last slot, or two arc-through points in a row.
    pub fn from_points(points: &[CurvePoint]) -> Result<Self> {
        let (start, steps) = steps_from_points(points, false)?;
        Ok(Self { start, steps })
    }

    pub(crate) fn from_parts(parts: ChainParts) -> Self {
        Self {
            start: parts.start,
            steps: parts.steps,
        }
    }

    /// Joins the end back to the start.
    ///
    /// A curve that already ends on its start has its last vertex snapped
    /// there; otherwise a closing line is added.
    #[must_use]
    pub fn close(&self, tol: Tolerance) -> Polygon {
        let mut steps = self.steps.clone();
        match steps.last_mut() {
            Some(last) if tol.points_eq(&last.to(), &self.start) => last.set_to(self.start),
            _ => steps.push(Step::Line { to: self.start }),
        }
        Polygon::from_parts(ChainParts {
            start: self.start,
            steps,
        })
    }

    /// The same path travelled from the other end.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let segs: Vec<_> = self.segments().collect();
        Self {
            start: self.end(),
            steps: segs.iter().rev().map(|s| s.reversed().step()).collect(),
        }
    }

    /// Maps every stored point; arcs follow their three points.
    #[must_use]
    pub fn transformed(&self, transform: &Transform2D) -> Self {
        let f = |p: &Point2| transform.apply(p);
        Self {
            start: f(&self.start),
            steps: self.steps.iter().map(|s| s.map_points(f)).collect(),
        }
    }

    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        self.transformed(&Transform2D::Translate(offset))
    }

    #[must_use]
    pub fn rotated(&self, center: Point2, angle: f64) -> Self {
        self.transformed(&Transform2D::Rotate { center, angle })
    }

    #[must_use]
    pub fn mirrored(&self, axis: &Line) -> Self {
        self.transformed(&Transform2D::Mirror(*axis))
    }

    #[must_use]
    pub fn scaled(&self, center: Point2, factor: f64) -> Self {
        self.transformed(&Transform2D::Scale { center, factor })
    }

    /// Removes coincident points and straight line–line vertices in place.
    /// Returns the number of removed points.
    pub fn squeeze(&mut self, tol: Tolerance) -> usize {
        squeeze(&mut self.start, &mut self.steps, false, tol)
    }

    /// Parallel curve at `distance`, positive to the left of travel.
    #[must_use]
    pub fn offset(&self, distance: f64, tol: Tolerance) -> Option<Self> {
        ChainOffset::new(self, distance).execute(tol).map(Self::from_parts)
    }

    /// Keeps the part from the point nearest `p` to the end.
    #[must_use]
    pub fn cut_from_start(&self, p: &Point2, tol: Tolerance) -> Option<Self> {
        self.trim_with(TrimKind::FromPoint(*p), tol)
    }

    /// Keeps the part from the start to the point nearest `p`.
    #[must_use]
    pub fn cut_to_end(&self, p: &Point2, tol: Tolerance) -> Option<Self> {
        self.trim_with(TrimKind::ToPoint(*p), tol)
    }

    /// Keeps the part between the points nearest `a` and `b`.
    ///
    /// Boundary points past either end of the curve extend its first or
    /// last segment.
    #[must_use]
    pub fn trim(&self, a: &Point2, b: &Point2, tol: Tolerance) -> Option<Self> {
        self.trim_with(TrimKind::Between(*a, *b), tol)
    }

    fn trim_with(&self, kind: TrimKind, tol: Tolerance) -> Option<Self> {
        Trim::new(self, kind).execute(tol).map(Self::from_parts)
    }

    /// Splits at the point of the curve nearest `p`. Both halves share the
    /// split point.
    #[must_use]
    pub fn divide(&self, p: &Point2, tol: Tolerance) -> Option<(Self, Self)> {
        let (a, b) = DivideOpen::new(self, *p).execute(tol)?;
        Some((Self::from_parts(a), Self::from_parts(b)))
    }

    /// Drags the vertex or arc-through point nearest `pick` by `vector`, or
    /// inserts a new point when `pick` is nearest the middle of a line.
    #[must_use]
    pub fn stretch(
        &self,
        vector: Vector2,
        pick: &Point2,
        insert_arc: bool,
        tol: Tolerance,
    ) -> Self {
        Self::from_parts(Stretch::new(self, vector, *pick, insert_arc).execute(tol))
    }

    /// Rounds the line–line corner at `vertex` with an arc of `radius`.
    #[must_use]
    pub fn fillet_corner(&self, vertex: usize, radius: f64, tol: Tolerance) -> Option<Self> {
        FilletCorner::new(self, vertex, radius)
            .execute(tol)
            .map(Self::from_parts)
    }
}
