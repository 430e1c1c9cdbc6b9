use crate::error::{OperationError, Result};
use crate::geometry::Line;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Tolerance, Vector2, Winding};
use crate::operations::modification::{squeeze, DivideClosed, DivideOpen, FilletCorner, Stretch};
use crate::operations::offset::ChainOffset;
use crate::operations::transform::Transform2D;

use super::{steps_from_points, ChainParts, Curve, CurvePoint, SegmentChain, SegmentShape, Step};

/// A closed ring of line and arc segments.
///
/// The last step always returns to the start, so the closing segment is an
/// ordinary segment and may be an arc.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    start: Point2,
    steps: Vec<Step>,
}

impl SegmentChain for Polygon {
    fn start(&self) -> Point2 {
        self.start
    }

    fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl Polygon {
    /// Straight-edged ring through the given vertices.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than three vertices.
    pub fn from_vertices(vertices: &[Point2]) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(OperationError::InvalidInput(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            ))
            .into());
        }
        let start = vertices[0];
        let steps = vertices[1..]
            .iter()
            .chain(std::iter::once(&start))
            .map(|&to| Step::Line { to })
            .collect();
        Ok(Self { start, steps })
    }

    /// Parses the flat tagged form, wrapping arc-through neighbours modulo
    /// the point count.
    ///
    /// # Errors
    ///
    /// Returns an `OperationError` for fewer than three points or two
    /// arc-through points in a row (including across the wrap).
    pub fn from_points(points: &[CurvePoint]) -> Result<Self> {
        let (start, steps) = steps_from_points(points, true)?;
        Ok(Self { start, steps })
    }

    pub(crate) fn from_parts(parts: ChainParts) -> Self {
        Self {
            start: parts.start,
            steps: parts.steps,
        }
    }

    /// The same segments as an open curve from the start back to itself.
    #[must_use]
    pub fn open_at_start(&self) -> Curve {
        Curve::from_parts(ChainParts::of(self))
    }

    /// The ring travelled the other way round, from the same start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let segs: Vec<_> = self.segments().collect();
        Self {
            start: self.start,
            steps: segs.iter().rev().map(|s| s.reversed().step()).collect(),
        }
    }

    /// Enclosed area, positive for a counter-clockwise ring.
    ///
    /// Arc segments add or remove the circular segment between the chord
    /// and the arc.
    #[must_use]
    pub fn signed_area(&self, tol: Tolerance) -> f64 {
        let chords = signed_area_2d(&self.vertices());
        self.segments().fold(chords, |acc, seg| match seg.shape(tol) {
            SegmentShape::Line(_) => acc,
            SegmentShape::Arc(arc, winding) => {
                let theta = arc.sweep_between(&seg.from(), &seg.to(), winding);
                let r = arc.radius();
                acc + winding.sign() * 0.5 * r * r * (theta - theta.sin())
            }
        })
    }

    /// Direction of travel, or `None` for a ring without area.
    #[must_use]
    pub fn orientation(&self, tol: Tolerance) -> Option<Winding> {
        let area = self.signed_area(tol);
        if area > tol.epsilon() {
            Some(Winding::CounterClockwise)
        } else if area < -tol.epsilon() {
            Some(Winding::Clockwise)
        } else {
            None
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

    /// Removes coincident points and straight line–line vertices in place,
    /// the start vertex included. Returns the number of removed points.
    pub fn squeeze(&mut self, tol: Tolerance) -> usize {
        squeeze(&mut self.start, &mut self.steps, true, tol)
    }

    /// Parallel ring at `distance`, positive outward.
    ///
    /// Returns `None` for a ring without area or when the offset
    /// degenerates.
    #[must_use]
    pub fn offset(&self, distance: f64, tol: Tolerance) -> Option<Self> {
        let left = match self.orientation(tol)? {
            Winding::CounterClockwise => -distance,
            Winding::Clockwise => distance,
        };
        ChainOffset::new(self, left).execute(tol).map(Self::from_parts)
    }

    /// Opens the ring at the point nearest `p`. The curve starts and ends
    /// there.
    #[must_use]
    pub fn divide(&self, p: &Point2, tol: Tolerance) -> Option<Curve> {
        DivideClosed::new(self, *p).execute(tol).map(Curve::from_parts)
    }

    /// Cuts the ring at two points into the run from `p` to `q` and the
    /// run from `q` back to `p`.
    #[must_use]
    pub fn divide_between(
        &self,
        p: &Point2,
        q: &Point2,
        tol: Tolerance,
    ) -> Option<(Curve, Curve)> {
        let opened = self.divide(p, tol)?;
        let (a, b) = DivideOpen::new(&opened, *q).execute(tol)?;
        Some((Curve::from_parts(a), Curve::from_parts(b)))
    }

    /// Drags the point nearest `pick` by `vector`, or inserts a new point
    /// when `pick` is nearest the middle of a line.
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Polygon {
        Polygon::from_vertices(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]).unwrap()
    }

    /// Unit half disk above the x axis, closed by an arc.
    fn half_disk() -> Polygon {
        Polygon::from_points(&[
            CurvePoint::line_end(p(-1.0, 0.0)),
            CurvePoint::line_end(p(1.0, 0.0)),
            CurvePoint::arc_through(p(0.0, 1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn needs_three_vertices() {
        assert!(Polygon::from_vertices(&[p(0.0, 0.0), p(1.0, 0.0)]).is_err());
        let ring = square();
        assert_eq!(ring.segment_count(), 4);
        assert_eq!(ring.end(), ring.start());
        assert_eq!(ring.vertices().len(), 4);
    }

    #[test]
    fn area_with_arc_edge() {
        let tol = Tolerance::default();
        assert_relative_eq!(square().signed_area(tol), 16.0, epsilon = 1e-12);
        assert_relative_eq!(half_disk().signed_area(tol), PI / 2.0, epsilon = 1e-9);
        assert_relative_eq!(half_disk().reversed().signed_area(tol), -PI / 2.0, epsilon = 1e-9);
        assert_eq!(square().reversed().orientation(tol), Some(Winding::Clockwise));
    }

    #[test]
    fn offset_square_out_and_back() {
        let tol = Tolerance::default();
        let grown = square().offset(2.0, tol).unwrap();
        assert!((grown.start() - p(-2.0, -2.0)).norm() < TOL);
        assert_relative_eq!(grown.signed_area(tol), 64.0, epsilon = 1e-9);
        let back = grown.offset(-2.0, tol).unwrap();
        for (a, b) in square().vertices().iter().zip(back.vertices()) {
            assert!((a - b).norm() < 1e-9, "{a} != {b}");
        }
    }

    #[test]
    fn offset_is_outward_for_clockwise_rings() {
        let tol = Tolerance::default();
        let grown = square().reversed().offset(1.0, tol).unwrap();
        assert_relative_eq!(grown.signed_area(tol), -36.0, epsilon = 1e-9);
    }

    #[test]
    fn offset_half_disk_grows_radius() {
        let tol = Tolerance::default();
        let grown = half_disk().offset(0.5, tol).unwrap();
        assert_eq!(grown.segment_count(), 2);
        let Step::Arc { through, .. } = grown.steps()[1] else {
            panic!("expected an arc");
        };
        assert!((through.coords.norm() - 1.5).abs() < 1e-7, "through={through}");
    }

    #[test]
    fn open_at_start_keeps_segments() {
        let curve = square().open_at_start();
        assert_eq!(curve.segment_count(), 4);
        assert_eq!(curve.end(), curve.start());
        assert_eq!(curve.close(Tolerance::default()), square());
    }

    #[test]
    fn divide_between_two_edges() {
        let tol = Tolerance::default();
        let (a, b) = square().divide_between(&p(2.0, 0.0), &p(2.0, 4.0), tol).unwrap();
        assert_eq!(a.start(), p(2.0, 0.0));
        assert!((a.end() - p(2.0, 4.0)).norm() < TOL);
        assert_relative_eq!(a.length(tol), 8.0, epsilon = 1e-9);
        assert_relative_eq!(b.length(tol), 8.0, epsilon = 1e-9);
        assert!(square().divide_between(&p(2.0, 0.0), &p(2.0, 0.0), tol).is_none());
    }

    #[test]
    fn squeeze_ring() {
        let tol = Tolerance::default();
        let mut ring = Polygon::from_vertices(&[
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 4.0),
            p(0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(ring.squeeze(tol), 1);
        assert_eq!(ring, square());
    }

    #[test]
    fn squeeze_keeps_three_segments() {
        let tol = Tolerance::default();
        let mut sliver = Polygon::from_vertices(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)]).unwrap();
        assert_eq!(sliver.squeeze(tol), 0);
        assert_eq!(sliver.segment_count(), 3);
        assert_eq!(sliver.end(), sliver.start());
    }

    #[test]
    fn rotated_keeps_area() {
        let tol = Tolerance::default();
        let turned = half_disk().rotated(p(5.0, 0.0), 0.7);
        assert_relative_eq!(turned.signed_area(tol), PI / 2.0, epsilon = 1e-9);
        let flipped = half_disk().mirrored(&Line::new(p(0.0, 0.0), p(1.0, 0.0)));
        assert_relative_eq!(flipped.signed_area(tol), -PI / 2.0, epsilon = 1e-9);
    }
}
