use std::f64::consts::TAU;
use std::slice;

use crate::geometry::{Arc, Bounds2, Line};
use crate::math::{push_unique, Point2, Tolerance};

use super::{points_from_steps, CurvePoint, Segment, SegmentShape, Step};

/// Where a point meets a chain: the segment index, the foot on that segment
/// (or on its extension), and the distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub segment: usize,
    pub point: Point2,
    pub distance: f64,
}

/// Iterator over the segments of a chain.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    from: Point2,
    steps: slice::Iter<'a, Step>,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let step = self.steps.next()?;
        let segment = step.segment_from(self.from);
        self.from = step.to();
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// A chain of line and arc segments: a start point plus steps.
///
/// Implemented by [`Curve`](super::Curve) and [`Polygon`](super::Polygon).
/// Every query walks the segments through the provided methods, so open and
/// closed chains share one implementation. A closed chain's last step returns
/// to its start, which makes the wraparound segment an ordinary segment.
pub trait SegmentChain {
    /// First vertex.
    fn start(&self) -> Point2;

    /// Stored steps after the first vertex.
    fn steps(&self) -> &[Step];

    /// Returns `true` for a closed ring.
    fn is_closed(&self) -> bool;

    fn segments(&self) -> Segments<'_> {
        Segments {
            from: self.start(),
            steps: self.steps().iter(),
        }
    }

    fn segment_count(&self) -> usize {
        self.steps().len()
    }

    fn segment(&self, index: usize) -> Option<Segment> {
        let steps = self.steps();
        let step = steps.get(index)?;
        let from = match index {
            0 => self.start(),
            i => steps[i - 1].to(),
        };
        Some(step.segment_from(from))
    }

    /// Last vertex; equal to `start` for a closed chain.
    fn end(&self) -> Point2 {
        self.steps().last().map_or_else(|| self.start(), Step::to)
    }

    /// Segment end vertices without arc-through points. A closed chain lists
    /// its start once.
    fn vertices(&self) -> Vec<Point2> {
        let steps = self.steps();
        let take = if self.is_closed() {
            steps.len().saturating_sub(1)
        } else {
            steps.len()
        };
        std::iter::once(self.start())
            .chain(steps[..take].iter().map(Step::to))
            .collect()
    }

    /// Flat interchange form; inverse of `from_points`.
    fn to_points(&self) -> Vec<CurvePoint> {
        points_from_steps(self.start(), self.steps(), self.is_closed())
    }

    /// Folds over the exact geometry of every segment.
    fn fold_segments<T, F>(&self, tol: Tolerance, init: T, mut f: F) -> T
    where
        F: FnMut(T, usize, &SegmentShape) -> T,
    {
        self.segments()
            .enumerate()
            .fold(init, |acc, (i, seg)| f(acc, i, &seg.shape(tol)))
    }

    /// Applies `f` to every segment and concatenates the results.
    fn collect_segments<T, I, F>(&self, tol: Tolerance, mut f: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(usize, &SegmentShape) -> I,
    {
        self.fold_segments(tol, Vec::new(), |mut acc, i, shape| {
            acc.extend(f(i, shape));
            acc
        })
    }

    fn length(&self, tol: Tolerance) -> f64 {
        self.fold_segments(tol, 0.0, |acc, _, shape| acc + shape.length())
    }

    /// Bounds of all segments, or `None` for a chain without segments.
    fn bounds(&self, tol: Tolerance) -> Option<Bounds2> {
        self.fold_segments(tol, None, |acc: Option<Bounds2>, _, shape| {
            let b = shape.bounds();
            Some(acc.map_or(b, |a| a.union(&b)))
        })
    }

    /// Perpendicular feet of `p` that fall on a segment.
    fn intersect_point(&self, p: &Point2, tol: Tolerance) -> Vec<Point2> {
        let feet = self.collect_segments(tol, |_, shape| {
            shape.foot(p, tol).filter(|q| shape.contains(q, tol))
        });
        dedup(feet, tol)
    }

    /// Intersections with a bounded line segment.
    fn intersect_line(&self, line: &Line, tol: Tolerance) -> Vec<Point2> {
        let hits = self.collect_segments(tol, |_, shape| shape.intersect_line(line, tol));
        dedup(hits, tol)
    }

    /// Intersections with an arc.
    fn intersect_arc(&self, arc: &Arc, tol: Tolerance) -> Vec<Point2> {
        let hits = self.collect_segments(tol, |_, shape| shape.intersect_arc(arc, tol));
        dedup(hits, tol)
    }

    /// Intersections with another chain. Segment pairs whose bounds do not
    /// overlap are skipped.
    fn intersect_chain<C: SegmentChain + ?Sized>(&self, other: &C, tol: Tolerance) -> Vec<Point2> {
        let theirs: Vec<(SegmentShape, Bounds2)> = other
            .segments()
            .map(|seg| {
                let shape = seg.shape(tol);
                (shape, shape.bounds())
            })
            .collect();
        let mut hits = Vec::new();
        for seg in self.segments() {
            let shape = seg.shape(tol);
            let bounds = shape.bounds();
            for (other_shape, other_bounds) in &theirs {
                if !bounds.intersects(other_bounds, tol) {
                    continue;
                }
                for p in shape.intersect(other_shape, tol) {
                    push_unique(&mut hits, p, tol);
                }
            }
        }
        hits
    }

    /// The segment whose perpendicular foot is nearest to `p`.
    ///
    /// With `extrapolate`, the first and last segments of an open chain also
    /// accept feet on their extensions beyond the chain's ends; this is how
    /// trimming locates boundary points that lie past the curve. An arc
    /// extends only on the side of the chain's end, never past the junction
    /// with its neighbour.
    fn nearest_crossing(&self, p: &Point2, extrapolate: bool, tol: Tolerance) -> Option<Crossing> {
        let last = self.segment_count().checked_sub(1)?;
        let open_ends = extrapolate && !self.is_closed();
        let mut best: Option<Crossing> = None;
        for (i, seg) in self.segments().enumerate() {
            let shape = seg.shape(tol);
            let Some(foot) = shape.foot(p, tol) else {
                continue;
            };
            let extends = open_ends
                && match &shape {
                    SegmentShape::Line(line) => {
                        let t = line.parameter_of(p);
                        (i == 0 && t < 0.0) || (i == last && t > 1.0)
                    }
                    SegmentShape::Arc(arc, winding) => {
                        let full = arc.sweep_between(&seg.from(), &seg.to(), *winding);
                        let s = arc.sweep_between(&seg.from(), &foot, *winding);
                        let outside = s > full;
                        let before_start = outside && TAU - s < s - full;
                        (i == 0 && before_start) || (i == last && outside && !before_start)
                    }
                };
            if !extends && !shape.contains(&foot, tol) {
                continue;
            }
            let distance = (p - foot).norm();
            let better = match &best {
                Some(b) => distance < b.distance,
                None => true,
            };
            if better {
                best = Some(Crossing {
                    segment: i,
                    point: foot,
                    distance,
                });
            }
        }
        best
    }

    /// Index and geometry of the segment closest to `p`.
    fn nearest_segment(&self, p: &Point2, tol: Tolerance) -> Option<(usize, Segment)> {
        self.segments()
            .enumerate()
            .map(|(i, seg)| {
                let q = seg.shape(tol).closest_point(p, tol);
                (i, seg, (p - q).norm())
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(i, seg, _)| (i, seg))
    }

    /// Index into [`vertices`](SegmentChain::vertices) of the vertex closest
    /// to `p`.
    fn nearest_vertex(&self, p: &Point2) -> Option<usize> {
        self.vertices()
            .iter()
            .enumerate()
            .min_by(|a, b| (p - a.1).norm().total_cmp(&(p - b.1).norm()))
            .map(|(i, _)| i)
    }
}

fn dedup(points: Vec<Point2>, tol: Tolerance) -> Vec<Point2> {
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        push_unique(&mut out, p, tol);
    }
    out
}
