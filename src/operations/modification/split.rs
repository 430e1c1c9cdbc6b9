use crate::geometry::curve::ChainParts;
use crate::geometry::{Segment, SegmentChain};
use crate::math::{Point2, Tolerance};

use super::{keep_range, Mark};

/// Splits an open chain in two at a point on it.
#[derive(Debug)]
pub(crate) struct DivideOpen<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    at: Point2,
}

impl<'a, C: SegmentChain + ?Sized> DivideOpen<'a, C> {
    pub(crate) fn new(chain: &'a C, at: Point2) -> Self {
        Self { chain, at }
    }

    /// Returns `None` when the point is off the chain or at one of its ends.
    pub(crate) fn execute(&self, tol: Tolerance) -> Option<(ChainParts, ChainParts)> {
        let crossing = self.chain.nearest_crossing(&self.at, false, tol)?;
        if tol.points_eq(&crossing.point, &self.chain.start())
            || tol.points_eq(&crossing.point, &self.chain.end())
        {
            tracing::debug!(x = self.at.x, y = self.at.y, "divide point is an end of the chain");
            return None;
        }
        let segs: Vec<Segment> = self.chain.segments().collect();
        let last = segs.len() - 1;
        let cut = Mark {
            segment: crossing.segment,
            point: crossing.point,
        };
        let head = Mark {
            segment: 0,
            point: segs[0].from(),
        };
        let tail = Mark {
            segment: last,
            point: segs[last].to(),
        };
        Some((keep_range(&segs, head, cut, tol)?, keep_range(&segs, cut, tail, tol)?))
    }
}

/// Opens a closed chain at a point on it.
///
/// The result starts and ends at the located point and runs once around the
/// ring in the original direction.
#[derive(Debug)]
pub(crate) struct DivideClosed<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    at: Point2,
}

impl<'a, C: SegmentChain + ?Sized> DivideClosed<'a, C> {
    pub(crate) fn new(chain: &'a C, at: Point2) -> Self {
        Self { chain, at }
    }

    pub(crate) fn execute(&self, tol: Tolerance) -> Option<ChainParts> {
        let Some(crossing) = self.chain.nearest_crossing(&self.at, false, tol) else {
            tracing::debug!(x = self.at.x, y = self.at.y, "divide point is not on the ring");
            return None;
        };
        let segs: Vec<Segment> = self.chain.segments().collect();
        let n = segs.len();
        let k = crossing.segment;
        let p = crossing.point;

        // On a vertex: rotate the ring so it starts there.
        let vertex = if tol.points_eq(&p, &segs[k].from()) {
            Some(k)
        } else if tol.points_eq(&p, &segs[k].to()) {
            Some((k + 1) % n)
        } else {
            None
        };
        if let Some(v) = vertex {
            let steps = (0..n).map(|m| segs[(v + m) % n].step()).collect();
            return Some(ChainParts {
                start: segs[v].from(),
                steps,
            });
        }

        let (before, after) = segs[k].split_at(p, tol);
        let mut steps = Vec::with_capacity(n + 1);
        steps.push(after.step());
        steps.extend((1..n).map(|m| segs[(k + m) % n].step()));
        steps.push(before.step());
        Some(ChainParts { start: p, steps })
    }
}
