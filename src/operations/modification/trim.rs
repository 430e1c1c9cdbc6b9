use crate::geometry::curve::ChainParts;
use crate::geometry::{Segment, SegmentChain};
use crate::math::{Point2, Tolerance};

use super::{compare, keep_range, Mark};

/// Which part of an open chain to keep.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TrimKind {
    /// Keep from the boundary point to the end.
    FromPoint(Point2),
    /// Keep from the start up to the boundary point.
    ToPoint(Point2),
    /// Keep between two boundary points, in either order.
    Between(Point2, Point2),
}

/// Trims an open chain at boundary points.
///
/// Boundary points are located on the nearest segment; the first and last
/// segments also accept points on their extensions, so a trim may lengthen
/// the chain at its ends. Cut arcs get fresh through-points.
#[derive(Debug)]
pub(crate) struct Trim<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    kind: TrimKind,
}

impl<'a, C: SegmentChain + ?Sized> Trim<'a, C> {
    pub(crate) fn new(chain: &'a C, kind: TrimKind) -> Self {
        Self { chain, kind }
    }

    /// Returns `None` if a boundary cannot be located or nothing is left.
    pub(crate) fn execute(&self, tol: Tolerance) -> Option<ChainParts> {
        let segs: Vec<Segment> = self.chain.segments().collect();
        let first = segs.first()?;
        let last = segs.len() - 1;
        let head = Mark {
            segment: 0,
            point: first.from(),
        };
        let tail = Mark {
            segment: last,
            point: segs[last].to(),
        };

        let (from, to) = match self.kind {
            TrimKind::FromPoint(p) => (self.locate(&p, tol)?, tail),
            TrimKind::ToPoint(p) => (head, self.locate(&p, tol)?),
            TrimKind::Between(a, b) => {
                let (ma, mb) = (self.locate(&a, tol)?, self.locate(&b, tol)?);
                if compare(&segs, &ma, &mb, tol).is_le() {
                    (ma, mb)
                } else {
                    (mb, ma)
                }
            }
        };
        let kept = keep_range(&segs, from, to, tol);
        if kept.is_none() {
            tracing::debug!(kind = ?self.kind, "trim leaves nothing");
        }
        kept
    }

    fn locate(&self, p: &Point2, tol: Tolerance) -> Option<Mark> {
        let Some(crossing) = self.chain.nearest_crossing(p, true, tol) else {
            tracing::debug!(x = p.x, y = p.y, "trim boundary does not project onto the chain");
            return None;
        };
        Some(Mark {
            segment: crossing.segment,
            point: crossing.point,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Curve, Step};

    const TOL: f64 = 1e-9;

    fn ell() -> Curve {
        Curve::new(Point2::new(0.0, 0.0))
            .line_to(Point2::new(10.0, 0.0))
            .line_to(Point2::new(10.0, 10.0))
    }

    #[test]
    fn cut_head() {
        let tol = Tolerance::default();
        let parts = Trim::new(&ell(), TrimKind::FromPoint(Point2::new(4.0, 0.5)))
            .execute(tol)
            .unwrap();
        assert!((parts.start - Point2::new(4.0, 0.0)).norm() < TOL);
        assert_eq!(parts.steps.len(), 2);
        assert_eq!(parts.steps[1], Step::Line { to: Point2::new(10.0, 10.0) });
    }

    #[test]
    fn cut_tail_across_corner() {
        let tol = Tolerance::default();
        let parts = Trim::new(&ell(), TrimKind::ToPoint(Point2::new(9.5, 3.0)))
            .execute(tol)
            .unwrap();
        assert_eq!(parts.start, Point2::new(0.0, 0.0));
        assert_eq!(parts.steps.len(), 2);
        assert!((parts.steps[1].to() - Point2::new(10.0, 3.0)).norm() < TOL);
    }

    #[test]
    fn trim_extends_past_start() {
        let tol = Tolerance::default();
        let parts = Trim::new(&ell(), TrimKind::FromPoint(Point2::new(-3.0, 1.0)))
            .execute(tol)
            .unwrap();
        assert!((parts.start - Point2::new(-3.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn trim_between_in_either_order() {
        let tol = Tolerance::default();
        let a = Point2::new(5.0, -1.0);
        let b = Point2::new(11.0, 5.0);
        let forward = Trim::new(&ell(), TrimKind::Between(a, b)).execute(tol).unwrap();
        let backward = Trim::new(&ell(), TrimKind::Between(b, a)).execute(tol).unwrap();
        assert_eq!(forward, backward);
        assert!((forward.start - Point2::new(5.0, 0.0)).norm() < TOL);
        assert!((forward.steps[1].to() - Point2::new(10.0, 5.0)).norm() < TOL);
    }

    #[test]
    fn trim_arc_resynthesizes_through_point() {
        let tol = Tolerance::default();
        let curve =
            Curve::new(Point2::new(1.0, 0.0)).arc_to(Point2::new(0.0, 1.0), Point2::new(-1.0, 0.0));
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let parts = Trim::new(&curve, TrimKind::ToPoint(Point2::new(0.0, 2.0)))
            .execute(tol)
            .unwrap();
        let Step::Arc { through, to } = parts.steps[0] else {
            panic!("expected an arc");
        };
        assert!((to - Point2::new(0.0, 1.0)).norm() < TOL);
        assert!((through - Point2::new(s, s)).norm() < TOL, "through={through}");
    }

    #[test]
    fn coincident_bounds_leave_nothing() {
        let tol = Tolerance::default();
        let p = Point2::new(3.0, 0.0);
        assert!(Trim::new(&ell(), TrimKind::Between(p, p)).execute(tol).is_none());
    }
}
