use crate::geometry::curve::ChainParts;
use crate::geometry::{Arc, Line, Segment, SegmentChain};
use crate::math::Tolerance;

/// Rounds the corner between two line segments with a tangent arc.
///
/// `vertex` indexes [`SegmentChain::vertices`]. Both segments meeting there
/// must be lines, and the fillet's tangent points must fall on them. The
/// two lines are shortened to the tangent points and the arc is inserted
/// between them. Rounding the start of a ring makes the second tangent
/// point the new start.
#[derive(Debug)]
pub(crate) struct FilletCorner<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    vertex: usize,
    radius: f64,
}

impl<'a, C: SegmentChain + ?Sized> FilletCorner<'a, C> {
    pub(crate) fn new(chain: &'a C, vertex: usize, radius: f64) -> Self {
        Self {
            chain,
            vertex,
            radius,
        }
    }

    pub(crate) fn execute(&self, tol: Tolerance) -> Option<ChainParts> {
        let segs: Vec<Segment> = self.chain.segments().collect();
        let n = segs.len();
        let v = self.vertex;
        let wraps = self.chain.is_closed() && v == 0;
        if v >= n || (v == 0 && !wraps) {
            tracing::debug!(vertex = v, segments = n, "no corner at this vertex");
            return None;
        }
        let (a, b) = (if wraps { n - 1 } else { v - 1 }, v);
        let (Segment::Line { from: p0, to: corner }, Segment::Line { to: p2, .. }) =
            (segs[a], segs[b])
        else {
            tracing::debug!(vertex = v, "corner is not between two lines");
            return None;
        };

        let incoming = Line::new(p0, corner);
        let outgoing = Line::new(corner, p2);
        let fillet = Arc::fillet_line_line(&incoming, &p2, &outgoing, &p0, self.radius, tol)?;
        let (t1, t2) = (fillet.first_tangent, fillet.second_tangent);
        if !incoming.contains(&t1, tol) || !outgoing.contains(&t2, tol) {
            tracing::debug!(vertex = v, radius = self.radius, "fillet does not fit the corner");
            return None;
        }

        let round = Segment::Arc {
            from: t1,
            through: fillet.arc.mid_point(),
            to: t2,
        };
        let head = (!tol.points_eq(&p0, &t1)).then_some(Segment::Line { from: p0, to: t1 });
        let tail = (!tol.points_eq(&t2, &p2)).then_some(Segment::Line { from: t2, to: p2 });

        let mut out: Vec<Segment> = Vec::with_capacity(n + 1);
        if wraps {
            out.extend(tail);
            out.extend_from_slice(&segs[1..a]);
            out.extend(head);
            out.push(round);
        } else {
            out.extend_from_slice(&segs[..a]);
            out.extend(head);
            out.push(round);
            out.extend(tail);
            out.extend_from_slice(&segs[b + 1..]);
        }
        let start = out.first()?.from();
        Some(ChainParts {
            start,
            steps: out.iter().map(Segment::step).collect(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Curve, Polygon, Step};
    use crate::math::Point2;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn ell() -> Curve {
        Curve::new(p(0.0, 0.0)).line_to(p(10.0, 0.0)).line_to(p(10.0, 10.0))
    }

    #[test]
    fn rounds_open_corner() {
        let tol = Tolerance::default();
        let parts = FilletCorner::new(&ell(), 1, 2.0).execute(tol).unwrap();
        assert_eq!(parts.start, p(0.0, 0.0));
        assert_eq!(parts.steps.len(), 3);
        assert!((parts.steps[0].to() - p(8.0, 0.0)).norm() < TOL);
        let Step::Arc { through, to } = parts.steps[1] else {
            panic!("expected an arc");
        };
        let s = std::f64::consts::SQRT_2;
        assert!((through - p(8.0 + s, 2.0 - s)).norm() < TOL, "through={through}");
        assert!((to - p(10.0, 2.0)).norm() < TOL);
        assert_eq!(parts.steps[2].to(), p(10.0, 10.0));
    }

    #[test]
    fn rounds_ring_start() {
        let tol = Tolerance::default();
        let square =
            Polygon::from_vertices(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]).unwrap();
        let parts = FilletCorner::new(&square, 0, 1.0).execute(tol).unwrap();
        assert!((parts.start - p(1.0, 0.0)).norm() < TOL);
        assert_eq!(parts.steps.len(), 5);
        assert!((parts.steps[3].to() - p(0.0, 1.0)).norm() < TOL);
        assert!(matches!(parts.steps[4], Step::Arc { .. }));
        assert_eq!(parts.steps[4].to(), parts.start);
    }

    #[test]
    fn radius_consuming_whole_segment_drops_it() {
        let tol = Tolerance::default();
        let parts = FilletCorner::new(&ell(), 1, 10.0).execute(tol).unwrap();
        assert_eq!(parts.steps.len(), 1);
        assert!(matches!(parts.steps[0], Step::Arc { .. }));
        assert!((parts.steps[0].to() - p(10.0, 10.0)).norm() < TOL);
    }

    #[test]
    fn rejects_oversized_radius_and_end_vertices() {
        let tol = Tolerance::default();
        assert!(FilletCorner::new(&ell(), 1, 12.0).execute(tol).is_none());
        assert!(FilletCorner::new(&ell(), 0, 1.0).execute(tol).is_none());
        assert!(FilletCorner::new(&ell(), 2, 1.0).execute(tol).is_none());
    }

    #[test]
    fn rejects_arc_corner() {
        let tol = Tolerance::default();
        let curve = Curve::new(p(0.0, 0.0))
            .line_to(p(4.0, 0.0))
            .arc_to(p(6.0, 2.0), p(4.0, 4.0));
        assert!(FilletCorner::new(&curve, 1, 0.5).execute(tol).is_none());
    }
}
