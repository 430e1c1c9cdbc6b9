use crate::geometry::curve::SegmentChain;
use crate::geometry::Line;
use crate::math::{rotate_vector, Point2, Tolerance};

use super::Arc;

impl Arc {
    /// Radial projection of `p` onto the circle.
    ///
    /// Returns `None` when `p` coincides with the center.
    #[must_use]
    pub fn project_point(&self, p: &Point2, tol: Tolerance) -> Option<Point2> {
        let dir = (p - self.center).try_normalize(tol.epsilon())?;
        Some(self.center + dir * self.radius)
    }

    /// Intersections of the full circle with the infinite carrier of `line`.
    ///
    /// Returns no points when the line misses, one at tangency, and two
    /// otherwise. A degenerate line yields nothing.
    #[must_use]
    pub fn intersect_line(&self, line: &Line, tol: Tolerance) -> Vec<Point2> {
        let eps = tol.epsilon();
        let Some(dir) = line.direction(tol) else {
            return Vec::new();
        };
        let foot = line.foot(&self.center);
        let to_foot = foot - self.center;
        let dist = to_foot.norm();

        if dist > self.radius + eps {
            return Vec::new();
        }
        if (dist - self.radius).abs() < eps {
            return vec![foot];
        }
        if dist < eps {
            // Line through the center: hits lie along its own direction.
            return vec![
                self.center + dir * self.radius,
                self.center - dir * self.radius,
            ];
        }

        let alpha = (dist / self.radius).clamp(-1.0, 1.0).acos();
        let base = to_foot / dist;
        vec![
            self.center + rotate_vector(&base, alpha) * self.radius,
            self.center + rotate_vector(&base, -alpha) * self.radius,
        ]
    }

    /// Intersections of the two full circles.
    ///
    /// Concentric circles yield nothing. Tangent circles yield their single
    /// contact point, computed identically from either side.
    #[must_use]
    pub fn intersect_circle(&self, other: &Self, tol: Tolerance) -> Vec<Point2> {
        let eps = tol.epsilon();
        let d = other.center - self.center;
        let dist = d.norm();
        if dist < eps {
            return Vec::new();
        }
        let (r1, r2) = (self.radius, other.radius);
        let u = d / dist;

        if (dist - (r1 + r2)).abs() < eps {
            return vec![self.center + u * r1];
        }
        if (dist - (r1 - r2).abs()).abs() < eps {
            // Internal tangency: the contact lies on the far side of the larger
            // circle's center.
            let p = if r1 < r2 {
                self.center - u * r1
            } else {
                self.center + u * r1
            };
            return vec![p];
        }
        if dist > r1 + r2 || dist < (r1 - r2).abs() {
            return Vec::new();
        }

        let cos = ((dist * dist + r1 * r1 - r2 * r2) / (2.0 * dist * r1)).clamp(-1.0, 1.0);
        let alpha = cos.acos();
        let base = d.y.atan2(d.x);
        vec![self.point_at(base + alpha), self.point_at(base - alpha)]
    }

    /// Intersections of this arc with the bounded segment `line`.
    #[must_use]
    pub fn intersect_line_bounded(&self, line: &Line, tol: Tolerance) -> Vec<Point2> {
        self.intersect_line(line, tol)
            .into_iter()
            .filter(|p| self.contains(p, tol) && line.contains(p, tol))
            .collect()
    }

    /// Intersections of the two arcs, restricted to both spans.
    #[must_use]
    pub fn intersect_arc(&self, other: &Self, tol: Tolerance) -> Vec<Point2> {
        self.intersect_circle(other, tol)
            .into_iter()
            .filter(|p| self.contains(p, tol) && other.contains(p, tol))
            .collect()
    }

    /// Intersections of this arc with every segment of a curve or polygon.
    #[must_use]
    pub fn intersect_chain<C: SegmentChain + ?Sized>(
        &self,
        chain: &C,
        tol: Tolerance,
    ) -> Vec<Point2> {
        chain.intersect_arc(self, tol)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::geometry::Curve;

    const TOL: f64 = 1e-9;

    fn has_point(points: &[Point2], p: Point2) -> bool {
        points.iter().any(|q| (q - p).norm() < 1e-7)
    }

    #[test]
    fn line_through_center() {
        let tol = Tolerance::default();
        let circle = Arc::circle(Point2::new(0.0, 0.0), 5.0);
        let line = Line::new(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0));
        let hits = circle.intersect_line(&line, tol);
        assert_eq!(hits.len(), 2);
        assert!(has_point(&hits, Point2::new(5.0, 0.0)));
        assert!(has_point(&hits, Point2::new(-5.0, 0.0)));
    }

    #[test]
    fn line_secant_and_tangent() {
        let tol = Tolerance::default();
        let circle = Arc::circle(Point2::new(1.0, 2.0), 5.0);
        let secant = Line::new(Point2::new(-10.0, 5.0), Point2::new(10.0, 5.0));
        let hits = circle.intersect_line(&secant, tol);
        assert_eq!(hits.len(), 2);
        assert!(has_point(&hits, Point2::new(5.0, 5.0)));
        assert!(has_point(&hits, Point2::new(-3.0, 5.0)));

        let tangent = Line::new(Point2::new(-10.0, 7.0), Point2::new(10.0, 7.0));
        let hits = circle.intersect_line(&tangent, tol);
        assert_eq!(hits.len(), 1);
        assert!(has_point(&hits, Point2::new(1.0, 7.0)));

        let miss = Line::new(Point2::new(-10.0, 7.5), Point2::new(10.0, 7.5));
        assert!(circle.intersect_line(&miss, tol).is_empty());
    }

    #[test]
    fn circle_circle_two_points() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 5.0);
        let b = Arc::circle(Point2::new(6.0, 0.0), 3.0);
        let hits = a.intersect_circle(&b, tol);
        assert_eq!(hits.len(), 2);
        let y = (5.0_f64 * 5.0 - (13.0_f64 / 3.0).powi(2)).sqrt();
        assert!(has_point(&hits, Point2::new(13.0 / 3.0, y)));
        assert!(has_point(&hits, Point2::new(13.0 / 3.0, -y)));
        assert!((y - 2.494_438_257_849_294).abs() < TOL);
    }

    #[test]
    fn equal_circles_meet_on_bisector() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 5.0);
        let b = Arc::circle(Point2::new(8.0, 0.0), 5.0);
        let hits = a.intersect_circle(&b, tol);
        assert_eq!(hits.len(), 2);
        assert!(has_point(&hits, Point2::new(4.0, 3.0)));
        assert!(has_point(&hits, Point2::new(4.0, -3.0)));
    }

    #[test]
    fn circle_intersection_is_symmetric() {
        let tol = Tolerance::default();
        let pairs = [
            (Arc::circle(Point2::new(0.0, 0.0), 5.0), Arc::circle(Point2::new(6.0, 0.0), 3.0)),
            (Arc::circle(Point2::new(1.0, 1.0), 2.0), Arc::circle(Point2::new(2.0, 3.0), 2.5)),
            // External and internal tangency.
            (Arc::circle(Point2::new(0.0, 0.0), 2.0), Arc::circle(Point2::new(5.0, 0.0), 3.0)),
            (Arc::circle(Point2::new(0.0, 0.0), 2.0), Arc::circle(Point2::new(1.0, 0.0), 3.0)),
            (Arc::circle(Point2::new(0.0, 0.0), 3.0), Arc::circle(Point2::new(1.0, 0.0), 2.0)),
        ];
        for (a, b) in pairs {
            let ab = a.intersect_circle(&b, tol);
            let ba = b.intersect_circle(&a, tol);
            assert_eq!(ab.len(), ba.len());
            for p in &ab {
                assert!(has_point(&ba, *p), "{p} missing from reverse query");
            }
        }
    }

    #[test]
    fn internal_tangency_point() {
        let tol = Tolerance::default();
        let small = Arc::circle(Point2::new(0.0, 0.0), 2.0);
        let large = Arc::circle(Point2::new(1.0, 0.0), 3.0);
        let hits = small.intersect_circle(&large, tol);
        assert_eq!(hits.len(), 1);
        assert!(has_point(&hits, Point2::new(-2.0, 0.0)));
    }

    #[test]
    fn tangency_boundary() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 2.0);
        let inside = Arc::circle(Point2::new(5.0 - 1e-4, 0.0), 3.0);
        let touching = Arc::circle(Point2::new(5.0, 0.0), 3.0);
        let apart = Arc::circle(Point2::new(5.0 + 1e-4, 0.0), 3.0);
        assert_eq!(a.intersect_circle(&inside, tol).len(), 2);
        assert_eq!(a.intersect_circle(&touching, tol).len(), 1);
        assert!(a.intersect_circle(&apart, tol).is_empty());
    }

    #[test]
    fn concentric_circles_do_not_intersect() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(2.0, 2.0), 1.0);
        let b = Arc::circle(Point2::new(2.0, 2.0), 3.0);
        assert!(a.intersect_circle(&b, tol).is_empty());
    }

    #[test]
    fn bounded_arc_filters_points() {
        let tol = Tolerance::default();
        let upper = Arc::new(Point2::new(0.0, 0.0), 5.0, 0.0, PI);
        let line = Line::new(Point2::new(-10.0, 3.0), Point2::new(10.0, 3.0));
        assert_eq!(upper.intersect_line_bounded(&line, tol).len(), 2);
        let below = Line::new(Point2::new(-10.0, -3.0), Point2::new(10.0, -3.0));
        assert!(upper.intersect_line_bounded(&below, tol).is_empty());
        let short = Line::new(Point2::new(0.0, 3.0), Point2::new(10.0, 3.0));
        let hits = upper.intersect_line_bounded(&short, tol);
        assert_eq!(hits.len(), 1);
        assert!(has_point(&hits, Point2::new(4.0, 3.0)));
    }

    #[test]
    fn arc_against_curve() {
        let tol = Tolerance::default();
        let curve = Curve::new(Point2::new(-10.0, 1.0))
            .line_to(Point2::new(10.0, 1.0))
            .line_to(Point2::new(10.0, -10.0));
        let circle = Arc::circle(Point2::new(0.0, 0.0), 5.0);
        let hits = circle.intersect_chain(&curve, tol);
        assert_eq!(hits.len(), 2);
        let x = 24.0_f64.sqrt();
        assert!(has_point(&hits, Point2::new(x, 1.0)));
        assert!(has_point(&hits, Point2::new(-x, 1.0)));
    }

    #[test]
    fn projection_lands_on_circle() {
        let tol = Tolerance::default();
        let circle = Arc::circle(Point2::new(1.0, 1.0), 2.0);
        let p = circle.project_point(&Point2::new(4.0, 5.0), tol).unwrap();
        assert!((p - Point2::new(1.0 + 1.2, 1.0 + 1.6)).norm() < TOL);
        assert!(circle.project_point(&Point2::new(1.0, 1.0), tol).is_none());
    }
}
