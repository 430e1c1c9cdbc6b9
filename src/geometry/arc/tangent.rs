//! Tangent lines and tangent circles.

use crate::geometry::Line;
use crate::math::polygon_2d::left_normal;
use crate::math::{push_unique, rotate_vector, Point2, Tolerance, Vector2};

use super::Arc;

impl Arc {
    /// Tangency points on this circle of the tangent lines through `p`.
    ///
    /// Two points for an outside `p`, `p` itself when it lies on the circle,
    /// none when it is inside.
    #[must_use]
    pub fn tangent_points_from(&self, p: &Point2, tol: Tolerance) -> Vec<Point2> {
        let d = p - self.center;
        let dist = d.norm();
        if (dist - self.radius).abs() < tol.epsilon() {
            return vec![*p];
        }
        if dist < self.radius {
            return Vec::new();
        }
        let d2 = dist * dist;
        let r2 = self.radius * self.radius;
        let along = d * (r2 / d2);
        let across = left_normal(d) * (self.radius * (d2 - r2).sqrt() / d2);
        vec![self.center + along + across, self.center + along - across]
    }

    /// Common tangent lines of the two circles.
    ///
    /// Each returned line runs from its tangency point on `self` to its
    /// tangency point on `other`. The outer pair comes first, then the inner
    /// pair; pairs that do not exist (one circle inside the other, or
    /// overlapping circles for the inner pair) are omitted, as are
    /// coincident tangents at a touching point.
    #[must_use]
    pub fn common_tangents(&self, other: &Self, tol: Tolerance) -> Vec<Line> {
        let eps = tol.epsilon();
        let d = other.center - self.center;
        let dist = d.norm();
        if dist < eps {
            return Vec::new();
        }
        let theta = d.y.atan2(d.x);
        let (r1, r2) = (self.radius, other.radius);

        // Work in a frame with `self` at the origin and `other` on +x.
        let to_world = |x: f64, y: f64| self.center + rotate_vector(&Vector2::new(x, y), theta);
        let mut lines = Vec::new();

        let cos_outer = (r1 - r2) / dist;
        if cos_outer.abs() < 1.0 - eps {
            let phi = cos_outer.acos();
            for a in [phi, -phi] {
                let (s, c) = a.sin_cos();
                lines.push(Line::new(
                    to_world(r1 * c, r1 * s),
                    to_world(dist + r2 * c, r2 * s),
                ));
            }
        }

        let cos_inner = (r1 + r2) / dist;
        if cos_inner < 1.0 - eps {
            let phi = cos_inner.acos();
            for a in [phi, -phi] {
                let (s, c) = a.sin_cos();
                lines.push(Line::new(
                    to_world(r1 * c, r1 * s),
                    to_world(dist - r2 * c, -r2 * s),
                ));
            }
        }
        lines
    }

    /// Circles tangent to all three lines.
    ///
    /// For three lines in general position this is the incircle followed by
    /// the three excircles of their triangle. When exactly two lines are
    /// parallel the two circles between them touching the transversal are
    /// returned. Concurrent lines, three parallel lines, or coincident parallel
    /// lines yield nothing.
    #[must_use]
    pub fn circles_tangent_to_lines(l1: &Line, l2: &Line, l3: &Line, tol: Tolerance) -> Vec<Self> {
        let p12 = l1.intersect_line(l2, tol);
        let p13 = l1.intersect_line(l3, tol);
        let p23 = l2.intersect_line(l3, tol);
        match (p12, p13, p23) {
            (Some(c), Some(b), Some(a)) => triangle_circles(&a, &b, &c, tol)
                .map(|circles| circles.to_vec())
                .unwrap_or_default(),
            (None, Some(_), Some(_)) => parallel_pair_circles(l1, l2, l3, tol),
            (Some(_), None, Some(_)) => parallel_pair_circles(l1, l3, l2, tol),
            (Some(_), Some(_), None) => parallel_pair_circles(l2, l3, l1, tol),
            _ => Vec::new(),
        }
    }

    /// Incircle of the triangle formed by three lines.
    #[must_use]
    pub fn incircle(l1: &Line, l2: &Line, l3: &Line, tol: Tolerance) -> Option<Self> {
        let a = l2.intersect_line(l3, tol)?;
        let b = l1.intersect_line(l3, tol)?;
        let c = l1.intersect_line(l2, tol)?;
        triangle_circles(&a, &b, &c, tol).map(|[incircle, ..]| incircle)
    }

    /// Circles of radius `radius` tangent to both carrier lines.
    #[must_use]
    pub fn tangent_circles_line_line(
        l1: &Line,
        l2: &Line,
        radius: f64,
        tol: Tolerance,
    ) -> Vec<Self> {
        let mut centers = Vec::new();
        if radius <= tol.epsilon() {
            return Vec::new();
        }
        for s1 in [1.0, -1.0] {
            for s2 in [1.0, -1.0] {
                let (a, b) = (l1.offset(s1 * radius), l2.offset(s2 * radius));
                if let Some(c) = a.intersect_line(&b, tol) {
                    push_unique(&mut centers, c, tol);
                }
            }
        }
        centers.into_iter().map(|c| Self::circle(c, radius)).collect()
    }

    /// Circles of radius `radius` tangent to a carrier line and to the full
    /// circle of `arc`.
    #[must_use]
    pub fn tangent_circles_line_arc(
        line: &Line,
        arc: &Self,
        radius: f64,
        tol: Tolerance,
    ) -> Vec<Self> {
        let eps = tol.epsilon();
        if radius <= eps {
            return Vec::new();
        }
        let mut centers = Vec::new();
        for s in [1.0, -1.0] {
            let shifted = line.offset(s * radius);
            for r in [arc.radius + radius, arc.radius - radius] {
                if r.abs() <= eps {
                    continue;
                }
                for c in Self::circle(arc.center, r.abs()).intersect_line(&shifted, tol) {
                    push_unique(&mut centers, c, tol);
                }
            }
        }
        centers.into_iter().map(|c| Self::circle(c, radius)).collect()
    }

    /// Circles of radius `radius` tangent to the full circles of both arcs.
    #[must_use]
    pub fn tangent_circles_arc_arc(a: &Self, b: &Self, radius: f64, tol: Tolerance) -> Vec<Self> {
        let eps = tol.epsilon();
        if radius <= eps {
            return Vec::new();
        }
        let mut centers = Vec::new();
        for ra in [a.radius + radius, a.radius - radius] {
            if ra.abs() <= eps {
                continue;
            }
            for rb in [b.radius + radius, b.radius - radius] {
                if rb.abs() <= eps {
                    continue;
                }
                let ca = Self::circle(a.center, ra.abs());
                let cb = Self::circle(b.center, rb.abs());
                for c in ca.intersect_circle(&cb, tol) {
                    push_unique(&mut centers, c, tol);
                }
            }
        }
        centers.into_iter().map(|c| Self::circle(c, radius)).collect()
    }
}

/// Incircle and excircles of triangle `abc`, where side `a` is opposite
/// vertex `a`. `None` for a degenerate triangle.
fn triangle_circles(a: &Point2, b: &Point2, c: &Point2, tol: Tolerance) -> Option<[Arc; 4]> {
    let la = (b - c).norm();
    let lb = (a - c).norm();
    let lc = (a - b).norm();
    let s = 0.5 * (la + lb + lc);
    let area_sq = s * (s - la) * (s - lb) * (s - lc);
    if area_sq <= 0.0 {
        return None;
    }
    let area = area_sq.sqrt();
    if area < tol.epsilon() {
        return None;
    }

    let weighted = |wa: f64, wb: f64, wc: f64| {
        let sum = wa + wb + wc;
        Point2::from((a.coords * wa + b.coords * wb + c.coords * wc) / sum)
    };
    Some([
        Arc::circle(weighted(la, lb, lc), area / s),
        Arc::circle(weighted(-la, lb, lc), area / (s - la)),
        Arc::circle(weighted(la, -lb, lc), area / (s - lb)),
        Arc::circle(weighted(la, lb, -lc), area / (s - lc)),
    ])
}

/// Circles between parallel lines `p1` and `p2` touching `transversal`.
fn parallel_pair_circles(p1: &Line, p2: &Line, transversal: &Line, tol: Tolerance) -> Vec<Arc> {
    let gap = p1.signed_distance(&p2.start());
    let radius = 0.5 * gap.abs();
    if radius < tol.epsilon() {
        return Vec::new();
    }
    let midline = p1.offset(0.5 * gap);
    [radius, -radius]
        .into_iter()
        .filter_map(|d| midline.intersect_line(&transversal.offset(d), tol))
        .map(|c| Arc::circle(c, radius))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn on_circle(circle: &Arc, p: &Point2) -> bool {
        ((p - circle.center()).norm() - circle.radius()).abs() < 1e-7
    }

    #[test]
    fn tangent_points_from_outside() {
        let tol = Tolerance::default();
        let circle = Arc::circle(Point2::new(0.0, 0.0), 3.0);
        let p = Point2::new(5.0, 0.0);
        let pts = circle.tangent_points_from(&p, tol);
        assert_eq!(pts.len(), 2);
        for t in &pts {
            assert!(on_circle(&circle, t));
            let radial = t - circle.center();
            let to_p = p - t;
            assert!(radial.dot(&to_p).abs() < TOL, "not perpendicular at {t}");
        }
        assert!(pts.iter().any(|t| (t - Point2::new(1.8, 2.4)).norm() < TOL));
    }

    #[test]
    fn tangent_points_inside_and_on() {
        let tol = Tolerance::default();
        let circle = Arc::circle(Point2::new(0.0, 0.0), 3.0);
        assert!(circle.tangent_points_from(&Point2::new(1.0, 1.0), tol).is_empty());
        let on = Point2::new(0.0, 3.0);
        assert_eq!(circle.tangent_points_from(&on, tol), vec![on]);
    }

    #[test]
    fn four_common_tangents_for_separate_circles() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 2.0);
        let b = Arc::circle(Point2::new(10.0, 3.0), 1.0);
        let lines = a.common_tangents(&b, tol);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert!(on_circle(&a, &line.start()));
            assert!(on_circle(&b, &line.end()));
            assert!((line.signed_distance(&a.center()).abs() - 2.0).abs() < 1e-7);
            assert!((line.signed_distance(&b.center()).abs() - 1.0).abs() < 1e-7);
        }
    }

    #[test]
    fn overlapping_circles_have_outer_tangents_only() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 2.0);
        let b = Arc::circle(Point2::new(3.0, 0.0), 2.0);
        let lines = a.common_tangents(&b, tol);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!((line.start().y.abs() - 2.0).abs() < TOL);
            assert!((line.end().y.abs() - 2.0).abs() < TOL);
        }
        let inner = Arc::circle(Point2::new(0.5, 0.0), 1.0);
        assert!(a.common_tangents(&inner, tol).is_empty());
    }

    #[test]
    fn incircle_of_right_triangle() {
        let tol = Tolerance::default();
        let l1 = Line::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let l2 = Line::new(Point2::new(0.0, 0.0), Point2::new(0.0, 3.0));
        let l3 = Line::new(Point2::new(4.0, 0.0), Point2::new(0.0, 3.0));
        let inc = Arc::incircle(&l1, &l2, &l3, tol).unwrap();
        assert!((inc.radius() - 1.0).abs() < TOL);
        assert!((inc.center() - Point2::new(1.0, 1.0)).norm() < TOL);

        let all = Arc::circles_tangent_to_lines(&l1, &l2, &l3, tol);
        assert_eq!(all.len(), 4);
        for circle in &all {
            for line in [&l1, &l2, &l3] {
                let d = line.signed_distance(&circle.center()).abs();
                assert!((d - circle.radius()).abs() < 1e-7, "circle {circle:?} not tangent");
            }
        }
    }

    #[test]
    fn two_parallel_lines_and_transversal() {
        let tol = Tolerance::default();
        let l1 = Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let l2 = Line::new(Point2::new(0.0, 4.0), Point2::new(10.0, 4.0));
        let l3 = Line::new(Point2::new(5.0, -1.0), Point2::new(5.0, 5.0));
        let circles = Arc::circles_tangent_to_lines(&l1, &l3, &l2, tol);
        assert_eq!(circles.len(), 2);
        for circle in &circles {
            assert!((circle.radius() - 2.0).abs() < TOL);
            assert!((circle.center().y - 2.0).abs() < TOL);
            assert!(((circle.center().x - 5.0).abs() - 2.0).abs() < TOL);
        }
    }

    #[test]
    fn concurrent_lines_have_no_circles() {
        let tol = Tolerance::default();
        let o = Point2::new(1.0, 1.0);
        let l1 = Line::from_angle(o, 0.0, 1.0);
        let l2 = Line::from_angle(o, 1.0, 1.0);
        let l3 = Line::from_angle(o, 2.0, 1.0);
        assert!(Arc::circles_tangent_to_lines(&l1, &l2, &l3, tol).is_empty());
    }

    #[test]
    fn radius_circles_between_perpendicular_lines() {
        let tol = Tolerance::default();
        let l1 = Line::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let l2 = Line::new(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0));
        let circles = Arc::tangent_circles_line_line(&l1, &l2, 1.5, tol);
        assert_eq!(circles.len(), 4);
        for c in &circles {
            assert!((c.center().x.abs() - 1.5).abs() < TOL);
            assert!((c.center().y.abs() - 1.5).abs() < TOL);
        }
    }

    #[test]
    fn radius_circles_touch_line_and_arc() {
        let tol = Tolerance::default();
        let line = Line::new(Point2::new(-20.0, 0.0), Point2::new(20.0, 0.0));
        let arc = Arc::circle(Point2::new(0.0, 5.0), 3.0);
        let circles = Arc::tangent_circles_line_arc(&line, &arc, 1.0, tol);
        assert!(!circles.is_empty());
        for c in &circles {
            assert!((line.signed_distance(&c.center()).abs() - 1.0).abs() < TOL);
            let d = (c.center() - arc.center()).norm();
            assert!((d - 4.0).abs() < 1e-7 || (d - 2.0).abs() < 1e-7, "d={d}");
        }
    }

    #[test]
    fn radius_circles_touch_two_arcs() {
        let tol = Tolerance::default();
        let a = Arc::circle(Point2::new(0.0, 0.0), 2.0);
        let b = Arc::circle(Point2::new(6.0, 0.0), 2.0);
        let circles = Arc::tangent_circles_arc_arc(&a, &b, 2.0, tol);
        // Externally tangent to both: centers at (3, ±√7).
        assert!(circles
            .iter()
            .any(|c| (c.center() - Point2::new(3.0, 7.0_f64.sqrt())).norm() < 1e-7));
        for c in &circles {
            let da = (c.center() - a.center()).norm();
            let db = (c.center() - b.center()).norm();
            assert!((da - 4.0).abs() < 1e-7 || da.abs() < 1e-7);
            assert!((db - 4.0).abs() < 1e-7 || db.abs() < 1e-7);
        }
    }
}
