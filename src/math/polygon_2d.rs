use super::{Point2, Tolerance, Vector2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// Returns `None` if the two points coincide within tolerance.
#[must_use]
pub fn segment_direction(a: &Point2, b: &Point2, tol: Tolerance) -> Option<Vector2> {
    (b - a).try_normalize(tol.epsilon())
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Turn between the directions `a → b` and `b → c`, in `(-π, π]`.
///
/// Zero means `b` lies on a straight continuation; positive turns are left.
#[must_use]
pub fn turn_angle(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let d1 = b - a;
    let d2 = c - b;
    d1.perp(&d2).atan2(d1.dot(&d2))
}
