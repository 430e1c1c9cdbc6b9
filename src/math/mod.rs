pub mod angle;
pub mod frame;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod tolerance;

pub use angle::{angle_of, normalize_angle, AxisOrientation, Winding};
pub use frame::LocalFrame;
pub use tolerance::Tolerance;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate_vector(v: &Vector2, angle: f64) -> Vector2 {
    nalgebra::Rotation2::new(angle) * v
}

/// Unit vector at `angle` radians from the +x axis.
#[must_use]
pub fn unit_at(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

/// Pushes `p` unless an equal point (within tolerance) is already present.
pub(crate) fn push_unique(points: &mut Vec<Point2>, p: Point2, tol: Tolerance) {
    if !points.iter().any(|q| tol.points_eq(q, &p)) {
        points.push(p);
    }
}
