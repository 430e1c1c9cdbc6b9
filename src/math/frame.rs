use crate::error::{GeometryError, Result};

use super::{Point2, Point3, Tolerance, Vector3};

/// Orthonormal local frame mapping a 3D plane onto the 2D kernel.
///
/// Parametric form: `P(x, y) = origin + x * u + y * v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: Point3,
    u: Vector3,
    v: Vector3,
}

impl LocalFrame {
    /// Creates a frame from an origin and two axis directions.
    ///
    /// The axes are checked, not repaired: they must already be unit length
    /// and mutually perpendicular within tolerance.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotOrthonormal` if either axis is not unit
    /// length or the axes are not perpendicular.
    pub fn new(origin: Point3, u: Vector3, v: Vector3, tol: Tolerance) -> Result<Self> {
        if !tol.eq(u.norm(), 1.0) {
            return Err(GeometryError::NotOrthonormal(format!("|u| = {}", u.norm())).into());
        }
        if !tol.eq(v.norm(), 1.0) {
            return Err(GeometryError::NotOrthonormal(format!("|v| = {}", v.norm())).into());
        }
        if !tol.is_zero(u.dot(&v)) {
            return Err(GeometryError::NotOrthonormal(format!("u . v = {}", u.dot(&v))).into());
        }
        Ok(Self { origin, u, v })
    }

    /// Builds a frame on the plane through `origin` with the given normal.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the normal is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3, tol: Tolerance) -> Result<Self> {
        let normal = normal
            .try_normalize(tol.epsilon())
            .ok_or(GeometryError::ZeroVector)?;

        // Choose a reference vector not parallel to the normal.
        let reference = if normal.x.abs() < 0.9 {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        let u = normal
            .cross(&reference)
            .try_normalize(tol.epsilon())
            .ok_or(GeometryError::ZeroVector)?;
        let v = normal.cross(&u);
        Ok(Self { origin, u, v })
    }

    /// The XY plane at the world origin.
    #[must_use]
    pub fn world_xy() -> Self {
        Self {
            origin: Point3::origin(),
            u: Vector3::x(),
            v: Vector3::y(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn u(&self) -> &Vector3 {
        &self.u
    }

    #[must_use]
    pub fn v(&self) -> &Vector3 {
        &self.v
    }

    /// Projects a 3D point onto the frame: `(u·(p−o), v·(p−o))`.
    #[must_use]
    pub fn to_local(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(self.u.dot(&d), self.v.dot(&d))
    }

    /// Recovers local coordinates by solving `x·u + y·v = p − o`.
    ///
    /// Of the three 2×2 row subsystems (xy, yz, xz) the one with the largest
    /// determinant magnitude is used. Returns `None` when every subsystem is
    /// singular.
    #[must_use]
    pub fn solve_local(&self, p: &Point3) -> Option<Point2> {
        let d = p - self.origin;
        let (u, v) = (&self.u, &self.v);
        let rows = [(0, 1), (1, 2), (0, 2)];

        let (i, j, det) = rows
            .iter()
            .map(|&(i, j)| (i, j, u[i] * v[j] - u[j] * v[i]))
            .max_by(|a, b| a.2.abs().total_cmp(&b.2.abs()))?;
        if det.abs() < f64::EPSILON {
            return None;
        }

        // Cramer's rule on rows i and j.
        let x = (d[i] * v[j] - d[j] * v[i]) / det;
        let y = (u[i] * d[j] - u[j] * d[i]) / det;
        Some(Point2::new(x, y))
    }

    /// Lifts a local point back into 3D.
    #[must_use]
    pub fn to_world(&self, p: &Point2) -> Point3 {
        self.origin + self.u * p.x + self.v * p.y
    }
}
