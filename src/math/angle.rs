use std::f64::consts::TAU;

use super::{Point2, Tolerance};

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Angle of `p` about `center`, in `[0, 2π)`.
#[must_use]
pub fn angle_of(center: &Point2, p: &Point2) -> f64 {
    let d = p - center;
    normalize_angle(d.y.atan2(d.x))
}

/// Traversal direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Orientation of the triangle `p1 → p2 → p3`.
    ///
    /// Returns `None` when the points are collinear within tolerance. The test
    /// uses the cross product of the normalized edge directions, so it does not
    /// depend on the coordinate scale.
    #[must_use]
    pub fn of(p1: &Point2, p2: &Point2, p3: &Point2, tol: Tolerance) -> Option<Self> {
        let a = (p2 - p1).try_normalize(tol.epsilon())?;
        let b = (p3 - p2).try_normalize(tol.epsilon())?;
        let cross = a.perp(&b);
        if cross.abs() < tol.epsilon() {
            None
        } else if cross > 0.0 {
            Some(Self::CounterClockwise)
        } else {
            Some(Self::Clockwise)
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }

    /// `+1.0` for counter-clockwise, `-1.0` for clockwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }
}

/// Direction of the y axis of the target coordinate system.
///
/// Screen coordinates usually grow downward, which mirrors the sense of
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOrientation {
    #[default]
    YUp,
    YDown,
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn normalize_wraps_negative() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < TOL);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-9);
        assert!(normalize_angle(-1e-20) < TAU);
    }

    #[test]
    fn angle_of_quadrants() {
        let c = Point2::new(1.0, 1.0);
        assert!(angle_of(&c, &Point2::new(2.0, 1.0)).abs() < TOL);
        assert!((angle_of(&c, &Point2::new(1.0, 2.0)) - FRAC_PI_2).abs() < TOL);
        assert!((angle_of(&c, &Point2::new(1.0, 0.0)) - 3.0 * FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn winding_detects_direction() {
        let tol = Tolerance::default();
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        assert_eq!(Winding::of(&a, &b, &c, tol), Some(Winding::CounterClockwise));
        assert_eq!(Winding::of(&c, &b, &a, tol), Some(Winding::Clockwise));
        assert_eq!(Winding::of(&a, &b, &Point2::new(2.0, 0.0), tol), None);
    }
}
