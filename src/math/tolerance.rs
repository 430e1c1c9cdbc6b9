use crate::error::{GeometryError, Result};

use super::Point2;

/// Numeric tolerance threaded through every geometric comparison.
///
/// Two lengths, angles or coordinates closer than `epsilon` are treated as
/// equal. The value is carried explicitly so that results stay reproducible
/// across very different coordinate scales.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    /// Default epsilon used when no explicit tolerance is supplied.
    pub const DEFAULT_EPSILON: f64 = 1e-8;

    /// Creates a tolerance with the given epsilon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidTolerance` if `epsilon` is not a finite,
    /// strictly positive number.
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(GeometryError::InvalidTolerance(epsilon).into());
        }
        Ok(Self { epsilon })
    }

    /// Returns the epsilon value.
    #[must_use]
    pub fn epsilon(self) -> f64 {
        self.epsilon
    }

    /// Returns `true` if `a` and `b` differ by less than epsilon.
    #[must_use]
    pub fn eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }

    /// Returns `true` if `v` is within epsilon of zero.
    #[must_use]
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.epsilon
    }

    /// Returns `true` if the two points are closer than epsilon.
    #[must_use]
    pub fn points_eq(self, a: &Point2, b: &Point2) -> bool {
        (b - a).norm() < self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}
