//! A 2D drafting geometry kernel.
//!
//! [`geometry::Arc`] is the circular-arc primitive. [`geometry::Curve`] and
//! [`geometry::Polygon`] are open and closed chains of line and arc
//! segments, with offset, trim, divide, stretch and fillet operations.
//! Every comparison takes an explicit [`math::Tolerance`].

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{DraftError, Result};
