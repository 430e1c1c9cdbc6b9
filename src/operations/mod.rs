//! Algorithms over line/arc chains.
//!
//! Offset and the editing operations work on step lists and are reached
//! through methods on [`Curve`](crate::geometry::Curve) and
//! [`Polygon`](crate::geometry::Polygon).

pub(crate) mod modification;
pub(crate) mod offset;
pub mod transform;

pub use transform::Transform2D;
