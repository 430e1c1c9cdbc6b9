pub mod arc;
pub mod bounds;
pub mod curve;
pub mod line;

pub use arc::{Arc, Fillet};
pub use bounds::Bounds2;
pub use curve::{
    Crossing, Curve, CurvePoint, PointKind, Polygon, Segment, SegmentChain, SegmentShape, Step,
};
pub use line::Line;
