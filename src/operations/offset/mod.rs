//! Parallel offset of line/arc chains.

mod raw_offset;

use crate::geometry::curve::ChainParts;
use crate::geometry::SegmentChain;
use crate::math::Tolerance;

/// Offsets every segment of a chain sideways and rejoins the corners.
///
/// Positive distances move to the left of the direction of travel. Line
/// segments shift along their normal; arc segments keep their center and
/// change radius by the distance, shrinking when the left side is inward.
/// Corners where the offset pieces no longer meet are re-intersected.
#[derive(Debug)]
pub(crate) struct ChainOffset<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    distance: f64,
}

impl<'a, C: SegmentChain + ?Sized> ChainOffset<'a, C> {
    pub(crate) fn new(chain: &'a C, distance: f64) -> Self {
        Self { chain, distance }
    }

    /// Runs the offset.
    ///
    /// Returns `None` if an arc radius collapses, a corner cannot be
    /// rejoined, or a segment is turned inside out by the offset.
    pub(crate) fn execute(&self, tol: Tolerance) -> Option<ChainParts> {
        if self.chain.segment_count() == 0 {
            return None;
        }
        if tol.is_zero(self.distance) {
            return Some(ChainParts::of(self.chain));
        }
        let segs = raw_offset::build(self.chain, self.distance, tol)?;
        raw_offset::join(&segs, self.chain.is_closed(), tol)
    }
}
