//! Editing operations on line/arc chains.

mod fillet_corner;
mod split;
mod squeeze;
mod stretch;
mod trim;

pub(crate) use fillet_corner::FilletCorner;
pub(crate) use split::{DivideClosed, DivideOpen};
pub(crate) use squeeze::squeeze;
pub(crate) use stretch::Stretch;
pub(crate) use trim::{Trim, TrimKind};

use std::cmp::Ordering;
use std::f64::consts::TAU;

use crate::geometry::curve::ChainParts;
use crate::geometry::{Segment, SegmentShape};
use crate::math::{Point2, Tolerance};

/// A point located on a chain: segment index and the point itself.
#[derive(Debug, Clone, Copy)]
struct Mark {
    segment: usize,
    point: Point2,
}

/// Signed distance travelled along `seg` from its start to `p`.
///
/// Points beyond either end (on the carrier) give values below zero or
/// above the segment length.
fn along(seg: &Segment, p: &Point2, tol: Tolerance) -> f64 {
    match seg.shape(tol) {
        SegmentShape::Line(line) => line.parameter_of(p) * line.length(),
        SegmentShape::Arc(arc, winding) => {
            let full = arc.sweep_between(&seg.from(), &seg.to(), winding);
            let mut s = arc.sweep_between(&seg.from(), p, winding);
            // Outside the span: whichever end is angularly closer decides.
            if s > full && TAU - s < s - full {
                s -= TAU;
            }
            s * arc.radius()
        }
    }
}

fn compare(segs: &[Segment], a: &Mark, b: &Mark, tol: Tolerance) -> Ordering {
    a.segment.cmp(&b.segment).then_with(|| {
        let seg = &segs[a.segment];
        along(seg, &a.point, tol).total_cmp(&along(seg, &b.point, tol))
    })
}

/// Rebuilds the part of an open run of segments between two marks.
///
/// Returns `None` if `to` does not come strictly after `from`.
fn keep_range(segs: &[Segment], from: Mark, to: Mark, tol: Tolerance) -> Option<ChainParts> {
    if compare(segs, &from, &to, tol) != Ordering::Less || tol.points_eq(&from.point, &to.point) {
        return None;
    }
    let (i, j) = (from.segment, to.segment);
    if i == j {
        return Some(ChainParts {
            start: from.point,
            steps: vec![segs[i].sub_segment(from.point, to.point, tol).step()],
        });
    }

    let mut steps = Vec::with_capacity(j - i + 1);
    let head = &segs[i];
    let start = if tol.points_eq(&from.point, &head.to()) {
        head.to()
    } else {
        steps.push(head.sub_segment(from.point, head.to(), tol).step());
        from.point
    };
    steps.extend(segs[i + 1..j].iter().map(Segment::step));
    let tail = &segs[j];
    if !tol.points_eq(&tail.from(), &to.point) {
        steps.push(tail.sub_segment(tail.from(), to.point, tol).step());
    }
    if steps.is_empty() {
        return None;
    }
    Some(ChainParts { start, steps })
}
