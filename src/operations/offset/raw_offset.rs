use std::f64::consts::PI;

use crate::geometry::curve::ChainParts;
use crate::geometry::{Arc, Line, Segment, SegmentChain, SegmentShape, Step};
use crate::math::{Point2, Tolerance, Winding};

/// A segment moved sideways, before its ends are trimmed to the neighbours.
#[derive(Debug, Clone, Copy)]
pub(super) enum OffsetSeg {
    Line {
        line: Line,
    },
    Arc {
        /// Full circle carrying the offset arc.
        circle: Arc,
        winding: Winding,
        start: Point2,
        end: Point2,
        /// Sweep of the original segment.
        sweep: f64,
    },
}

/// An offset segment together with the vertex it started from.
#[derive(Debug, Clone, Copy)]
pub(super) struct Offset {
    seg: OffsetSeg,
    original: Segment,
}

impl OffsetSeg {
    fn start(&self) -> Point2 {
        match self {
            Self::Line { line } => line.start(),
            Self::Arc { start, .. } => *start,
        }
    }

    fn end(&self) -> Point2 {
        match self {
            Self::Line { line } => line.end(),
            Self::Arc { end, .. } => *end,
        }
    }

    /// Intersections of the unbounded carriers.
    fn intersect_carrier(&self, other: &Self, tol: Tolerance) -> Vec<Point2> {
        match (self, other) {
            (Self::Line { line: a }, Self::Line { line: b }) => {
                a.intersect_line(b, tol).into_iter().collect()
            }
            (Self::Line { line }, Self::Arc { circle, .. })
            | (Self::Arc { circle, .. }, Self::Line { line }) => circle.intersect_line(line, tol),
            (Self::Arc { circle: a, .. }, Self::Arc { circle: b, .. }) => {
                a.intersect_circle(b, tol)
            }
        }
    }
}

/// Phase A: offsets each segment independently.
pub(super) fn build<C: SegmentChain + ?Sized>(
    chain: &C,
    distance: f64,
    tol: Tolerance,
) -> Option<Vec<Offset>> {
    let eps = tol.epsilon();
    let mut segs = Vec::with_capacity(chain.segment_count());
    for (i, original) in chain.segments().enumerate() {
        let seg = match original.shape(tol) {
            SegmentShape::Line(line) => {
                if line.direction(tol).is_none() {
                    tracing::debug!(segment = i, "zero-length segment cannot be offset");
                    return None;
                }
                OffsetSeg::Line {
                    line: line.offset(distance),
                }
            }
            SegmentShape::Arc(arc, winding) => {
                // Left of counter-clockwise travel is toward the center.
                let radius = arc.radius() - winding.sign() * distance;
                if radius <= eps {
                    tracing::debug!(segment = i, radius, "arc radius collapses under offset");
                    return None;
                }
                let circle = Arc::circle(arc.center(), radius);
                OffsetSeg::Arc {
                    circle,
                    winding,
                    start: circle.project_point(&original.from(), tol)?,
                    end: circle.project_point(&original.to(), tol)?,
                    sweep: arc.sweep_between(&original.from(), &original.to(), winding),
                }
            }
        };
        segs.push(Offset { seg, original });
    }
    Some(segs)
}

/// Phase B: joins consecutive offset segments at corners and rebuilds steps.
pub(super) fn join(segs: &[Offset], closed: bool, tol: Tolerance) -> Option<ChainParts> {
    let n = segs.len();
    let first = segs.first()?;
    let last = segs.last()?;

    // corners[k] is where segment k starts; corners[n] where the last one ends.
    let mut corners = Vec::with_capacity(n + 1);
    if closed {
        for k in 0..n {
            let prev = &segs[(k + n - 1) % n];
            corners.push(join_corner(prev, &segs[k], tol)?);
        }
        corners.push(corners[0]);
    } else {
        corners.push(first.seg.start());
        for k in 1..n {
            corners.push(join_corner(&segs[k - 1], &segs[k], tol)?);
        }
        corners.push(last.seg.end());
    }

    let mut steps = Vec::with_capacity(n);
    for (k, offset) in segs.iter().enumerate() {
        let (a, b) = (corners[k], corners[k + 1]);
        match offset.seg {
            OffsetSeg::Line { line } => {
                if tol.points_eq(&a, &b) {
                    // Edge shrank to a point; its neighbours now meet directly.
                    continue;
                }
                if (b - a).dot(&line.vector()) < 0.0 {
                    tracing::debug!(segment = k, "offset turns a line segment inside out");
                    return None;
                }
                steps.push(Step::Line { to: b });
            }
            OffsetSeg::Arc {
                circle,
                winding,
                sweep,
                ..
            } => {
                if tol.points_eq(&a, &b) {
                    tracing::debug!(segment = k, "offset arc trimmed to nothing");
                    return None;
                }
                let trimmed = circle.sweep_between(&a, &b, winding);
                if (trimmed - sweep).abs() > PI {
                    tracing::debug!(segment = k, sweep, trimmed, "offset arc flipped");
                    return None;
                }
                steps.push(Step::Arc {
                    through: circle.mid_between(&a, &b, winding),
                    to: b,
                });
            }
        }
    }

    if steps.is_empty() {
        return None;
    }
    let start = corners[0];
    if closed {
        if let Some(step) = steps.last_mut() {
            step.set_to(start);
        }
    }
    Some(ChainParts { start, steps })
}

/// Corner point between two consecutive offset segments.
///
/// Tangent-continuous joins already share their offset endpoint. Otherwise
/// the unbounded offset carriers are intersected and the candidate nearest
/// the original corner wins.
fn join_corner(prev: &Offset, next: &Offset, tol: Tolerance) -> Option<Point2> {
    let (a, b) = (prev.seg.end(), next.seg.start());
    if tol.points_eq(&a, &b) {
        return Some(a);
    }
    let corner = next.original.from();
    let picked = prev
        .seg
        .intersect_carrier(&next.seg, tol)
        .into_iter()
        .min_by(|p, q| (p - corner).norm().total_cmp(&(q - corner).norm()));
    if picked.is_none() {
        tracing::debug!(x = corner.x, y = corner.y, "offset corner has no join candidate");
    }
    picked
}
