use crate::geometry::curve::ChainParts;
use crate::geometry::{SegmentChain, Step};
use crate::math::{Point2, Tolerance, Vector2};

/// A stored point that can be dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Handle {
    Start,
    Through(usize),
    To(usize),
    /// Midpoint of the line step at this index.
    Midpoint(usize),
}

/// Drags the point of a chain nearest to a pick position.
///
/// Every vertex and arc-through point is a candidate, and so is the middle
/// of every line segment. When a middle wins, a new point is inserted there
/// (an arc-through point when `insert_arc` is set) and moved; otherwise the
/// existing point is moved. A ring's start and closing vertex move together.
#[derive(Debug)]
pub(crate) struct Stretch<'a, C: SegmentChain + ?Sized> {
    chain: &'a C,
    vector: Vector2,
    pick: Point2,
    insert_arc: bool,
}

impl<'a, C: SegmentChain + ?Sized> Stretch<'a, C> {
    pub(crate) fn new(chain: &'a C, vector: Vector2, pick: Point2, insert_arc: bool) -> Self {
        Self {
            chain,
            vector,
            pick,
            insert_arc,
        }
    }

    pub(crate) fn execute(&self, tol: Tolerance) -> ChainParts {
        let mut parts = ChainParts::of(self.chain);
        let Some(handle) = self.nearest_handle(tol) else {
            return parts;
        };
        let v = self.vector;
        let closed = self.chain.is_closed();
        tracing::debug!(handle = ?handle, "stretching chain");

        match handle {
            Handle::Start => {
                parts.start += v;
                if closed {
                    let start = parts.start;
                    if let Some(last) = parts.steps.last_mut() {
                        last.set_to(start);
                    }
                }
            }
            Handle::To(k) => {
                let moved = parts.steps[k].to() + v;
                parts.steps[k].set_to(moved);
            }
            Handle::Through(k) => {
                if let Step::Arc { through, .. } = &mut parts.steps[k] {
                    *through += v;
                }
            }
            Handle::Midpoint(k) => {
                let from = if k == 0 { parts.start } else { parts.steps[k - 1].to() };
                let to = parts.steps[k].to();
                let inserted = nalgebra::center(&from, &to) + v;
                if self.insert_arc {
                    parts.steps[k] = Step::Arc { through: inserted, to };
                } else {
                    parts.steps[k] = Step::Line { to: inserted };
                    parts.steps.insert(k + 1, Step::Line { to });
                }
            }
        }
        parts
    }

    /// Existing points win ties against segment middles.
    fn nearest_handle(&self, tol: Tolerance) -> Option<Handle> {
        let steps = self.chain.steps();
        let last = steps.len().checked_sub(1)?;
        let closed = self.chain.is_closed();
        let d = |q: &Point2| (self.pick - q).norm();

        let mut best = (Handle::Start, d(&self.chain.start()));
        let mut consider = |handle: Handle, q: &Point2| {
            let dist = d(q);
            if dist < best.1 {
                best = (handle, dist);
            }
        };
        for (k, step) in steps.iter().enumerate() {
            if let Some(through) = step.through() {
                consider(Handle::Through(k), &through);
            }
            if !(closed && k == last) {
                consider(Handle::To(k), &step.to());
            }
        }
        let vertex = best;

        let mut middle: Option<(Handle, f64)> = None;
        for (k, seg) in self.chain.segments().enumerate() {
            if seg.is_arc() {
                continue;
            }
            let dist = d(&seg.midpoint(tol));
            if middle.map_or(true, |(_, m)| dist < m) {
                middle = Some((Handle::Midpoint(k), dist));
            }
        }
        match middle {
            Some((handle, dist)) if dist < vertex.1 => Some(handle),
            _ => Some(vertex.0),
        }
    }
}
