use crate::geometry::Step;
use crate::math::polygon_2d::turn_angle;
use crate::math::{Point2, Tolerance};

/// Removes redundant points from a step list in place.
///
/// Coincident consecutive points go first: a zero-length line disappears,
/// an arc that returns to its own start disappears together with its
/// through-point, and an arc whose through-point sits on one of its ends
/// becomes a line. Then vertices joining two collinear lines are removed.
/// Arc-through points are never removed for collinearity.
///
/// An open chain keeps at least one step and a closed one at least three.
/// Returns the number of removed points.
pub(crate) fn squeeze(
    start: &mut Point2,
    steps: &mut Vec<Step>,
    closed: bool,
    tol: Tolerance,
) -> usize {
    let min = if closed { 3 } else { 1 };
    let mut removed = drop_coincident(*start, steps, min, tol);
    if closed {
        if let Some(last) = steps.last_mut() {
            last.set_to(*start);
        }
    }
    loop {
        let pass = drop_collinear(start, steps, closed, min, tol);
        if pass == 0 {
            break;
        }
        removed += pass;
    }
    if removed > 0 {
        tracing::debug!(removed, remaining = steps.len(), "squeezed chain");
    }
    removed
}

/// Drops zero-length steps while at least `min` steps would remain.
fn drop_coincident(start: Point2, steps: &mut Vec<Step>, min: usize, tol: Tolerance) -> usize {
    let mut removed = 0;
    let mut from = start;
    let total = steps.len();
    let mut kept = Vec::with_capacity(total);
    for (i, step) in steps.drain(..).enumerate() {
        let can_drop = kept.len() + (total - i - 1) >= min;
        match step {
            Step::Line { to } => {
                if can_drop && tol.points_eq(&from, &to) {
                    removed += 1;
                    continue;
                }
                kept.push(step);
            }
            Step::Arc { through, to } => {
                if tol.points_eq(&from, &to) {
                    if can_drop {
                        removed += 2;
                        continue;
                    }
                    kept.push(step);
                } else if tol.points_eq(&through, &from) || tol.points_eq(&through, &to) {
                    removed += 1;
                    kept.push(Step::Line { to });
                } else {
                    kept.push(step);
                }
            }
        }
        from = step.to();
    }
    *steps = kept;
    removed
}

/// One pass over the line–line vertices. Returns how many were removed.
fn drop_collinear(
    start: &mut Point2,
    steps: &mut Vec<Step>,
    closed: bool,
    min: usize,
    tol: Tolerance,
) -> usize {
    let straight = |a: &Point2, b: &Point2, c: &Point2| turn_angle(a, b, c).abs() < tol.epsilon();
    let mut removed = 0;

    // Interior vertex k joins steps[k] and steps[k + 1].
    let mut k = 0;
    while k + 1 < steps.len() && steps.len() > min {
        let prev = if k == 0 { *start } else { steps[k - 1].to() };
        match (steps[k], steps[k + 1]) {
            (Step::Line { to: mid }, Step::Line { to: next }) if straight(&prev, &mid, &next) => {
                steps.remove(k);
                removed += 1;
            }
            _ => k += 1,
        }
    }

    // The start of a ring joins the closing step and the first one.
    let n = steps.len();
    if closed && n > min {
        if let (Step::Line { .. }, Step::Line { to: next }) = (steps[n - 1], steps[0]) {
            if straight(&steps[n - 2].to(), start, &next) {
                steps.remove(0);
                *start = next;
                if let Some(last) = steps.last_mut() {
                    last.set_to(next);
                }
                removed += 1;
            }
        }
    }
    removed
}
