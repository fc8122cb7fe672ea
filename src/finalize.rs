//! Reconstructs the point/edge result once the prune-and-search loop settles, and
//! back-transforms it into the caller's coordinate system.

use crate::geometry::{LineRelation, Tolerance, intersect};
use crate::state::WorkingState;

/// The finalized result, still in the rotated/centered coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finalized {
    Infeasible,
    Unbounded,
    Point(f64, f64),
    Edge(f64, f64, f64, f64),
}

/// Reconstructs the result when the engine found a flat floor segment at probe `x`.
pub fn reconstruct_edge(state: &WorkingState, _x: f64, tol: &Tolerance) -> Finalized {
    let mut j = None;
    let mut best_y0 = f64::NEG_INFINITY;
    for &k in &state.floor[..state.floor_len] {
        if tol.eq(state.dx[k], 0.0) && state.y0[k] > best_y0 {
            best_y0 = state.y0[k];
            j = Some(k);
        }
    }
    let j = match j {
        Some(j) => j,
        None => return Finalized::Unbounded,
    };

    let mut x0 = state.x0;
    let mut x1 = state.x1;

    for &k in state.ceil[..state.ceil_len]
        .iter()
        .chain(state.floor[..state.floor_len].iter())
    {
        if k == j {
            continue;
        }
        let is_ceil_k = state.gy[k] < 0.0;
        let rel = intersect(
            state.gx[k], state.gy[k], state.h[k], state.gx[j], state.gy[j], state.h[j], tol,
        );
        if let LineRelation::Point(xi, _) = rel {
            let tightens_x0 = if is_ceil_k {
                state.dx[k] > 0.0
            } else {
                state.dx[k] < 0.0
            };
            if tightens_x0 {
                x0 = x0.max(xi);
            } else {
                x1 = x1.min(xi);
            }
        }
    }

    if tol.eq(x0, x1) {
        Finalized::Point(x0, state.y0[j])
    } else {
        Finalized::Edge(x0, state.y0[j], x1, state.y0[j])
    }
}

/// Reconstructs the result once at most one floor and one ceiling constraint remain.
pub fn reconstruct_end_of_loop(state: &WorkingState, tol: &Tolerance) -> Finalized {
    let if0 = match state.floor[..state.floor_len].first().copied() {
        Some(j) => j,
        None => return Finalized::Unbounded,
    };

    let mut x0 = state.x0;
    let mut x1 = state.x1;

    if let Some(&ic0) = state.ceil[..state.ceil_len].first() {
        let rel = intersect(
            state.gx[ic0],
            state.gy[ic0],
            state.h[ic0],
            state.gx[if0],
            state.gy[if0],
            state.h[if0],
            tol,
        );
        match rel {
            LineRelation::Point(ix, _) => {
                if state.dx[if0] > state.dx[ic0] {
                    x1 = x1.min(ix);
                } else {
                    x0 = x0.max(ix);
                }
            }
            LineRelation::Parallel => {
                if state.y0[if0] > state.y0[ic0] && !tol.eq(state.y0[if0], state.y0[ic0]) {
                    return Finalized::Infeasible;
                }
            }
        }
    }

    let ry0 = state.y0[if0] + x0 * state.dx[if0];
    let ry1 = state.y0[if0] + x1 * state.dx[if0];

    if tol.eq(state.dx[if0], 0.0) {
        if x0.is_finite() && x1.is_finite() {
            Finalized::Edge(x0, ry0, x1, ry1)
        } else {
            Finalized::Unbounded
        }
    } else if state.dx[if0] > 0.0 {
        if x0.is_finite() {
            Finalized::Point(x0, ry0)
        } else {
            Finalized::Unbounded
        }
    } else if x1.is_finite() {
        Finalized::Point(x1, ry1)
    } else {
        Finalized::Unbounded
    }
}

/// Back-transforms a finalized result into the caller's original coordinate system by
/// undoing the conditioner's translation and rotation.
pub fn back_transform(state: &WorkingState, finalized: Finalized) -> Finalized {
    let untranslate = |x: f64, y: f64| (x + state.offset.0, y + state.offset.1);
    let unrotate = |x: f64, y: f64| state.rotation.transpose_apply(x, y);
    let back = |x: f64, y: f64| {
        let (tx, ty) = untranslate(x, y);
        unrotate(tx, ty)
    };

    match finalized {
        Finalized::Point(x, y) => {
            let (bx, by) = back(x, y);
            Finalized::Point(bx, by)
        }
        Finalized::Edge(x1, y1, x2, y2) => {
            let (bx1, by1) = back(x1, y1);
            let (bx2, by2) = back(x2, y2);
            Finalized::Edge(bx1, by1, bx2, by2)
        }
        other => other,
    }
}
