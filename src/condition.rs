//! Rotates, normalizes, and centers a problem before solving.

use crate::geometry::{Rotation2, Tolerance};
use crate::state::WorkingState;

/// Outcome of conditioning a problem into a [`WorkingState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOutcome {
    Ok,
    Infeasible,
    DegenerateObjective,
}

/// Rotates the objective to `(0, 1)`, normalizes every constraint, drops trivially-true
/// constraints, detects trivially-false ones, and centers the system for numerical
/// conditioning. Writes the conditioned constraints into `state`.
#[allow(clippy::too_many_arguments)]
pub fn condition(
    state: &mut WorkingState,
    cx: f64,
    cy: f64,
    gx: &[f64],
    gy: &[f64],
    h: &[f64],
    n: usize,
    tol: &Tolerance,
) -> ConditionOutcome {
    let rotation = match Rotation2::from_gradient(cx, cy) {
        Some(r) => r,
        None => return ConditionOutcome::DegenerateObjective,
    };

    let mut a11 = 0.0f64;
    let mut a12 = 0.0f64;
    let mut a22 = 0.0f64;
    let mut b1 = 0.0f64;
    let mut b2 = 0.0f64;

    let mut count = 0usize;
    for i in 0..n {
        let (rgx, rgy) = rotation.apply(gx[i], gy[i]);
        if tol.eq(rgx, 0.0) && tol.eq(rgy, 0.0) {
            if h[i] <= 0.0 || tol.eq(h[i], 0.0) {
                continue; // trivially true
            }
            return ConditionOutcome::Infeasible;
        }
        let scale = rgx.abs().max(rgy.abs());
        let (ngx, ngy, nh) = (rgx / scale, rgy / scale, h[i] / scale);

        state.gx[count] = ngx;
        state.gy[count] = ngy;
        state.h[count] = nh;
        count += 1;

        a11 += ngx * ngx;
        a12 += ngx * ngy;
        a22 += ngy * ngy;
        b1 += ngx * nh;
        b2 += ngy * nh;
    }

    let det = a11 * a22 - a12 * a12;
    let offset = if tol.eq(det, 0.0) {
        (0.0, 0.0)
    } else {
        ((a22 * b1 - a12 * b2) / det, (a11 * b2 - a12 * b1) / det)
    };

    for i in 0..count {
        state.h[i] -= state.gx[i] * offset.0 + state.gy[i] * offset.1;
    }

    state.n = count;
    state.rotation = rotation;
    state.offset = offset;

    ConditionOutcome::Ok
}
