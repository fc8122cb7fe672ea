//! Splits conditioned constraints into vertical bounds, ceilings, and floors.

use crate::geometry::Tolerance;
use crate::state::WorkingState;

/// Categorizes the conditioned constraints in `state` (`state.gx/gy/h[0..state.n]`) into
/// vertical x-bounds (folded directly into `state.x0`/`state.x1`) and `ceil`/`floor` index
/// lists with precomputed `dx`/`y0`.
///
/// Returns `true` iff the resulting x-interval is non-empty (`x0 <= x1`); `false` means the
/// problem is infeasible.
pub fn categorize(state: &mut WorkingState, tol: &Tolerance) -> bool {
    let mut ceil_len = 0usize;
    let mut floor_len = 0usize;

    for i in 0..state.n {
        let g_x = state.gx[i];
        let g_y = state.gy[i];
        let hi = state.h[i];

        if tol.eq(g_y, 0.0) {
            if g_x > 0.0 {
                state.x0 = state.x0.max(hi / g_x);
            } else if g_x < 0.0 {
                state.x1 = state.x1.min(hi / g_x);
            }
            // g_x == 0 as well would have been caught as trivially-true/false during conditioning.
            continue;
        }

        if g_y < 0.0 {
            state.ceil[ceil_len] = i;
            ceil_len += 1;
        } else {
            state.floor[floor_len] = i;
            floor_len += 1;
        }
    }

    for &j in state.ceil[..ceil_len].iter().chain(state.floor[..floor_len].iter()) {
        state.dx[j] = -state.gx[j] / state.gy[j];
        state.y0[j] = state.h[j] / state.gy[j];
    }

    state.ceil_len = ceil_len;
    state.floor_len = floor_len;

    state.x0 < state.x1 || tol.eq(state.x0, state.x1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::mem_size;

    fn built_state(
        gx: &[f64],
        gy: &[f64],
        h: &[f64],
    ) -> (Vec<u8>, usize) {
        let cap = gx.len().max(1);
        (vec![0u8; mem_size(cap)], cap)
    }

    #[test]
    fn categorize_splits_ceil_floor_and_vertical() {
        let gx = [1.0, -1.0, 0.0, 1.0];
        let gy = [0.0, 0.0, 1.0, -1.0];
        let h = [0.0, -5.0, -2.0, -3.0];
        let (mut storage, cap) = built_state(&gx, &gy, &h);
        let mut ws = WorkingState::init(cap, &mut storage).unwrap();
        ws.n = gx.len();
        ws.gx[..gx.len()].copy_from_slice(&gx);
        ws.gy[..gy.len()].copy_from_slice(&gy);
        ws.h[..h.len()].copy_from_slice(&h);

        let tol = Tolerance::default();
        let feasible = categorize(&mut ws, &tol);
        assert!(feasible);
        assert_eq!(ws.x0, 0.0);
        assert_eq!(ws.x1, 5.0);
        assert_eq!(ws.floor_len, 1);
        assert_eq!(ws.ceil_len, 1);
        assert_eq!(ws.floor[0], 2);
        assert_eq!(ws.ceil[0], 3);
    }

    #[test]
    fn categorize_detects_empty_vertical_strip() {
        let gx = [1.0, -1.0];
        let gy = [0.0, 0.0];
        let h = [5.0, -2.0]; // x >= 5 and x <= 2
        let (mut storage, cap) = built_state(&gx, &gy, &h);
        let mut ws = WorkingState::init(cap, &mut storage).unwrap();
        ws.n = gx.len();
        ws.gx[..gx.len()].copy_from_slice(&gx);
        ws.gy[..gy.len()].copy_from_slice(&gy);
        ws.h[..h.len()].copy_from_slice(&h);

        let tol = Tolerance::default();
        assert!(!categorize(&mut ws, &tol));
    }
}
