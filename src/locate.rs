//! Decides, for a probe `x`, whether the optimum lies left, right, here, or is infeasible.

use crate::geometry::Tolerance;
use crate::state::WorkingState;

/// Result of tracking the envelope extremum (min over ceilings, max over floors) at a probe x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extremum {
    pub y: f64,
    pub min_dx: f64,
    pub max_dx: f64,
    pub valid: bool,
}

/// Tracks the envelope extremum of the lines indexed by `idcs` at `x`.
///
/// `want_min` selects the ceiling envelope (pointwise minimum); otherwise the floor envelope
/// (pointwise maximum) is tracked.
pub(crate) fn extremum(
    dx: &[f64],
    y0: &[f64],
    idcs: &[usize],
    x: f64,
    want_min: bool,
    tol: &Tolerance,
) -> Extremum {
    let mut best_y = if want_min { f64::INFINITY } else { f64::NEG_INFINITY };
    let mut min_dx = f64::INFINITY;
    let mut max_dx = f64::NEG_INFINITY;
    let mut valid = false;

    for &j in idcs {
        let y = y0[j] + dx[j] * x;
        if valid && tol.eq(y, best_y) {
            min_dx = min_dx.min(dx[j]);
            max_dx = max_dx.max(dx[j]);
        } else if !valid || (want_min && y < best_y) || (!want_min && y > best_y) {
            best_y = y;
            min_dx = dx[j];
            max_dx = dx[j];
            valid = true;
        }
    }

    Extremum {
        y: best_y,
        min_dx,
        max_dx,
        valid,
    }
}

/// Outcome of probing the optimum predicate at a given x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Infeasible,
    Left,
    Right,
    Here(f64),
    HereEdge,
}

/// Decides the optimum's location relative to probe `x`, given the current ceiling/floor
/// index lists in `state`.
pub fn locate(state: &WorkingState, x: f64, tol: &Tolerance) -> Verdict {
    let ceil = extremum(
        state.dx,
        state.y0,
        &state.ceil[..state.ceil_len],
        x,
        true,
        tol,
    );
    let floor = extremum(
        state.dx,
        state.y0,
        &state.floor[..state.floor_len],
        x,
        false,
        tol,
    );

    if ceil.valid && ceil.y < floor.y && !tol.eq(ceil.y, floor.y) {
        return if floor.min_dx > ceil.max_dx {
            Verdict::Left
        } else if floor.max_dx < ceil.min_dx {
            Verdict::Right
        } else {
            Verdict::Infeasible
        };
    }

    let floor_min_zero = tol.eq(floor.min_dx, 0.0);
    let floor_max_zero = tol.eq(floor.max_dx, 0.0);

    if floor_min_zero && !floor_max_zero {
        Verdict::Left
    } else if floor_max_zero && !floor_min_zero {
        Verdict::Right
    } else if floor_min_zero && floor_max_zero {
        Verdict::HereEdge
    } else if floor.min_dx < 0.0 && floor.max_dx > 0.0 {
        Verdict::Here(floor.y)
    } else if floor.min_dx > 0.0 {
        Verdict::Left
    } else {
        Verdict::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremum_tracks_min_over_ceiling() {
        let dx = [1.0, -1.0, 0.5];
        let y0 = [0.0, 0.0, -2.0];
        let idcs = [0usize, 1, 2];
        let tol = Tolerance::default();
        let e = extremum(&dx, &y0, &idcs, 0.0, true, &tol);
        assert!(e.valid);
        assert_eq!(e.y, -2.0);
    }

    #[test]
    fn extremum_empty_is_invalid() {
        let tol = Tolerance::default();
        let e = extremum(&[], &[], &[], 0.0, true, &tol);
        assert!(!e.valid);
    }

    #[test]
    fn locate_v_vertex_is_here() {
        // floor: y >= x (dx=1) and y >= -x (dx=-1); min at x=0 is V-vertex.
        let dx = [1.0, -1.0];
        let y0 = [0.0, 0.0];
        let mut storage = vec![0u8; crate::state::mem_size(4)];
        let mut ws = WorkingState::init(4, &mut storage).unwrap();
        ws.dx[..2].copy_from_slice(&dx);
        ws.y0[..2].copy_from_slice(&y0);
        ws.floor[0] = 0;
        ws.floor[1] = 1;
        ws.floor_len = 2;
        let tol = Tolerance::default();
        assert_eq!(locate(&ws, 0.0, &tol), Verdict::Here(0.0));
    }

    #[test]
    fn locate_flat_floor_is_here_edge() {
        let dx = [0.0];
        let y0 = [1.0];
        let mut storage = vec![0u8; crate::state::mem_size(4)];
        let mut ws = WorkingState::init(4, &mut storage).unwrap();
        ws.dx[..1].copy_from_slice(&dx);
        ws.y0[..1].copy_from_slice(&y0);
        ws.floor[0] = 0;
        ws.floor_len = 1;
        let tol = Tolerance::default();
        assert_eq!(locate(&ws, 0.0, &tol), Verdict::HereEdge);
    }
}
