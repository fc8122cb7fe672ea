//! Megiddo's prune-and-search main loop.

use crate::geometry::{LineRelation, Tolerance, intersect};
use crate::locate::{Verdict, locate};
use crate::state::WorkingState;

/// Outcome of running the prune-and-search loop to completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineOutcome {
    Infeasible,
    Point(f64, f64),
    /// The optimum lies along the flat floor segment found at this probe x.
    EdgeAt(f64),
    /// At most one ceiling and one floor constraint remain; hand off to the finalizer.
    EndOfLoop,
}

/// Runs the main prune-and-search loop over `state`, eliminating constraints until either
/// an immediate verdict is reached or at most one floor and one ceiling remain.
pub fn run(state: &mut WorkingState, tol: &Tolerance) -> EngineOutcome {
    let mut optimum_is_left = false;
    let mut has_median = false;

    loop {
        if !(state.x0 < state.x1 || tol.eq(state.x0, state.x1)) {
            return EngineOutcome::Infeasible;
        }
        if state.floor_len == 0 {
            return EngineOutcome::EndOfLoop;
        }
        if state.floor_len <= 1 && state.ceil_len <= 1 {
            return EngineOutcome::EndOfLoop;
        }

        state.x_intersect_len = 0;

        prune_list(state, true, tol, has_median, optimum_is_left);
        prune_list(state, false, tol, has_median, optimum_is_left);

        if state.x_intersect_len == 0 {
            continue;
        }

        let x = crate::selection::median(&mut state.x_intersect[..state.x_intersect_len]);

        match locate(state, x, tol) {
            Verdict::Infeasible => return EngineOutcome::Infeasible,
            Verdict::Left => {
                state.x1 = state.x1.min(x);
                optimum_is_left = true;
                has_median = true;
            }
            Verdict::Right => {
                state.x0 = state.x0.max(x);
                optimum_is_left = false;
                has_median = true;
            }
            Verdict::Here(y) => return EngineOutcome::Point(x, y),
            Verdict::HereEdge => return EngineOutcome::EdgeAt(x),
        }
    }
}

/// Rebuilds `state.ceil`/`state.floor` (selected by `is_ceil`) by pairing up constraints,
/// computing their intersections, and either eliminating one member of the pair or keeping
/// both for further consideration. Appends surviving pair intersections to `x_intersect`.
fn prune_list(
    state: &mut WorkingState,
    is_ceil: bool,
    tol: &Tolerance,
    has_median: bool,
    optimum_is_left: bool,
) {
    let n = if is_ceil { state.ceil_len } else { state.floor_len };
    let idcs: Vec<usize> = if is_ceil {
        state.ceil[..n].to_vec()
    } else {
        state.floor[..n].to_vec()
    };

    let x0 = state.x0;
    let x1 = state.x1;

    let mut pair_tail = 0usize;
    let mut single_tail = n;

    let pairs = n / 2;
    for k in 0..pairs {
        let a = idcs[2 * k];
        let b = idcs[2 * k + 1];
        let rel = intersect(
            state.gx[a], state.gy[a], state.h[a], state.gx[b], state.gy[b], state.h[b], tol,
        );

        match rel {
            LineRelation::Parallel => {
                let surv = if state.h[a] >= state.h[b] { a } else { b };
                single_tail -= 1;
                state.tmp[single_tail] = surv;
            }
            LineRelation::Point(xi, _yi) => {
                let excludes_left = xi < x0 || (has_median && !optimum_is_left && tol.eq(xi, x0));
                let excludes_right = xi > x1 || (has_median && optimum_is_left && tol.eq(xi, x1));

                if excludes_left {
                    let sign = if is_ceil { -1.0 } else { 1.0 };
                    let surv = if sign * state.dx[a] >= sign * state.dx[b] { a } else { b };
                    single_tail -= 1;
                    state.tmp[single_tail] = surv;
                } else if excludes_right {
                    let sign = if is_ceil { 1.0 } else { -1.0 };
                    let surv = if sign * state.dx[a] >= sign * state.dx[b] { a } else { b };
                    single_tail -= 1;
                    state.tmp[single_tail] = surv;
                } else {
                    state.tmp[pair_tail] = a;
                    pair_tail += 1;
                    state.tmp[pair_tail] = b;
                    pair_tail += 1;
                    state.x_intersect[state.x_intersect_len] = xi;
                    state.x_intersect_len += 1;
                }
            }
        }
    }

    if n % 2 == 1 {
        single_tail -= 1;
        state.tmp[single_tail] = idcs[n - 1];
    }

    let new_len = pair_tail + (n - single_tail);
    for i in 0..pair_tail {
        let v = state.tmp[i];
        if is_ceil {
            state.ceil[i] = v;
        } else {
            state.floor[i] = v;
        }
    }
    for (i, src) in (single_tail..n).rev().enumerate() {
        let v = state.tmp[src];
        if is_ceil {
            state.ceil[pair_tail + i] = v;
        } else {
            state.floor[pair_tail + i] = v;
        }
    }
    if is_ceil {
        state.ceil_len = new_len;
    } else {
        state.floor_len = new_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::categorize;
    use crate::condition::condition;
    use crate::state::{mem_size, WorkingState};

    fn solve_point(
        cx: f64,
        cy: f64,
        gx: &[f64],
        gy: &[f64],
        h: &[f64],
    ) -> (EngineOutcome, WorkingState<'static>) {
        let cap = gx.len().max(1);
        let storage: &'static mut [u8] = Box::leak(vec![0u8; mem_size(cap)].into_boxed_slice());
        let mut ws = WorkingState::init(cap, storage).unwrap();
        let tol = Tolerance::default();
        assert_eq!(
            condition(&mut ws, cx, cy, gx, gy, h, gx.len(), &tol),
            crate::condition::ConditionOutcome::Ok
        );
        assert!(categorize(&mut ws, &tol));
        let outcome = run(&mut ws, &tol);
        (outcome, ws)
    }

    #[test]
    fn v_vertex_yields_point() {
        let (outcome, _) = solve_point(0.0, 1.0, &[1.0, -1.0], &[1.0, 1.0], &[0.0, 0.0]);
        assert_eq!(outcome, EngineOutcome::Point(0.0, 0.0));
    }

    #[test]
    fn horizontal_edge_is_recognized_as_edge_or_end_of_loop() {
        // A single horizontal floor and two vertical bounds: the optimum is the whole
        // segment y=1, x in [-2, 3]. Depending on pruning order this either resolves via a
        // `HereEdge` verdict mid-loop or falls out once only one floor constraint remains;
        // both are correct, so only the outcome shape is checked here (the exact numeric
        // result is cross-checked end-to-end in `src/tests/scenarios.rs`).
        let (outcome, _) = solve_point(
            0.0,
            1.0,
            &[0.0, 1.0, -1.0],
            &[1.0, 0.0, 0.0],
            &[1.0, -2.0, -3.0],
        );
        assert!(matches!(
            outcome,
            EngineOutcome::EdgeAt(_) | EngineOutcome::EndOfLoop
        ));
    }

    #[test]
    fn single_floor_reaches_end_of_loop() {
        let (outcome, _) = solve_point(0.0, 1.0, &[0.0], &[1.0], &[1.0]);
        assert_eq!(outcome, EngineOutcome::EndOfLoop);
    }
}
