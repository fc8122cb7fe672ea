//! Public procedural surface: size the scratch area, place it, and run a solve.

use problemo::ProblemResult;
use problemo::common::IntoCommonProblem;

use crate::categorize::categorize;
use crate::condition::{condition, ConditionOutcome};
use crate::engine::{run, EngineOutcome};
use crate::error::SolverError;
use crate::finalize::{back_transform, reconstruct_edge, reconstruct_end_of_loop, Finalized};
use crate::geometry::Tolerance;
use crate::state::WorkingState;
use crate::{Solution, Status};

/// Bytes of storage required for a working state able to hold `capacity` constraints.
pub fn mem_size(capacity: usize) -> usize {
    crate::state::mem_size(capacity)
}

/// Places a working state inside caller-provided `storage`. `None` means the storage is
/// unavailable (too small, or `capacity` is zero).
pub fn init(capacity: usize, storage: &mut [u8]) -> Option<WorkingState<'_>> {
    WorkingState::init(capacity, storage)
}

/// The configured capacity of a placed working state.
pub fn capacity(state: &WorkingState) -> usize {
    state.capacity()
}

/// Runs one 2D LP solve using the caller-supplied `state`, with the default [`Tolerance`].
///
/// Preconditions: `gx.len() == gy.len() == h.len() == n` and `n <= state.capacity()`.
pub fn solve(
    state: &mut WorkingState,
    cx: f64,
    cy: f64,
    gx: &[f64],
    gy: &[f64],
    h: &[f64],
    n: usize,
) -> Solution {
    solve_with_tolerance(state, cx, cy, gx, gy, h, n, &Tolerance::default())
}

/// As [`solve`], but with an explicit [`Tolerance`] instead of the default.
pub fn solve_with_tolerance(
    state: &mut WorkingState,
    cx: f64,
    cy: f64,
    gx: &[f64],
    gy: &[f64],
    h: &[f64],
    n: usize,
    tol: &Tolerance,
) -> Solution {
    state.reset();

    if n > state.capacity() || gx.len() != n || gy.len() != n || h.len() != n {
        return Solution::error();
    }

    match condition(state, cx, cy, gx, gy, h, n, tol) {
        ConditionOutcome::DegenerateObjective => return Solution::error(),
        ConditionOutcome::Infeasible => return Solution::from_finalized(Finalized::Infeasible),
        ConditionOutcome::Ok => {}
    }

    if !categorize(state, tol) {
        return Solution::from_finalized(Finalized::Infeasible);
    }

    let finalized = match run(state, tol) {
        EngineOutcome::Infeasible => Finalized::Infeasible,
        EngineOutcome::Point(x, y) => Finalized::Point(x, y),
        EngineOutcome::EdgeAt(x) => reconstruct_edge(state, x, tol),
        EngineOutcome::EndOfLoop => reconstruct_end_of_loop(state, tol),
    };

    Solution::from_finalized(back_transform(state, finalized))
}

/// Convenience wrapper: acquires a working state of exactly the needed capacity, runs one
/// solve, and releases it. Uses the default [`Tolerance`].
pub fn solve_simple(cx: f64, cy: f64, gx: &[f64], gy: &[f64], h: &[f64], n: usize) -> Solution {
    match solve_simple_with_tolerance(cx, cy, gx, gy, h, n, &Tolerance::default()) {
        Ok(solution) => solution,
        Err(_) => Solution::error(),
    }
}

/// As [`solve_simple`], but with an explicit [`Tolerance`].
pub fn solve_simple_with_tolerance(
    cx: f64,
    cy: f64,
    gx: &[f64],
    gy: &[f64],
    h: &[f64],
    n: usize,
    tol: &Tolerance,
) -> ProblemResult<Solution> {
    let size = mem_size(n.max(1));
    let mut storage: Vec<u8> = Vec::new();
    storage
        .try_reserve_exact(size)
        .via(SolverError::AllocationFailed)?;
    storage.resize(size, 0u8);

    let mut state = init(n.max(1), &mut storage)
        .ok_or_else(|| "working-state storage unavailable".gloss())?;

    Ok(solve_with_tolerance(&mut state, cx, cy, gx, gy, h, n, tol))
}

impl Solution {
    fn error() -> Self {
        Solution {
            status: Status::Error,
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
        }
    }

    fn from_finalized(finalized: Finalized) -> Self {
        match finalized {
            Finalized::Infeasible => Solution {
                status: Status::Infeasible,
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: 0.0,
            },
            Finalized::Unbounded => Solution {
                status: Status::Unbounded,
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: 0.0,
            },
            Finalized::Point(x, y) => Solution {
                status: Status::Point,
                x1: x,
                y1: y,
                x2: 0.0,
                y2: 0.0,
            },
            Finalized::Edge(x1, y1, x2, y2) => Solution {
                status: Status::Edge,
                x1,
                y1,
                x2,
                y2,
            },
        }
    }
}
