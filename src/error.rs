use derive_more::{Display, Error};

/// Failure modes of the setup path (working-state acquisition).
///
/// The hot path (`solve` given an already-placed working state) never returns this type;
/// it reports failure through [`crate::Status::Error`] instead.
#[derive(Debug, Display, Error, PartialEq)]
pub enum SolverError {
    #[display("failed to reserve working-state storage")]
    AllocationFailed,
}
