//! Errors raised by the simplex minimizer.
//!
//! Only conditions that leave the search without a fully valued simplex are
//! errors. An infeasible trial point during an iteration is an ordinary
//! outcome and never shows up here.
use thiserror::Error;

/// Errors that abort a minimization run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("starting point has no coordinates")]
    EmptyStartingPoint,

    #[error("step vector has {found} entries but the starting point has {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("objective is infeasible at initial simplex corner {corner}")]
    InfeasibleInitialSimplex { corner: usize },

    #[error("cannot shrink simplex: objective is infeasible at corner {corner}")]
    InfeasibleShrink { corner: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
