//! This module provides the return type shared by the drivers of this crate.
use ndarray::prelude::*;
use std::time::Duration;

/// Minimizer states at the end of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The simplex size dropped to the requested tolerance.
    Converged,
    /// The iteration limit was reached first.
    IterationLimit,
}

/// A minimization result, storing various details of the run and the final results.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimResult {
    /// The runtime of the minimization according to the system clock.
    pub runtime: Duration,
    /// The number of function evaluations performed during the run, infeasible ones included.
    pub f_evals: usize,
    /// The number of iterations run.
    pub iterations: usize,
    /// The parameter values of the best corner.
    pub minimum: Array1<f64>,
    /// The function value at the found minimum.
    pub minimum_value: f64,
    /// The simplex size when the run stopped.
    pub size: f64,
    /// Why the run stopped.
    pub status: RunStatus,
}

impl OptimResult {
    pub fn converged(&self) -> bool {
        self.status == RunStatus::Converged
    }
}
