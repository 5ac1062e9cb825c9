//! Derivative-free minimization of black-box scalar functions with the
//! Nelder-Mead simplex method.
//!
//! The objective may be expensive and may be undefined in parts of the
//! parameter space. It reports that by returning `None`, see
//! [`objective::Objective`]. Such points are simply avoided while the simplex
//! moves; only a simplex that cannot be built or shrunk stops the search with
//! an [`Error`].
//!
//! [`vector::Simplex`] exposes the single iteration step for callers that own
//! their loop, [`vector::NelderMead`] runs the loop until the simplex is small
//! enough.

pub mod error;
pub mod minimizer;
pub mod objective;
pub mod vector;

pub use crate::error::{Error, Result};
