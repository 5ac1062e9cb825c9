//! A driver that runs [`Simplex`] iterations until the simplex is small enough.
//!
//! The simplex size, i.e. the mean distance from its centroid to the corners,
//! is the only convergence measure. Function values are not compared between
//! iterations, since an expensive objective with plateaus can stall them long
//! before the corners come together.
//!
//! # Examples
//!
//! ```
//! # use ndarray::prelude::*;
//! # use simplex_optimize::minimizer::RunStatus;
//! # use simplex_optimize::vector::NelderMeadBuilder;
//! let function = |x: ArrayView1<f64>| {
//!     Some(10.0 * (x[0] - 1.0).powi(2) + 20.0 * (x[1] - 2.0).powi(2) + 30.0)
//! };
//! let minimizer = NelderMeadBuilder::default()
//!     .tolerance(1e-6)
//!     .build()
//!     .unwrap();
//! let res = minimizer
//!     .minimize(function, arr1(&[5.0, 7.0]).view(), arr1(&[1.0, 1.0]).view())
//!     .unwrap();
//! assert_eq!(res.status, RunStatus::Converged);
//! assert!((res.minimum_value - 30.0).abs() < 1e-6);
//! ```

use std::time::Instant;

use derive_builder::Builder;
use ndarray::prelude::*;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::minimizer::{OptimResult, RunStatus};
use crate::objective::Objective;
use crate::vector::Simplex;

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
/// Minimizes a scalar function of one or more variables with the Nelder-Mead simplex method.
pub struct NelderMead {
    /// The simplex size below which the search counts as converged.
    #[builder(default = "1e-3")]
    pub tolerance: f64,

    /// The maximum number of iterations. Defaults to n*200 where n is the number of parameters
    /// to optimize.
    #[builder(setter(strip_option), default)]
    pub max_iter: Option<usize>,
}

impl NelderMeadBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match self.tolerance {
            Some(t) if !(t.is_finite() && t > 0.0) => {
                Err(format!("tolerance must be positive and finite, got {}", t))
            }
            _ => Ok(()),
        }
    }
}

impl NelderMead {
    /// Search for the value minimizing `func`, starting from a simplex spanned by `p0`
    /// and one step of `lambda[i]` along every axis `i`.
    pub fn minimize<F>(&self, func: F, p0: ArrayView1<f64>, lambda: ArrayView1<f64>) -> Result<OptimResult>
    where
        F: Objective,
    {
        let mut simplex = Simplex::new(func, p0, lambda)?;
        self.run(&mut simplex)
    }

    /// Iterate an existing simplex until its size drops to the tolerance or the
    /// iteration limit is hit.
    pub fn run<F: Objective>(&self, simplex: &mut Simplex<F>) -> Result<OptimResult> {
        let start = Instant::now();
        let evaluations = simplex.evaluations();
        let max_iter = self.max_iter.unwrap_or(200 * simplex.dimension());

        let mut iterations = 0;
        let mut size = simplex.size();
        let status = loop {
            if size <= self.tolerance {
                break RunStatus::Converged;
            }
            if iterations >= max_iter {
                break RunStatus::IterationLimit;
            }
            let step = simplex.iterate()?;
            iterations += 1;
            size = simplex.size();
            debug!(
                iteration = iterations,
                ?step,
                min_pos = %simplex.best_coordinate(),
                value = simplex.best(),
                size,
                "simplex iteration"
            );
        };

        match status {
            RunStatus::Converged => info!(iterations, value = simplex.best(), size, "simplex converged"),
            RunStatus::IterationLimit => warn!(iterations, size, "convergence not achieved"),
        }

        Ok(OptimResult {
            runtime: start.elapsed(),
            f_evals: simplex.evaluations() - evaluations,
            iterations,
            minimum: simplex.best_coordinate().to_owned(),
            minimum_value: simplex.best(),
            size,
            status,
        })
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::Error;
    use float_cmp::ApproxEq;

    #[test]
    fn simplex() {
        let function = |x: ArrayView1<f64>| {
            Some((1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2))
        };
        let minimizer = NelderMeadBuilder::default()
            .tolerance(1e-6)
            .max_iter(1000)
            .build()
            .unwrap();
        let res = minimizer
            .minimize(function, arr1(&[-1.2, 1.0]).view(), arr1(&[0.5, 0.5]).view())
            .unwrap();
        println!("res: {:?}", res);
        assert_eq!(res.status, RunStatus::Converged);
        assert!(res.minimum[0].approx_eq(1.0, (1e-4, 10)));
        assert!(res.minimum[1].approx_eq(1.0, (1e-4, 10)));
        assert!(res.size <= 1e-6);
    }

    #[test]
    fn defaults() {
        let minimizer = NelderMeadBuilder::default().build().unwrap();
        assert_eq!(minimizer.tolerance, 1e-3);
        assert_eq!(minimizer.max_iter, None);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert!(NelderMeadBuilder::default().tolerance(0.0).build().is_err());
        assert!(NelderMeadBuilder::default().tolerance(f64::NAN).build().is_err());
        assert!(NelderMeadBuilder::default().tolerance(-1e-3).build().is_err());
    }

    #[test]
    fn iteration_limit() {
        let function = |x: ArrayView1<f64>| Some(x.dot(&x));
        let minimizer = NelderMeadBuilder::default().max_iter(3).build().unwrap();
        let res = minimizer
            .minimize(function, arr1(&[10.0, -10.0]).view(), arr1(&[1.0, 1.0]).view())
            .unwrap();
        assert_eq!(res.status, RunStatus::IterationLimit);
        assert_eq!(res.iterations, 3);
        assert!(res.size > 1e-3);
    }

    #[test]
    fn already_converged() {
        let function = |x: ArrayView1<f64>| Some(x.sum());
        let minimizer = NelderMeadBuilder::default().tolerance(1.0).build().unwrap();
        let res = minimizer
            .minimize(function, arr1(&[0.0, 0.0]).view(), arr1(&[0.1, 0.1]).view())
            .unwrap();
        assert_eq!(res.status, RunStatus::Converged);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.f_evals, 0);
    }

    #[test]
    fn fatal_construction() {
        let minimizer = NelderMeadBuilder::default().build().unwrap();
        let res = minimizer.minimize(
            |_: ArrayView1<f64>| -> Option<f64> { None },
            arr1(&[0.0]).view(),
            arr1(&[1.0]).view(),
        );
        assert_eq!(res, Err(Error::InfeasibleInitialSimplex { corner: 0 }));
    }

    #[test]
    fn counts_evaluations_of_the_run() {
        let function = |x: ArrayView1<f64>| Some((x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2));
        let mut simplex = Simplex::new(function, arr1(&[0.0, 0.0]).view(), arr1(&[1.0, 1.0]).view()).unwrap();
        let res = NelderMeadBuilder::default().build().unwrap().run(&mut simplex).unwrap();
        assert_eq!(res.status, RunStatus::Converged);
        assert_eq!(res.f_evals + 3, simplex.evaluations());
        assert_eq!(res.minimum.view(), simplex.best_coordinate());
    }
}
