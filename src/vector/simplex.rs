//! The simplex of the Nelder-Mead method and its single-step update.
//!
//! A [`Simplex`] holds n+1 corners in n-dimensional parameter space, each
//! with the objective value cached next to its coordinate. Every call to
//! [`Simplex::iterate`] replaces the worst corner by a better trial point, or
//! shrinks the whole simplex towards its best corner when no trial point
//! helps.
//!
//! The corners are only partially ordered: the best corner sits at index 0,
//! the worst at index n and the second worst at index n-1. Nothing is
//! promised about the corners in between.
//!
//! Trial points where the objective is infeasible are skipped, and the
//! decision tree falls through to the next move. Only construction and the
//! shrink step need every evaluation to succeed; they fail with an
//! [`Error`] otherwise.
//!
//! # Examples
//!
//! ```
//! # use ndarray::prelude::*;
//! # use simplex_optimize::vector::Simplex;
//! let f = |x: ArrayView1<f64>| Some((x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2));
//! let mut simplex = Simplex::new(f, arr1(&[0.0, 0.0]).view(), arr1(&[1.0, 1.0]).view()).unwrap();
//! while simplex.size() > 1e-6 {
//!     simplex.iterate().unwrap();
//! }
//! assert!((simplex.best_coordinate()[0] - 1.0).abs() < 1e-4);
//! assert!((simplex.best_coordinate()[1] + 2.0).abs() < 1e-4);
//! ```

use std::fmt;

use ndarray::prelude::*;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::objective::{Counted, Objective};

/// Trial point coefficient mirroring the worst corner through the centroid of the others.
const REFLECTION: f64 = -1.0;
/// Trial point coefficient stretching the reflection twice as far.
const EXPANSION: f64 = -2.0;
/// Trial point coefficient moving the worst corner halfway towards the centroid of the others.
const CONTRACTION: f64 = 0.5;

/// A vertex of the simplex together with the objective value at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    coordinate: Array1<f64>,
    value: f64,
}

impl Corner {
    pub fn coordinate(&self) -> ArrayView1<f64> {
        self.coordinate.view()
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// The move committed by one call of [`Simplex::iterate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The worst corner was replaced by the expanded point.
    Expansion,
    /// The worst corner was replaced by the reflected point.
    Reflection,
    /// The worst corner was replaced by the one-dimensional contraction point.
    Contraction,
    /// Every corner but the best moved halfway towards the best.
    Shrink,
}

pub struct Simplex<F: Objective> {
    func: Counted<F>,
    corners: Vec<Corner>,
}

impl<F: Objective> Simplex<F> {
    /// Builds the initial simplex around `p0`.
    ///
    /// Corner `i < n` is `p0` moved by `lambda[i]` along axis `i`, corner `n`
    /// is `p0` itself. The corners are evaluated in that order and the first
    /// infeasible one aborts the construction.
    pub fn new(func: F, p0: ArrayView1<f64>, lambda: ArrayView1<f64>) -> Result<Self> {
        let n = p0.len();
        if n == 0 {
            return Err(Error::EmptyStartingPoint);
        }
        if lambda.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: lambda.len(),
            });
        }

        let mut func = Counted::new(func);
        let mut corners = Vec::with_capacity(n + 1);
        for corner in 0..=n {
            let mut coordinate = p0.to_owned();
            if corner < n {
                coordinate[corner] += lambda[corner];
            }
            let value = func
                .call(coordinate.view())
                .ok_or(Error::InfeasibleInitialSimplex { corner })?;
            corners.push(Corner { coordinate, value });
        }

        let mut simplex = Simplex { func, corners };
        simplex.update_ordering();
        debug!(
            dimension = n,
            best = simplex.best(),
            worst = simplex.worst_value(),
            "initial simplex built"
        );
        Ok(simplex)
    }

    /// Number of parameters of the objective. The simplex has one corner more.
    pub fn dimension(&self) -> usize {
        self.corners.len() - 1
    }

    /// All corners, best first, second worst and worst last.
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Number of objective calls so far, infeasible ones included.
    pub fn evaluations(&self) -> usize {
        self.func.num
    }

    pub fn best(&self) -> f64 {
        self.corners[0].value
    }

    pub fn best_coordinate(&self) -> ArrayView1<f64> {
        self.corners[0].coordinate.view()
    }

    pub fn worst_value(&self) -> f64 {
        self.corners[self.dimension()].value
    }

    pub fn second_worst_value(&self) -> f64 {
        self.corners[self.dimension() - 1].value
    }

    /// Mean coordinate over all n+1 corners.
    pub fn centroid(&self) -> Array1<f64> {
        let n = self.dimension();
        self.corners
            .iter()
            .fold(Array1::<f64>::zeros(n), |acc, c| acc + &c.coordinate)
            / (n + 1) as f64
    }

    /// Mean Euclidean distance from the centroid to the corners.
    ///
    /// Zero only for a simplex collapsed onto a single point.
    pub fn size(&self) -> f64 {
        let centroid = self.centroid();
        let total: f64 = self
            .corners
            .iter()
            .map(|c| (&c.coordinate - &centroid).mapv(|d| d * d).sum().sqrt())
            .sum();
        total / self.corners.len() as f64
    }

    /// Moves the worst corner along the line through the centroid of the
    /// other n corners and evaluates the objective there.
    ///
    /// The candidate is `mp - coeff * (mp - worst)`, so `-1` reflects, `-2`
    /// expands and `0.5` contracts. Returns `None` when the objective is
    /// infeasible at the candidate.
    pub fn reflected_point(&mut self, coeff: f64) -> Option<Corner> {
        let n = self.dimension();
        let mp = self.corners[..n]
            .iter()
            .fold(Array1::<f64>::zeros(n), |acc, c| acc + &c.coordinate)
            / n as f64;
        let coordinate = &mp - &((&mp - &self.corners[n].coordinate) * coeff);

        match self.func.call(coordinate.view()) {
            Some(value) => Some(Corner { coordinate, value }),
            None => {
                trace!(coeff, "trial point is infeasible");
                None
            }
        }
    }

    /// Moves every corner except the best one halfway towards the best.
    ///
    /// The new corners are committed only once all of them evaluated, so on
    /// error the simplex is left untouched.
    pub fn contract_by_best(&mut self) -> Result<()> {
        let best = &self.corners[0].coordinate;
        let mut shrunk = Vec::with_capacity(self.dimension());
        for (corner, c) in self.corners.iter().enumerate().skip(1) {
            let coordinate = (&c.coordinate + best) / 2.0;
            let value = self
                .func
                .call(coordinate.view())
                .ok_or(Error::InfeasibleShrink { corner })?;
            shrunk.push(Corner { coordinate, value });
        }
        self.corners.truncate(1);
        self.corners.extend(shrunk);
        Ok(())
    }

    /// Performs one Nelder-Mead step and restores the corner ordering.
    ///
    /// Fails only if the simplex had to shrink and the objective turned out
    /// to be infeasible at one of the shrunk corners. The simplex stays
    /// ordered in that case too.
    pub fn iterate(&mut self) -> Result<Step> {
        let n = self.dimension();
        let step = match self.reflected_point(REFLECTION) {
            Some(reflected) if reflected.value < self.best() => {
                match self.reflected_point(EXPANSION) {
                    Some(expanded) if expanded.value < self.best() => {
                        self.corners[n] = expanded;
                        Step::Expansion
                    }
                    _ => {
                        self.corners[n] = reflected;
                        Step::Reflection
                    }
                }
            }
            Some(reflected) if reflected.value <= self.second_worst_value() => {
                self.corners[n] = reflected;
                Step::Reflection
            }
            reflected => self.contract(reflected)?,
        };

        self.update_ordering();
        debug!(?step, best = self.best(), "simplex step");
        Ok(step)
    }

    /// Contraction branch of [`iterate`](Self::iterate), taken when the
    /// reflected point is infeasible or worse than the second worst corner.
    ///
    /// A reflected point no worse than the worst corner replaces it before
    /// the contraction is tried, so the contraction starts from and competes
    /// with that point.
    fn contract(&mut self, reflected: Option<Corner>) -> Result<Step> {
        let n = self.dimension();
        if let Some(reflected) = reflected {
            if reflected.value <= self.worst_value() {
                self.corners[n] = reflected;
            }
        }

        match self.reflected_point(CONTRACTION) {
            Some(contracted) if contracted.value <= self.worst_value() => {
                self.corners[n] = contracted;
                Ok(Step::Contraction)
            }
            _ => {
                self.contract_by_best()?;
                Ok(Step::Shrink)
            }
        }
    }

    /// Puts the best corner first, the worst last and the second worst just
    /// before it, using compare-and-swap passes.
    pub fn update_ordering(&mut self) {
        let n = self.dimension();
        for i in 1..=n {
            if self.corners[i].value < self.corners[0].value {
                self.corners.swap(0, i);
            }
        }
        for i in 1..n {
            if self.corners[i].value > self.corners[n].value {
                self.corners.swap(i, n);
            }
        }
        for i in 1..n - 1 {
            if self.corners[i].value > self.corners[n - 1].value {
                self.corners.swap(i, n - 1);
            }
        }
    }
}

impl<F: Objective> fmt::Debug for Simplex<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Simplex")
            .field("corners", &self.corners)
            .field("evaluations", &self.func.num)
            .finish()
    }
}
