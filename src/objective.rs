//! The objective capability consumed by the minimizers, and a wrapper that
//! counts how often it was called.
use ndarray::prelude::*;

/// A scalar function that may be undefined at some points of parameter space.
///
/// Returning `None` marks `coordinate` as infeasible. The minimizer takes that
/// as the final answer for the point and never retries it.
pub trait Objective {
    fn evaluate(&mut self, coordinate: ArrayView1<f64>) -> Option<f64>;
}

impl<F> Objective for F
where
    F: FnMut(ArrayView1<f64>) -> Option<f64>,
{
    fn evaluate(&mut self, coordinate: ArrayView1<f64>) -> Option<f64> {
        self(coordinate)
    }
}

/// Turns a function that is defined everywhere into an [`Objective`].
///
/// ```
/// # use ndarray::prelude::*;
/// # use simplex_optimize::objective::{feasible, Objective};
/// let mut f = feasible(|x: ArrayView1<f64>| x.dot(&x));
/// assert_eq!(f.evaluate(arr1(&[3.0, 4.0]).view()), Some(25.0));
/// ```
pub fn feasible<F>(mut func: F) -> impl FnMut(ArrayView1<f64>) -> Option<f64>
where
    F: FnMut(ArrayView1<f64>) -> f64,
{
    move |x| Some(func(x))
}

#[derive(Debug)]
pub struct Counted<F: Objective> {
    pub num: usize,
    pub func: F,
}

impl<F: Objective> Counted<F> {
    pub fn new(func: F) -> Self {
        Counted { num: 0, func }
    }

    pub fn call(&mut self, arg: ArrayView1<f64>) -> Option<f64> {
        self.num += 1;
        self.func.evaluate(arg)
    }
}
