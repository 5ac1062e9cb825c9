//! Minimizes a paraboloid with a sine term in z, logging every iteration.
//!
//! Run with `RUST_LOG=debug cargo run --example paraboloid` to see the steps.

use ndarray::prelude::*;
use simplex_optimize::vector::NelderMeadBuilder;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let f = |x: ArrayView1<f64>| {
        Some(10.0 * (x[0] - 1.0).powi(2) + 20.0 * (x[1] - 2.0).powi(2) + 10.0 * x[2].powi(2) * (1.0 + x[0].sin()) + 30.0)
    };

    let minimizer = NelderMeadBuilder::default()
        .tolerance(1e-3)
        .max_iter(1000)
        .build()
        .unwrap();
    match minimizer.minimize(f, arr1(&[5.0, 7.0, 0.0]).view(), arr1(&[1.0, 1.0, 1.0]).view()) {
        Ok(res) => println!("{:?}", res),
        Err(err) => eprintln!("optimisation failed: {}", err),
    }
}
