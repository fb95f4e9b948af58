//! Iterative solvers for linear systems
//!
//! This module provides residual-driven methods over a borrowed [`SparseMatrix`]:
//! - [`Jacobi`]: simultaneous updates from the previous iterate
//! - [`GaussSeidel`]: in-place updates in ascending row order
//! - [`Sor`]: Gauss-Seidel blended with the previous value by ω
//! - [`Ssor`]: a forward then a backward SOR sweep per iteration
//! - [`Cg`]: Conjugate Gradient, for symmetric positive definite systems
//!
//! The stationary methods measure convergence with the ℓ2 norm of the change
//! in `x` over one iteration; CG uses the relative residual `‖b - A x‖₂ / ‖b‖₂`.

mod cg;
mod gauss_seidel;
mod jacobi;
mod sor;
mod ssor;

pub use cg::Cg;
pub use gauss_seidel::GaussSeidel;
pub use jacobi::Jacobi;
pub use sor::Sor;
pub use ssor::Ssor;

use crate::dense::Vector;
use crate::error::{Result, SolverError};
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, check_system, require_square};

/// State shared by every iterative solver
#[derive(Debug, Clone)]
pub(crate) struct IterativeBase<'a> {
    name: &'static str,
    matrix: &'a SparseMatrix,
    tolerance: f64,
    max_iterations: usize,
    verbose: bool,
}

impl<'a> IterativeBase<'a> {
    pub(crate) fn new(matrix: &'a SparseMatrix, options: &Options, name: &'static str) -> Self {
        Self {
            name,
            matrix,
            tolerance: options.tolerance,
            max_iterations: options.max_iterations,
            verbose: options.verbose,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn matrix(&self) -> &'a SparseMatrix {
        self.matrix
    }

    pub(crate) fn dimension(&self) -> usize {
        self.matrix.n_cols()
    }

    pub(crate) fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub(crate) fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Validate the system before iterating
    pub(crate) fn check(&self, x: &Vector, b: &Vector) -> Result<()> {
        require_square(self.matrix.n_rows(), self.matrix.n_cols())?;
        check_system(self.matrix.n_rows(), x, b)
    }

    /// Diagonal entries, failing on any that are absent or zero
    pub(crate) fn diagonal(&self) -> Result<Vec<f64>> {
        (0..self.matrix.n_rows())
            .map(|i| match self.matrix.diagonal(i) {
                Some(&d) if d != 0.0 => Ok(d),
                _ => Err(SolverError::ZeroDiagonal { row: i }),
            })
            .collect()
    }

    /// Drive `step` until its metric drops below tolerance.
    ///
    /// `step` performs one iteration on `x` and returns the convergence metric.
    pub(crate) fn run(
        &self,
        x: &mut Vector,
        mut step: impl FnMut(&mut Vector) -> f64,
    ) -> Result<IterationSummary> {
        let mut metric = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            metric = step(x);
            self.report(iteration, metric);
            if metric < self.tolerance {
                return Ok(self.converged(iteration, metric));
            }
        }
        Err(self.convergence_error(self.max_iterations, metric))
    }

    pub(crate) fn report(&self, iteration: usize, metric: f64) {
        if self.verbose {
            log::info!("{} iteration {}: metric = {:.6e}", self.name, iteration, metric);
        }
    }

    pub(crate) fn converged(&self, iterations: usize, residual: f64) -> IterationSummary {
        if self.verbose {
            log::info!(
                "{} converged in {} iterations (metric = {:.6e})",
                self.name,
                iterations,
                residual
            );
        } else {
            log::debug!("{} converged in {} iterations", self.name, iterations);
        }
        IterationSummary {
            iterations,
            residual,
        }
    }

    pub(crate) fn convergence_error(&self, iterations: usize, residual: f64) -> SolverError {
        log::warn!(
            "{} did not converge after {} iterations (metric = {:.6e}, tolerance = {:.6e})",
            self.name,
            iterations,
            residual,
            self.tolerance
        );
        SolverError::ConvergenceFailure {
            solver: self.name,
            iterations,
            residual,
        }
    }
}

/// ℓ2 norm of `a - b`
pub(crate) fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Relax rows in the given order: `x_i <- (1 - ω) x_i + ω (b_i - Σ_{j≠i} a_ij x_j) / a_ii`.
///
/// Uses entries of `x` already updated during this sweep.
pub(crate) fn sor_sweep(
    matrix: &SparseMatrix,
    diagonal: &[f64],
    x: &mut [f64],
    b: &[f64],
    omega: f64,
    rows: impl Iterator<Item = usize>,
) {
    for i in rows {
        let off_diagonal: f64 = matrix
            .row(i)
            .iter()
            .filter(|e| e.column != i)
            .map(|e| e.value * x[e.column])
            .sum();
        let gauss_seidel = (b[i] - off_diagonal) / diagonal[i];
        x[i] = (1.0 - omega) * x[i] + omega * gauss_seidel;
    }
}

/// A Gauss-Seidel-family step: remember `x`, run the sweeps, return the change.
pub(crate) fn relaxation_step(
    matrix: &SparseMatrix,
    diagonal: &[f64],
    previous: &mut [f64],
    x: &mut Vector,
    b: &Vector,
    omega: f64,
    symmetric: bool,
) -> f64 {
    let n = diagonal.len();
    let x = x.as_mut_slice();
    previous.copy_from_slice(x);
    sor_sweep(matrix, diagonal, x, b.as_slice(), omega, 0..n);
    if symmetric {
        sor_sweep(matrix, diagonal, x, b.as_slice(), omega, (0..n).rev());
    }
    l2_distance(x, previous)
}
