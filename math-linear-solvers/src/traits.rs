//! Core traits for linear algebra operations
//!
//! This module defines the abstractions shared by containers and solvers:
//! - [`LinearOperator`]: matrix-like objects that can perform matrix-vector products
//! - [`LinearSolver`]: anything that can solve `A x = b` for a bound matrix `A`
//! - [`IterativeSolver`]: solvers that also report how they converged

use crate::dense::Vector;
use crate::error::{Result, SolverError};

/// Trait for linear operators (matrices) that can perform matrix-vector products.
///
/// Implemented by both [`Matrix`](crate::Matrix) and
/// [`SparseMatrix`](crate::SparseMatrix) so residual checks work on either.
pub trait LinearOperator {
    /// Number of rows in the operator
    fn num_rows(&self) -> usize;

    /// Number of columns in the operator
    fn num_cols(&self) -> usize;

    /// Apply the operator: y = A * x
    fn apply(&self, x: &Vector) -> Result<Vector>;

    /// Residual `b - A x`
    fn residual(&self, x: &Vector, b: &Vector) -> Result<Vector> {
        if b.len() != self.num_rows() {
            return Err(SolverError::DimensionMismatch {
                expected: self.num_rows(),
                got: b.len(),
            });
        }
        b.try_sub(&self.apply(x)?)
    }

    /// Check if the operator is square
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }
}

/// Trait implemented by every linear solver.
///
/// A solver is bound to its coefficient matrix at construction and can be
/// asked to solve for any number of right-hand sides afterwards.
pub trait LinearSolver {
    /// Human-readable solver name
    fn name(&self) -> &'static str;

    /// Length of the solution vector
    fn dimension(&self) -> usize;

    /// Solve `A x = b`, writing the solution into `x`.
    ///
    /// `x` must already have [`dimension`](Self::dimension) elements. Iterative
    /// solvers use its contents as the initial guess; direct solvers overwrite it.
    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()>;

    /// Solve `A x = b` starting from a zero vector and return `x`
    fn solve(&self, b: &Vector) -> Result<Vector> {
        let mut x = Vector::zeros(self.dimension());
        self.solve_into(&mut x, b)?;
        Ok(x)
    }
}

/// Check `x` and `b` against an `n x n` system
pub(crate) fn check_system(n: usize, x: &Vector, b: &Vector) -> Result<()> {
    if b.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }
    if x.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: x.len(),
        });
    }
    Ok(())
}

/// Fail unless the matrix is square
pub(crate) fn require_square(rows: usize, cols: usize) -> Result<()> {
    if rows != cols {
        return Err(SolverError::NotSquare { rows, cols });
    }
    Ok(())
}

/// Outcome of a converged iterative solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSummary {
    /// Iterations performed
    pub iterations: usize,
    /// Final value of the convergence metric
    pub residual: f64,
}

/// Iterative solvers additionally report iteration counts.
pub trait IterativeSolver: LinearSolver {
    /// Iterate from the guess in `x` until converged.
    ///
    /// Fails with [`SolverError::ConvergenceFailure`] when the metric is
    /// still above tolerance after the maximum number of iterations.
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary>;
}
