//! Gauss-Seidel iteration
//!
//! Like Jacobi, but rows are updated in place in ascending order so later
//! rows already see the new values of earlier ones.

use super::{IterativeBase, relaxation_step};
use crate::dense::Vector;
use crate::error::Result;
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearSolver};

/// Gauss-Seidel solver over a borrowed sparse matrix
#[derive(Debug, Clone)]
pub struct GaussSeidel<'a> {
    base: IterativeBase<'a>,
}

impl<'a> GaussSeidel<'a> {
    /// Create a solver for `matrix` using the tolerance and iteration limit in `options`
    pub fn new(matrix: &'a SparseMatrix, options: &Options) -> Self {
        Self {
            base: IterativeBase::new(matrix, options, "GaussSeidel"),
        }
    }
}

impl LinearSolver for GaussSeidel<'_> {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn dimension(&self) -> usize {
        self.base.dimension()
    }

    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()> {
        self.iterate(x, b).map(|_| ())
    }
}

impl IterativeSolver for GaussSeidel<'_> {
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        self.base.check(x, b)?;
        let diagonal = self.base.diagonal()?;
        let a = self.base.matrix();
        let mut previous = vec![0.0; diagonal.len()];

        self.base
            .run(x, |x| relaxation_step(a, &diagonal, &mut previous, x, b, 1.0, false))
    }
}
