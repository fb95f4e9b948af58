//! Successive over-relaxation
//!
//! Each Gauss-Seidel update is blended with the previous value:
//! `x_i <- (1 - ω) x_i + ω x_i^GS`. `ω = 1` is plain Gauss-Seidel, and
//! values in `(0, 2)` converge for SPD matrices.

use super::{IterativeBase, relaxation_step};
use crate::dense::Vector;
use crate::error::Result;
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearSolver};

/// SOR solver over a borrowed sparse matrix
#[derive(Debug, Clone)]
pub struct Sor<'a> {
    base: IterativeBase<'a>,
    omega: f64,
}

impl<'a> Sor<'a> {
    /// Create a solver relaxing with `options.omega`
    pub fn new(matrix: &'a SparseMatrix, options: &Options) -> Self {
        Self {
            base: IterativeBase::new(matrix, options, "SOR"),
            omega: options.omega,
        }
    }

    /// Relaxation factor
    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl LinearSolver for Sor<'_> {
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

impl IterativeSolver for Sor<'_> {
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        self.base.check(x, b)?;
        let diagonal = self.base.diagonal()?;
        let a = self.base.matrix();
        let mut previous = vec![0.0; diagonal.len()];

        self.base.run(x, |x| {
            relaxation_step(a, &diagonal, &mut previous, x, b, self.omega, false)
        })
    }
}
