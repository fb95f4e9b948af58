//! Symmetric successive over-relaxation
//!
//! One iteration is a forward SOR sweep (rows `0..n`) followed by a backward
//! sweep (rows `n-1..=0`). The change in `x` is measured across both sweeps.

use super::{IterativeBase, relaxation_step};
use crate::dense::Vector;
use crate::error::Result;
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearSolver};

/// SSOR solver over a borrowed sparse matrix
#[derive(Debug, Clone)]
pub struct Ssor<'a> {
    base: IterativeBase<'a>,
    omega: f64,
}

impl<'a> Ssor<'a> {
    /// Create a solver relaxing both sweeps with `options.omega`
    pub fn new(matrix: &'a SparseMatrix, options: &Options) -> Self {
        Self {
            base: IterativeBase::new(matrix, options, "SSOR"),
            omega: options.omega,
        }
    }

    /// Relaxation factor
    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl LinearSolver for Ssor<'_> {
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

impl IterativeSolver for Ssor<'_> {
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        self.base.check(x, b)?;
        let diagonal = self.base.diagonal()?;
        let a = self.base.matrix();
        let mut previous = vec![0.0; diagonal.len()];

        self.base.run(x, |x| {
            relaxation_step(a, &diagonal, &mut previous, x, b, self.omega, true)
        })
    }
}
