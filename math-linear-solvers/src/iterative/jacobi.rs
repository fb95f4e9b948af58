//! Jacobi iteration
//!
//! Every component of the new iterate is computed from the previous one:
//! `x_new[i] = (b[i] - Σ_{j≠i} a_ij x_old[j]) / a_ii`.
//! Converges for strictly diagonally dominant matrices.

use super::{IterativeBase, l2_distance};
use crate::dense::Vector;
use crate::error::Result;
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearSolver};

/// Jacobi solver over a borrowed sparse matrix
#[derive(Debug, Clone)]
pub struct Jacobi<'a> {
    base: IterativeBase<'a>,
}

impl<'a> Jacobi<'a> {
    /// Create a solver for `matrix` using the tolerance and iteration limit in `options`
    pub fn new(matrix: &'a SparseMatrix, options: &Options) -> Self {
        Self {
            base: IterativeBase::new(matrix, options, "Jacobi"),
        }
    }
}

impl LinearSolver for Jacobi<'_> {
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

impl IterativeSolver for Jacobi<'_> {
    fn iterate(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        self.base.check(x, b)?;
        let diagonal = self.base.diagonal()?;
        let a = self.base.matrix();
        let mut previous = vec![0.0; diagonal.len()];

        self.base.run(x, |x| {
            let x = x.as_mut_slice();
            previous.copy_from_slice(x);
            for (i, x_i) in x.iter_mut().enumerate() {
                let off_diagonal: f64 = a
                    .row(i)
                    .iter()
                    .filter(|e| e.column != i)
                    .map(|e| e.value * previous[e.column])
                    .sum();
                *x_i = (b[i] - off_diagonal) / diagonal[i];
            }
            l2_distance(x, &previous)
        })
    }
}
