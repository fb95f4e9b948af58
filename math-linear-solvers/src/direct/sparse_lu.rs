//! Sparse LU decomposition solver
//!
//! The Doolittle algorithm of [`Lu`](super::Lu) over row-sorted sparse
//! storage. Pivot search and elimination only visit stored entries, and
//! fill-in is inserted into the rows as it appears.

use crate::dense::Vector;
use crate::error::{Result, SolverError};
use crate::sparse::{Entry, SparseMatrix};
use crate::traits::{LinearSolver, check_system, require_square};

/// LU factorization of a square sparse matrix
#[derive(Debug, Clone)]
pub struct SparseLu {
    lu: SparseMatrix,
    row_pivots: Vec<usize>,
    pivot: bool,
    factorized: bool,
}

impl SparseLu {
    /// Factorize `matrix` with partial pivoting
    pub fn new(matrix: SparseMatrix) -> Result<Self> {
        Self::with_pivoting(matrix, true)
    }

    /// Factorize `matrix`, pivoting only when `pivot` is set
    pub fn with_pivoting(matrix: SparseMatrix, pivot: bool) -> Result<Self> {
        require_square(matrix.n_rows(), matrix.n_cols())?;
        let n = matrix.n_rows();
        let mut solver = Self {
            lu: matrix,
            row_pivots: (0..n).collect(),
            pivot,
            factorized: false,
        };
        solver.factorize()?;
        Ok(solver)
    }

    fn factorize(&mut self) -> Result<()> {
        let n = self.lu.n_rows();
        let mut upper: Vec<Entry> = Vec::new();

        for j in 0..n {
            if self.pivot {
                // Absent entries count as zero and are never chosen
                let mut argmax = j;
                let mut max = self.lu.diagonal(j).map_or(0.0, |a_jj| a_jj.abs());
                for k in (j + 1)..n {
                    if let Some(a_kj) = self.lu.locate(k, j) {
                        if a_kj.abs() > max {
                            argmax = k;
                            max = a_kj.abs();
                        }
                    }
                }

                if max == 0.0 {
                    return Err(SolverError::SingularMatrix { column: j });
                }

                if argmax != j {
                    log::trace!("SparseLU: swapping rows {j} and {argmax}");
                    self.row_pivots.swap(j, argmax);
                    self.lu.swap_rows(j, argmax);
                }
            }

            let a_jj = match self.lu.diagonal(j) {
                Some(&a_jj) if a_jj != 0.0 => a_jj,
                _ => return Err(SolverError::SingularMatrix { column: j }),
            };

            upper.clear();
            upper.extend(self.lu.row(j).iter().filter(|e| e.column > j));

            for i in (j + 1)..n {
                let l_ij = match self.lu.locate_mut(i, j) {
                    Some(a_ij) if *a_ij != 0.0 => {
                        *a_ij /= a_jj;
                        *a_ij
                    }
                    _ => continue,
                };

                for e in &upper {
                    self.lu.add(i, e.column, -l_ij * e.value);
                }
            }
        }

        self.factorized = true;
        log::debug!(
            "SparseLU factorization of a {n}x{n} matrix complete ({} stored entries)",
            self.lu.nnz()
        );
        Ok(())
    }

    /// Whether partial pivoting was used
    pub fn pivoting(&self) -> bool {
        self.pivot
    }

    /// Combined L and U factors
    pub fn factors(&self) -> &SparseMatrix {
        &self.lu
    }

    /// Row permutation applied during factorization
    pub fn row_pivots(&self) -> &[usize] {
        &self.row_pivots
    }

    /// Give back the factored storage
    pub fn into_factors(self) -> SparseMatrix {
        self.lu
    }
}

impl LinearSolver for SparseLu {
    fn name(&self) -> &'static str {
        "SparseLU"
    }

    fn dimension(&self) -> usize {
        self.lu.n_rows()
    }

    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()> {
        if !self.factorized {
            return Err(SolverError::NotFactorized);
        }
        let n = self.dimension();
        check_system(n, x, b)?;

        // Forward substitution over entries left of the diagonal
        for i in 0..n {
            let sum: f64 = self
                .lu
                .row(i)
                .iter()
                .take_while(|e| e.column < i)
                .map(|e| e.value * x[e.column])
                .sum();
            x[i] = b[self.row_pivots[i]] - sum;
        }

        // Backward substitution over entries right of the diagonal
        for i in (0..n).rev() {
            let sum: f64 = self
                .lu
                .row(i)
                .iter()
                .skip_while(|e| e.column <= i)
                .map(|e| e.value * x[e.column])
                .sum();
            let a_ii = *self
                .lu
                .diagonal(i)
                .ok_or(SolverError::SingularMatrix { column: i })?;
            x[i] = (x[i] - sum) / a_ii;
        }

        Ok(())
    }
}
