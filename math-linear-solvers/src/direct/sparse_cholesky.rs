//! Sparse Cholesky decomposition solver
//!
//! Column-by-column `L Lᵀ` factorization over row-sorted sparse storage.
//! The factor overwrites the lower triangle; entries right of the diagonal
//! are left in place and ignored by `solve`.

use crate::dense::Vector;
use crate::error::{Result, SolverError};
use crate::sparse::{Entry, SparseMatrix};
use crate::traits::{LinearSolver, check_system, require_square};
use std::cmp::Ordering;

/// Cholesky factorization of a sparse SPD matrix
#[derive(Debug, Clone)]
pub struct SparseCholesky {
    factor: SparseMatrix,
    factorized: bool,
}

impl SparseCholesky {
    /// Factorize `matrix`, which must be symmetric positive definite
    pub fn new(matrix: SparseMatrix) -> Result<Self> {
        require_square(matrix.n_rows(), matrix.n_cols())?;
        let mut solver = Self {
            factor: matrix,
            factorized: false,
        };
        solver.factorize()?;
        Ok(solver)
    }

    fn factorize(&mut self) -> Result<()> {
        let n = self.factor.n_rows();

        for j in 0..n {
            let a_jj = match self.factor.diagonal(j) {
                Some(&a_jj) if a_jj != 0.0 => a_jj,
                _ => return Err(SolverError::SingularMatrix { column: j }),
            };

            let sum: f64 = self
                .factor
                .row(j)
                .iter()
                .take_while(|e| e.column < j)
                .map(|e| e.value * e.value)
                .sum();
            let value = a_jj - sum;
            if value < 0.0 || value.is_nan() {
                return Err(SolverError::NotPositiveDefinite { row: j, value });
            }
            if value == 0.0 {
                return Err(SolverError::SingularMatrix { column: j });
            }
            let d = value.sqrt();
            self.factor.set(j, j, d);

            for i in (j + 1)..n {
                // Rows starting right of column j cannot reach (i, j)
                if self.factor.row(i).first().is_none_or(|e| e.column > j) {
                    continue;
                }

                let dot = dot_below(self.factor.row(i), self.factor.row(j), j);
                match self.factor.locate_mut(i, j) {
                    Some(a_ij) => *a_ij = (*a_ij - dot) / d,
                    None => {
                        let l_ij = -dot / d;
                        if l_ij != 0.0 {
                            self.factor.set(i, j, l_ij);
                        }
                    }
                }
            }
        }

        self.factorized = true;
        log::debug!(
            "SparseCholesky factorization of a {n}x{n} matrix complete ({} stored entries)",
            self.factor.nnz()
        );
        Ok(())
    }

    /// Factor storage; the lower triangle holds `L`
    pub fn factors(&self) -> &SparseMatrix {
        &self.factor
    }

    /// Give back the factored storage
    pub fn into_factors(self) -> SparseMatrix {
        self.factor
    }

    fn diagonal(&self, i: usize) -> Result<f64> {
        self.factor
            .diagonal(i)
            .copied()
            .ok_or(SolverError::SingularMatrix { column: i })
    }
}

/// Sum of `a_k * b_k` over columns `k < limit` stored in both rows
fn dot_below(a: &[Entry], b: &[Entry], limit: usize) -> f64 {
    let (mut p, mut q) = (0, 0);
    let mut sum = 0.0;
    while p < a.len() && q < b.len() {
        let (ca, cb) = (a[p].column, b[q].column);
        if ca >= limit || cb >= limit {
            break;
        }
        match ca.cmp(&cb) {
            Ordering::Less => p += 1,
            Ordering::Greater => q += 1,
            Ordering::Equal => {
                sum += a[p].value * b[q].value;
                p += 1;
                q += 1;
            }
        }
    }
    sum
}

impl LinearSolver for SparseCholesky {
    fn name(&self) -> &'static str {
        "SparseCholesky"
    }

    fn dimension(&self) -> usize {
        self.factor.n_rows()
    }

    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()> {
        if !self.factorized {
            return Err(SolverError::NotFactorized);
        }
        let n = self.dimension();
        check_system(n, x, b)?;

        // Forward substitution: L y = b
        for i in 0..n {
            let sum: f64 = self
                .factor
                .row(i)
                .iter()
                .take_while(|e| e.column < i)
                .map(|e| e.value * x[e.column])
                .sum();
            x[i] = (b[i] - sum) / self.diagonal(i)?;
        }

        // Backward substitution: Lᵀ x = y, scattering row i of L as column i of Lᵀ
        for i in (0..n).rev() {
            x[i] /= self.diagonal(i)?;
            let x_i = x[i];
            for e in self.factor.row(i).iter().take_while(|e| e.column < i) {
                x[e.column] -= e.value * x_i;
            }
        }

        Ok(())
    }
}
