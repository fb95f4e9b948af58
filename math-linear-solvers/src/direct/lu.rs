//! Dense LU decomposition solver
//!
//! Doolittle factorization with optional partial pivoting, computed in place
//! so the unit lower factor sits below the diagonal and the upper factor on
//! and above it.

use crate::dense::{Matrix, Vector};
use crate::error::{Result, SolverError};
use crate::traits::{LinearSolver, check_system, require_square};

/// LU factorization of a dense square matrix
///
/// The solver owns the matrix and overwrites it with the combined factors.
/// Factorization happens once, at construction; every `solve` afterwards
/// only reads the factors.
#[derive(Debug, Clone)]
pub struct Lu {
    /// Combined L and U factors (L is unit lower triangular, stored below diagonal)
    lu: Matrix,
    /// `row_pivots[i]` is the original row now stored at row `i`
    row_pivots: Vec<usize>,
    pivot: bool,
    factorized: bool,
}

impl Lu {
    /// Factorize `matrix` with partial pivoting
    pub fn new(matrix: Matrix) -> Result<Self> {
        Self::with_pivoting(matrix, true)
    }

    /// Factorize `matrix`, pivoting only when `pivot` is set
    pub fn with_pivoting(matrix: Matrix, pivot: bool) -> Result<Self> {
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

        for j in 0..n {
            if self.pivot {
                // Largest magnitude on or below the diagonal; first one wins ties
                let mut argmax = j;
                let mut max = self.lu[(j, j)].abs();
                for k in (j + 1)..n {
                    let a_kj = self.lu[(k, j)].abs();
                    if a_kj > max {
                        argmax = k;
                        max = a_kj;
                    }
                }

                if max == 0.0 {
                    return Err(SolverError::SingularMatrix { column: j });
                }

                if argmax != j {
                    log::trace!("LU: swapping rows {j} and {argmax}");
                    self.row_pivots.swap(j, argmax);
                    self.lu.swap_rows(j, argmax);
                }
            } else if self.lu[(j, j)] == 0.0 {
                return Err(SolverError::SingularMatrix { column: j });
            }

            for i in (j + 1)..n {
                let (a_j, a_i) = self.lu.split_rows_mut(j, i);

                // Multiplier stored in the L part
                let l_ij = a_i[j] / a_j[j];
                a_i[j] = l_ij;
                if l_ij == 0.0 {
                    continue;
                }

                for (a_ik, &a_jk) in a_i[j + 1..].iter_mut().zip(&a_j[j + 1..]) {
                    *a_ik -= l_ij * a_jk;
                }
            }
        }

        self.factorized = true;
        log::debug!("LU factorization of a {n}x{n} matrix complete");
        Ok(())
    }

    /// Whether partial pivoting was used
    pub fn pivoting(&self) -> bool {
        self.pivot
    }

    /// Combined L and U factors
    pub fn factors(&self) -> &Matrix {
        &self.lu
    }

    /// Row permutation applied during factorization
    pub fn row_pivots(&self) -> &[usize] {
        &self.row_pivots
    }

    /// Give back the factored storage
    pub fn into_factors(self) -> Matrix {
        self.lu
    }
}

impl LinearSolver for Lu {
    fn name(&self) -> &'static str {
        "LU"
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

        // Forward substitution: L y = P b
        for i in 0..n {
            let row = self.lu.row(i);
            let sum: f64 = row[..i]
                .iter()
                .zip(&x.as_slice()[..i])
                .map(|(l, y)| l * y)
                .sum();
            x[i] = b[self.row_pivots[i]] - sum;
        }

        // Backward substitution: U x = y
        for i in (0..n).rev() {
            let row = self.lu.row(i);
            let sum: f64 = row[i + 1..]
                .iter()
                .zip(&x.as_slice()[i + 1..])
                .map(|(u, xj)| u * xj)
                .sum();
            x[i] = (x[i] - sum) / row[i];
        }

        Ok(())
    }
}
