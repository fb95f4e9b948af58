//! Dense Cholesky decomposition solver
//!
//! Factorizes a symmetric positive definite matrix as `L Lᵀ` in place. Only
//! the lower triangle of the input is read; on return the lower triangle
//! (diagonal included) holds `L` and the strict upper triangle is zeroed.

use crate::dense::{Matrix, Vector};
use crate::error::{Result, SolverError};
use crate::traits::{LinearSolver, check_system, require_square};

/// Cholesky factorization of a dense SPD matrix
#[derive(Debug, Clone)]
pub struct Cholesky {
    factor: Matrix,
    factorized: bool,
}

impl Cholesky {
    /// Factorize `matrix`, which must be symmetric positive definite
    pub fn new(matrix: Matrix) -> Result<Self> {
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
            let sum: f64 = self.factor.row(j)[..j].iter().map(|l| l * l).sum();
            let value = self.factor[(j, j)] - sum;
            if value < 0.0 || value.is_nan() {
                return Err(SolverError::NotPositiveDefinite { row: j, value });
            }
            if value == 0.0 {
                return Err(SolverError::SingularMatrix { column: j });
            }

            let l_jj = value.sqrt();
            self.factor[(j, j)] = l_jj;

            for i in (j + 1)..n {
                let (l_j, a_i) = self.factor.split_rows_mut(j, i);
                let dot: f64 = a_i[..j].iter().zip(&l_j[..j]).map(|(a, b)| a * b).sum();
                a_i[j] = (a_i[j] - dot) / l_jj;
            }

            self.factor.row_mut(j)[j + 1..].fill(0.0);
        }

        self.factorized = true;
        log::debug!("Cholesky factorization of a {n}x{n} matrix complete");
        Ok(())
    }

    /// Lower triangular factor `L`
    pub fn factors(&self) -> &Matrix {
        &self.factor
    }

    /// Give back the factored storage
    pub fn into_factors(self) -> Matrix {
        self.factor
    }
}

impl LinearSolver for Cholesky {
    fn name(&self) -> &'static str {
        "Cholesky"
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
            let row = self.factor.row(i);
            let sum: f64 = row[..i]
                .iter()
                .zip(&x.as_slice()[..i])
                .map(|(l, y)| l * y)
                .sum();
            x[i] = (b[i] - sum) / row[i];
        }

        // Backward substitution: Lᵀ x = y, walking column i of L
        for i in (0..n).rev() {
            let sum: f64 = ((i + 1)..n).map(|k| self.factor[(k, i)] * x[k]).sum();
            x[i] = (x[i] - sum) / self.factor[(i, i)];
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LinearOperator;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_cholesky_solve() {
        let a = Matrix::from(array![[4.0, 1.0], [1.0, 3.0]]);
        let b = Vector::from([1.0, 2.0]);

        let x = Cholesky::new(a).unwrap().solve(&b).unwrap();
        assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_factor() {
        let a = Matrix::from(array![[4.0, 2.0, 2.0], [2.0, 5.0, 3.0], [2.0, 3.0, 6.0]]);
        let chol = Cholesky::new(a.clone()).unwrap();
        let l = chol.factors().as_array();

        assert_relative_eq!(l[[0, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(l[[1, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(l[[1, 1]], 2.0, epsilon = 1e-12);
        assert_eq!(l[[0, 1]], 0.0);

        // L Lᵀ reproduces A
        let llt = l.dot(&l.t());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(llt[[i, j]], a[(i, j)], epsilon = 1e-12);
            }
        }

        let b = Vector::from([1.0, -1.0, 2.0]);
        let x = chol.solve(&b).unwrap();
        assert!(a.residual(&x, &b).unwrap().linf_norm() < 1e-12);
    }

    #[test]
    fn test_cholesky_not_positive_definite() {
        let a = Matrix::from(array![[1.0, 2.0], [2.0, 1.0]]);
        let err = Cholesky::new(a).unwrap_err();
        assert!(matches!(
            err,
            SolverError::NotPositiveDefinite { row: 1, value } if value < 0.0
        ));
    }

    #[test]
    fn test_cholesky_singular() {
        let a = Matrix::from(array![[1.0, 2.0], [2.0, 4.0]]);
        let err = Cholesky::new(a).unwrap_err();
        assert_eq!(err, SolverError::SingularMatrix { column: 1 });
    }

    #[test]
    fn test_cholesky_dimension_mismatch() {
        let chol = Cholesky::new(Matrix::identity(2)).unwrap();
        assert!(chol.solve(&Vector::zeros(3)).unwrap_err().is_dimension_error());
    }
}
