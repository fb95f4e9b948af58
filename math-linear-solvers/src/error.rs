//! Error types for the linear solvers.
//!
//! Every fallible operation in the crate reports through [`SolverError`].
//! Variants are grouped into the categories callers usually branch on
//! (dimension problems, zero divisors, failed factorizations, failed
//! convergence, precondition violations) via the `is_*` helpers.

use thiserror::Error;

/// Errors that can occur while building containers or solving systems.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// Operand sizes disagree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Size required by the receiver
        expected: usize,
        /// Size that was supplied
        got: usize,
    },

    /// A square matrix is required.
    #[error("square matrix required, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Scalar or element-wise division by zero.
    #[error("zero division encountered")]
    ZeroDivision,

    /// A stationary iteration found an absent or zero diagonal entry.
    #[error("zero diagonal entry in row {row}")]
    ZeroDiagonal {
        /// Offending row
        row: usize,
    },

    /// The pivot column is uniformly zero during factorization.
    #[error("singular matrix: no usable pivot in column {column}")]
    SingularMatrix {
        /// Column being factorized
        column: usize,
    },

    /// A Cholesky factorization met a negative value under the square root.
    #[error("matrix is not positive definite: pivot {value:.6e} in row {row}")]
    NotPositiveDefinite {
        /// Row of the failing diagonal
        row: usize,
        /// Value that would have been square-rooted
        value: f64,
    },

    /// An iterative method ran out of iterations.
    #[error("{solver} failed to converge after {iterations} iterations (residual: {residual:.6e})")]
    ConvergenceFailure {
        /// Name of the iterative method
        solver: &'static str,
        /// Iterations performed
        iterations: usize,
        /// Final value of the convergence metric
        residual: f64,
    },

    /// `solve` was called on a direct solver whose factorization is missing.
    #[error("the matrix must be factorized before solving")]
    NotFactorized,

    /// A sparse triplet lies outside the matrix.
    #[error("entry ({row}, {col}) is outside a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
        /// Number of rows in the matrix
        rows: usize,
        /// Number of columns in the matrix
        cols: usize,
    },

    /// A solver name could not be parsed.
    #[error("unknown linear solver type: {0}")]
    UnknownSolverType(String),
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    /// Returns `true` for size and shape disagreements.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            SolverError::DimensionMismatch { .. } | SolverError::NotSquare { .. }
        )
    }

    /// Returns `true` when a division by zero was refused.
    pub fn is_zero_division(&self) -> bool {
        matches!(
            self,
            SolverError::ZeroDivision | SolverError::ZeroDiagonal { .. }
        )
    }

    /// Returns `true` if a direct factorization broke down.
    ///
    /// A solver that fails this way cannot be repaired; build a new one.
    pub fn is_factorization_error(&self) -> bool {
        matches!(
            self,
            SolverError::SingularMatrix { .. } | SolverError::NotPositiveDefinite { .. }
        )
    }

    /// Returns `true` if an iterative method did not converge.
    pub fn is_convergence_error(&self) -> bool {
        matches!(self, SolverError::ConvergenceFailure { .. })
    }

    /// Returns `true` if `solve` was called in a state that forbids it.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, SolverError::NotFactorized) || self.is_dimension_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SolverError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");

        let err = SolverError::ConvergenceFailure {
            solver: "Jacobi",
            iterations: 10,
            residual: 0.5,
        };
        assert_eq!(
            err.to_string(),
            "Jacobi failed to converge after 10 iterations (residual: 5.000000e-1)"
        );
    }

    #[test]
    fn test_categories() {
        let singular = SolverError::SingularMatrix { column: 1 };
        let npd = SolverError::NotPositiveDefinite {
            row: 0,
            value: -1.0,
        };
        let diag = SolverError::ZeroDiagonal { row: 2 };
        let square = SolverError::NotSquare { rows: 2, cols: 3 };

        assert!(singular.is_factorization_error());
        assert!(npd.is_factorization_error());
        assert!(!diag.is_factorization_error());

        assert!(diag.is_zero_division());
        assert!(SolverError::ZeroDivision.is_zero_division());

        assert!(square.is_dimension_error());
        assert!(square.is_precondition_violation());
        assert!(SolverError::NotFactorized.is_precondition_violation());
        assert!(!singular.is_convergence_error());
    }
}
