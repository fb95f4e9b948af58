//! Solver selection by name
//!
//! [`LinearSolverType`] names the available methods and parses from
//! configuration strings; [`Solver`] builds any of them over a sparse
//! system matrix and dispatches through [`LinearSolver`].

use crate::dense::Vector;
use crate::direct::{Cholesky, Lu, SparseCholesky, SparseLu};
use crate::error::{Result, SolverError};
use crate::iterative::{Cg, GaussSeidel, Jacobi, Sor, Ssor};
use crate::options::Options;
use crate::sparse::SparseMatrix;
use crate::traits::{IterationSummary, IterativeSolver, LinearSolver};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Available linear solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LinearSolverType {
    /// Dense LU with partial pivoting
    Lu,
    /// Dense Cholesky
    Cholesky,
    /// Sparse LU with partial pivoting
    SparseLu,
    /// Sparse Cholesky
    SparseCholesky,
    /// Jacobi iteration
    Jacobi,
    /// Gauss-Seidel iteration
    GaussSeidel,
    /// Successive over-relaxation
    Sor,
    /// Symmetric successive over-relaxation
    Ssor,
    /// Conjugate Gradient
    Cg,
}

impl LinearSolverType {
    /// Every solver type, direct methods first
    pub const ALL: [LinearSolverType; 9] = [
        Self::Lu,
        Self::Cholesky,
        Self::SparseLu,
        Self::SparseCholesky,
        Self::Jacobi,
        Self::GaussSeidel,
        Self::Sor,
        Self::Ssor,
        Self::Cg,
    ];

    /// Configuration name of the solver
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lu => "lu",
            Self::Cholesky => "cholesky",
            Self::SparseLu => "sparse_lu",
            Self::SparseCholesky => "sparse_cholesky",
            Self::Jacobi => "jacobi",
            Self::GaussSeidel => "gauss_seidel",
            Self::Sor => "sor",
            Self::Ssor => "ssor",
            Self::Cg => "cg",
        }
    }

    /// Whether the solver factorizes instead of iterating
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            Self::Lu | Self::Cholesky | Self::SparseLu | Self::SparseCholesky
        )
    }

    /// Whether the solver needs a symmetric positive definite matrix
    pub fn requires_spd(self) -> bool {
        matches!(self, Self::Cholesky | Self::SparseCholesky | Self::Cg)
    }
}

impl fmt::Display for LinearSolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinearSolverType {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| SolverError::UnknownSolverType(s.to_string()))
    }
}

/// Any of the available solvers, bound to one system matrix
#[derive(Debug, Clone)]
pub enum Solver<'a> {
    /// Dense LU over a converted copy of the matrix
    Lu(Lu),
    /// Dense Cholesky over a converted copy of the matrix
    Cholesky(Cholesky),
    /// Sparse LU over a copy of the matrix
    SparseLu(SparseLu),
    /// Sparse Cholesky over a copy of the matrix
    SparseCholesky(SparseCholesky),
    /// Jacobi iteration on the borrowed matrix
    Jacobi(Jacobi<'a>),
    /// Gauss-Seidel iteration on the borrowed matrix
    GaussSeidel(GaussSeidel<'a>),
    /// SOR on the borrowed matrix
    Sor(Sor<'a>),
    /// SSOR on the borrowed matrix
    Ssor(Ssor<'a>),
    /// Conjugate Gradient on the borrowed matrix
    Cg(Cg<'a>),
}

impl<'a> Solver<'a> {
    /// Build a `kind` solver for `matrix`.
    ///
    /// Direct solvers factorize a private copy immediately (dense variants
    /// convert to dense storage first) and fail on singular or non-SPD input.
    /// Iterative solvers borrow `matrix` and take their settings from `options`.
    pub fn new(kind: LinearSolverType, matrix: &'a SparseMatrix, options: &Options) -> Result<Self> {
        log::debug!(
            "Building {} solver for a {}x{} matrix ({} stored entries)",
            kind,
            matrix.n_rows(),
            matrix.n_cols(),
            matrix.nnz()
        );
        let solver = match kind {
            LinearSolverType::Lu => Self::Lu(Lu::new(matrix.to_dense())?),
            LinearSolverType::Cholesky => Self::Cholesky(Cholesky::new(matrix.to_dense())?),
            LinearSolverType::SparseLu => Self::SparseLu(SparseLu::new(matrix.clone())?),
            LinearSolverType::SparseCholesky => {
                Self::SparseCholesky(SparseCholesky::new(matrix.clone())?)
            }
            LinearSolverType::Jacobi => Self::Jacobi(Jacobi::new(matrix, options)),
            LinearSolverType::GaussSeidel => Self::GaussSeidel(GaussSeidel::new(matrix, options)),
            LinearSolverType::Sor => Self::Sor(Sor::new(matrix, options)),
            LinearSolverType::Ssor => Self::Ssor(Ssor::new(matrix, options)),
            LinearSolverType::Cg => Self::Cg(Cg::new(matrix, options)),
        };
        Ok(solver)
    }

    /// Which solver this is
    pub fn kind(&self) -> LinearSolverType {
        match self {
            Self::Lu(_) => LinearSolverType::Lu,
            Self::Cholesky(_) => LinearSolverType::Cholesky,
            Self::SparseLu(_) => LinearSolverType::SparseLu,
            Self::SparseCholesky(_) => LinearSolverType::SparseCholesky,
            Self::Jacobi(_) => LinearSolverType::Jacobi,
            Self::GaussSeidel(_) => LinearSolverType::GaussSeidel,
            Self::Sor(_) => LinearSolverType::Sor,
            Self::Ssor(_) => LinearSolverType::Ssor,
            Self::Cg(_) => LinearSolverType::Cg,
        }
    }

    /// The wrapped solver as a trait object
    pub fn as_linear_solver(&self) -> &dyn LinearSolver {
        match self {
            Self::Lu(s) => s,
            Self::Cholesky(s) => s,
            Self::SparseLu(s) => s,
            Self::SparseCholesky(s) => s,
            Self::Jacobi(s) => s,
            Self::GaussSeidel(s) => s,
            Self::Sor(s) => s,
            Self::Ssor(s) => s,
            Self::Cg(s) => s,
        }
    }

    /// The wrapped solver if it iterates
    pub fn as_iterative(&self) -> Option<&dyn IterativeSolver> {
        match self {
            Self::Jacobi(s) => Some(s),
            Self::GaussSeidel(s) => Some(s),
            Self::Sor(s) => Some(s),
            Self::Ssor(s) => Some(s),
            Self::Cg(s) => Some(s),
            _ => None,
        }
    }

    /// Solve and report iterations; direct solvers report zero iterations
    /// and a zero metric.
    pub fn solve_with_summary(&self, x: &mut Vector, b: &Vector) -> Result<IterationSummary> {
        match self.as_iterative() {
            Some(solver) => solver.iterate(x, b),
            None => {
                self.solve_into(x, b)?;
                Ok(IterationSummary {
                    iterations: 0,
                    residual: 0.0,
                })
            }
        }
    }
}

impl LinearSolver for Solver<'_> {
    fn name(&self) -> &'static str {
        self.as_linear_solver().name()
    }

    fn dimension(&self) -> usize {
        self.as_linear_solver().dimension()
    }

    fn solve_into(&self, x: &mut Vector, b: &Vector) -> Result<()> {
        self.as_linear_solver().solve_into(x, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_spd() -> SparseMatrix {
        SparseMatrix::from_triplets(2, 2, vec![(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0)])
            .unwrap()
    }

    #[test]
    fn test_parse_solver_type() {
        assert_eq!("lu".parse::<LinearSolverType>().unwrap(), LinearSolverType::Lu);
        assert_eq!(
            "Gauss-Seidel".parse::<LinearSolverType>().unwrap(),
            LinearSolverType::GaussSeidel
        );
        assert_eq!(
            " SPARSE_CHOLESKY ".parse::<LinearSolverType>().unwrap(),
            LinearSolverType::SparseCholesky
        );

        let err = "gmres".parse::<LinearSolverType>().unwrap_err();
        assert_eq!(err, SolverError::UnknownSolverType("gmres".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for kind in LinearSolverType::ALL {
            assert_eq!(kind.to_string().parse::<LinearSolverType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_direct_classification() {
        let direct: Vec<_> = LinearSolverType::ALL
            .into_iter()
            .filter(|k| k.is_direct())
            .collect();
        assert_eq!(direct.len(), 4);
        assert!(LinearSolverType::Cg.requires_spd());
        assert!(!LinearSolverType::Sor.requires_spd());
    }

    #[test]
    fn test_every_solver_builds_and_solves() {
        let a = small_spd();
        let b = Vector::from([1.0, 2.0]);
        let options = Options {
            tolerance: 1e-10,
            omega: 1.2,
            ..Options::default()
        };

        for kind in LinearSolverType::ALL {
            let solver = Solver::new(kind, &a, &options).unwrap();
            assert_eq!(solver.kind(), kind);
            assert_eq!(solver.dimension(), 2);
            assert_eq!(solver.as_iterative().is_some(), !kind.is_direct());

            let x = solver.solve(&b).unwrap();
            assert_relative_eq!(x[0], 1.0 / 11.0, epsilon = 1e-8);
            assert_relative_eq!(x[1], 7.0 / 11.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_direct_construction_errors_propagate() {
        let indefinite = SparseMatrix::from_triplets(
            2,
            2,
            vec![(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0), (1, 1, 1.0)],
        )
        .unwrap();
        let err = Solver::new(LinearSolverType::Cholesky, &indefinite, &Options::default())
            .unwrap_err();
        assert!(err.is_factorization_error());
        assert!(Solver::new(LinearSolverType::Lu, &indefinite, &Options::default()).is_ok());
    }

    #[test]
    fn test_solve_with_summary() {
        let a = small_spd();
        let b = Vector::from([1.0, 2.0]);

        let direct = Solver::new(LinearSolverType::SparseLu, &a, &Options::default()).unwrap();
        let mut x = Vector::zeros(2);
        assert_eq!(direct.solve_with_summary(&mut x, &b).unwrap().iterations, 0);

        let cg = Solver::new(LinearSolverType::Cg, &a, &Options::default()).unwrap();
        let mut y = Vector::zeros(2);
        let summary = cg.solve_with_summary(&mut y, &b).unwrap();
        assert!(summary.iterations >= 1);
    }
}
