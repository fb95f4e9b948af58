//! Linear solvers for finite-volume diffusion problems
//!
//! This crate provides dense and sparse containers together with direct and
//! iterative solvers for `A x = b`, where `A` is typically the sparse matrix
//! produced by a diffusion discretization.
//!
//! # Features
//!
//! - **Containers**: [`Vector`], dense [`Matrix`], row-oriented [`SparseMatrix`]
//! - **Direct Solvers**: LU and Cholesky, each in a dense and a sparse variant
//! - **Iterative Solvers**: Jacobi, Gauss-Seidel, SOR, SSOR, CG
//! - **Selection by name**: [`LinearSolverType`] and the [`Solver`] sum type
//! - **serde** (optional feature): deserialize [`Options`] and [`LinearSolverType`]
//!   from configuration files
//!
//! # Example
//!
//! ```
//! use math_linear_solvers::{LinearSolver, LinearSolverType, Options, Solver, SparseMatrix, Vector};
//!
//! let a = SparseMatrix::from_triplets(
//!     2,
//!     2,
//!     vec![(0, 0, 4.0), (0, 1, 1.0), (1, 0, 1.0), (1, 1, 3.0)],
//! )?;
//! let b = Vector::from([1.0, 2.0]);
//!
//! let kind: LinearSolverType = "gauss_seidel".parse()?;
//! let solver = Solver::new(kind, &a, &Options::default())?;
//! let x = solver.solve(&b)?;
//! assert!((x[0] - 1.0 / 11.0).abs() < 1e-6);
//! # Ok::<(), math_linear_solvers::SolverError>(())
//! ```

pub mod dense;
pub mod direct;
pub mod error;
pub mod iterative;
pub mod options;
pub mod solver;
pub mod sparse;
pub mod traits;

// Re-export main types
pub use dense::{Matrix, Vector};
pub use error::{Result, SolverError};
pub use options::Options;
pub use solver::{LinearSolverType, Solver};
pub use sparse::{Entry, SparseMatrix};
pub use traits::{IterationSummary, IterativeSolver, LinearOperator, LinearSolver};

// Re-export solvers
pub use direct::{Cholesky, Lu, SparseCholesky, SparseLu};
pub use iterative::{Cg, GaussSeidel, Jacobi, Sor, Ssor};
