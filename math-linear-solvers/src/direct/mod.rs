//! Direct solvers for linear systems
//!
//! Factorize once at construction, then solve for any number of right-hand sides:
//! - [`Lu`]: dense LU with optional partial pivoting
//! - [`Cholesky`]: dense Cholesky for SPD systems
//! - [`SparseLu`]: sparse LU with optional partial pivoting and fill-in
//! - [`SparseCholesky`]: sparse Cholesky for SPD systems
//!
//! Each solver takes ownership of its matrix and overwrites it with the
//! factors; a failed factorization consumes the matrix.

mod cholesky;
mod lu;
mod sparse_cholesky;
mod sparse_lu;

pub use cholesky::Cholesky;
pub use lu::Lu;
pub use sparse_cholesky::SparseCholesky;
pub use sparse_lu::SparseLu;
