//! Sparse matrix structures
//!
//! This module provides a row-oriented sparse matrix with sorted columns per
//! row, supporting in-place insertion for factorization fill-in.

mod matrix;

pub use matrix::{Entry, SparseMatrix};
