//! Dense row-major matrix
//!
//! Pure storage for the dense factorizations: element and row access, a
//! split borrow for elimination loops and row swaps. Storage is an
//! `ndarray::Array2` that is always kept in standard (row-major) layout.

use crate::dense::Vector;
use crate::error::{Result, SolverError};
use crate::traits::LinearOperator;
use ndarray::Array2;
use std::ops::{Index, IndexMut};

const LAYOUT: &str = "Matrix storage is always in standard layout";

/// Dense `n_rows x n_cols` matrix of `f64`
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Create a matrix of zeros
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: Array2::zeros((n_rows, n_cols)),
        }
    }

    /// Create a matrix with every entry set to `value`
    pub fn filled(n_rows: usize, n_cols: usize, value: f64) -> Self {
        Self {
            data: Array2::from_elem((n_rows, n_cols), value),
        }
    }

    /// Create an `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    /// Create from a list of rows, which must all have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        let mut flat = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(SolverError::DimensionMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            flat.extend(row);
        }

        let data = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| {
            SolverError::DimensionMismatch {
                expected: n_rows * n_cols,
                got: 0,
            }
        })?;
        Ok(Self { data })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Checked element access
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get((i, j)).copied()
    }

    /// Row `i` as a contiguous slice
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.n_cols();
        &self.flat()[i * n..(i + 1) * n]
    }

    /// Row `i` as a mutable contiguous slice
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let n = self.n_cols();
        &mut self.flat_mut()[i * n..(i + 1) * n]
    }

    /// Borrow row `pivot` for reading and row `target` for writing.
    ///
    /// # Panics
    ///
    /// Panics unless `pivot < target < n_rows`.
    pub fn split_rows_mut(&mut self, pivot: usize, target: usize) -> (&[f64], &mut [f64]) {
        assert!(
            pivot < target && target < self.n_rows(),
            "split_rows_mut requires pivot < target < n_rows"
        );
        let n = self.n_cols();
        let (head, tail) = self.flat_mut().split_at_mut(target * n);
        (&head[pivot * n..(pivot + 1) * n], &mut tail[..n])
    }

    /// Swap rows `i` and `j`
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let n = self.n_cols();
        let (head, tail) = self.flat_mut().split_at_mut(hi * n);
        head[lo * n..(lo + 1) * n].swap_with_slice(&mut tail[..n]);
    }

    /// Underlying ndarray storage
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Take the underlying ndarray storage
    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Matrix-vector product `A x`
    pub fn matvec(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.n_cols() {
            return Err(SolverError::DimensionMismatch {
                expected: self.n_cols(),
                got: x.len(),
            });
        }
        Ok(self.data.dot(&x.view()).into())
    }

    fn flat(&self) -> &[f64] {
        self.data.as_slice().expect(LAYOUT)
    }

    fn flat_mut(&mut self) -> &mut [f64] {
        self.data.as_slice_mut().expect(LAYOUT)
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(data: Array2<f64>) -> Self {
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Self { data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[[i, j]]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[[i, j]]
    }
}

impl LinearOperator for Matrix {
    fn num_rows(&self) -> usize {
        self.n_rows()
    }

    fn num_cols(&self) -> usize {
        self.n_cols()
    }

    fn apply(&self, x: &Vector) -> Result<Vector> {
        self.matvec(x)
    }
}
