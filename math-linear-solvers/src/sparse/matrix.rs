//! Row-oriented sparse matrix
//!
//! Each row owns a growable list of `(column, value)` entries kept sorted by
//! column, so lookups are binary searches and row walks come out in
//! ascending-column order. Inserting into a row costs O(row length), which
//! is cheap for the narrow-banded matrices diffusion discretizations produce
//! and lets factorizations create fill-in without rebuilding any index.

use crate::dense::{Matrix, Vector};
use crate::error::{Result, SolverError};
use crate::traits::LinearOperator;

/// A stored entry of a sparse row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// Column index
    pub column: usize,
    /// Stored value (may be an explicit zero)
    pub value: f64,
}

/// Sparse `n_rows x n_cols` matrix with per-row sorted storage
///
/// At most one entry exists per `(row, column)`. Entries holding zero may
/// be present; they behave exactly like absent ones in every product.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Vec<Entry>>,
}

impl SparseMatrix {
    /// Create an empty sparse matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: vec![Vec::new(); n_rows],
        }
    }

    /// Create an empty sparse matrix with each row pre-sized to `per_row` entries
    ///
    /// Sizing rows to the expected bandwidth avoids reallocation during
    /// assembly and factorization fill-in.
    pub fn with_row_capacity(n_rows: usize, n_cols: usize, per_row: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            rows: (0..n_rows).map(|_| Vec::with_capacity(per_row)).collect(),
        }
    }

    /// Create from `(row, col, value)` triplets. Duplicate entries are summed.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self> {
        let mut matrix = Self::new(n_rows, n_cols);
        for (row, col, value) in triplets {
            if row >= n_rows || col >= n_cols {
                return Err(SolverError::IndexOutOfBounds {
                    row,
                    col,
                    rows: n_rows,
                    cols: n_cols,
                });
            }
            matrix.add(row, col, value);
        }
        Ok(matrix)
    }

    /// Create from a dense matrix, keeping entries with magnitude > threshold
    pub fn from_dense(dense: &Matrix, threshold: f64) -> Self {
        let mut matrix = Self::new(dense.n_rows(), dense.n_cols());
        for (i, row) in matrix.rows.iter_mut().enumerate() {
            row.extend(
                dense
                    .row(i)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.abs() > threshold)
                    .map(|(column, &value)| Entry { column, value }),
            );
        }
        matrix
    }

    /// Create an `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            rows: (0..n)
                .map(|i| {
                    vec![Entry {
                        column: i,
                        value: 1.0,
                    }]
                })
                .collect(),
        }
    }

    /// Convert to a dense matrix
    pub fn to_dense(&self) -> Matrix {
        let mut dense = Matrix::zeros(self.n_rows, self.n_cols);
        for (i, row) in self.rows.iter().enumerate() {
            let dense_row = dense.row_mut(i);
            for e in row {
                dense_row[e.column] = e.value;
            }
        }
        dense
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored entries (explicit zeros included)
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    fn search(&self, i: usize, j: usize) -> std::result::Result<usize, usize> {
        self.rows[i].binary_search_by_key(&j, |e| e.column)
    }

    /// Look up entry `(i, j)`; `None` when it is not stored
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn locate(&self, i: usize, j: usize) -> Option<&f64> {
        let k = self.search(i, j).ok()?;
        Some(&self.rows[i][k].value)
    }

    /// Mutable lookup of entry `(i, j)`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn locate_mut(&mut self, i: usize, j: usize) -> Option<&mut f64> {
        let k = self.search(i, j).ok()?;
        Some(&mut self.rows[i][k].value)
    }

    /// Value of entry `(i, j)`, zero when it is not stored
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.locate(i, j).copied().unwrap_or(0.0)
    }

    /// Diagonal entry of row `i`, if stored
    pub fn diagonal(&self, i: usize) -> Option<&f64> {
        self.locate(i, i)
    }

    /// Mutable diagonal entry of row `i`, if stored
    pub fn diagonal_mut(&mut self, i: usize) -> Option<&mut f64> {
        self.locate_mut(i, i)
    }

    fn check_index(&self, i: usize, j: usize) {
        assert!(
            i < self.n_rows && j < self.n_cols,
            "entry ({i}, {j}) is outside a {}x{} matrix",
            self.n_rows,
            self.n_cols
        );
    }

    /// Overwrite entry `(i, j)`, inserting it if absent
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.check_index(i, j);
        match self.search(i, j) {
            Ok(k) => self.rows[i][k].value = value,
            Err(k) => self.rows[i].insert(k, Entry { column: j, value }),
        }
    }

    /// Accumulate into entry `(i, j)`, inserting it if absent
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the matrix.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        self.check_index(i, j);
        match self.search(i, j) {
            Ok(k) => self.rows[i][k].value += value,
            Err(k) => self.rows[i].insert(k, Entry { column: j, value }),
        }
    }

    /// Stored entries of row `i` in ascending column order
    pub fn row(&self, i: usize) -> &[Entry] {
        &self.rows[i]
    }

    /// `(column, value)` pairs of row `i` in ascending column order
    pub fn row_entries(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows[i].iter().map(|e| (e.column, e.value))
    }

    /// All stored `(row, column, value)` triplets, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |e| (i, e.column, e.value)))
    }

    /// Swap the entries of rows `i` and `j`
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Dot product of row `i` with a dense slice
    #[inline]
    pub(crate) fn row_dot(&self, i: usize, x: &[f64]) -> f64 {
        self.rows[i].iter().map(|e| e.value * x[e.column]).sum()
    }

    /// Matrix-vector product: y = A * x
    pub fn matvec(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.n_cols {
            return Err(SolverError::DimensionMismatch {
                expected: self.n_cols,
                got: x.len(),
            });
        }
        let xs = x.as_slice();
        Ok((0..self.n_rows).map(|i| self.row_dot(i, xs)).collect())
    }
}

impl LinearOperator for SparseMatrix {
    fn num_rows(&self) -> usize {
        self.n_rows
    }

    fn num_cols(&self) -> usize {
        self.n_cols
    }

    fn apply(&self, x: &Vector) -> Result<Vector> {
        self.matvec(x)
    }
}
