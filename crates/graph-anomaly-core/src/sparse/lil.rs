//! List-of-lists sparse matrix for row-level mutation.

use super::{validate_row_indices, CsrMatrix, Scalar, SparseRow};
use crate::error::{AnomalyError, AnomalyResult};

/// Row-mutable sparse matrix.
///
/// Each row owns a sorted column list and a value list of the same length.
/// Replacing a row is O(row length); the injectors build their working copy
/// here and call [`LilMatrix::into_csr`] once at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct LilMatrix<T> {
    ncols: usize,
    rows: Vec<Vec<usize>>,
    data: Vec<Vec<T>>,
}

impl<T: Scalar> LilMatrix<T> {
    /// Empty `nrows x ncols` matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            rows: vec![Vec::new(); nrows],
            data: vec![Vec::new(); nrows],
        }
    }

    /// Copy a CSR matrix row by row.
    pub fn from_csr(csr: &CsrMatrix<T>) -> Self {
        let nrows = csr.nrows();
        let mut rows = Vec::with_capacity(nrows);
        let mut data = Vec::with_capacity(nrows);
        for r in 0..nrows {
            let row = csr.row(r);
            rows.push(row.indices.to_vec());
            data.push(row.values.to_vec());
        }
        Self {
            ncols: csr.ncols(),
            rows,
            data,
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.ncols)
    }

    /// Total stored entries.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= nrows`.
    pub fn row(&self, r: usize) -> SparseRow<'_, T> {
        SparseRow {
            indices: &self.rows[r],
            values: &self.data[r],
        }
    }

    /// Replace row `r` with the given pattern and values.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `r` is out of range
    /// - `InvalidMatrix` if lengths differ or `indices` is not strictly
    ///   ascending within `0..ncols`
    pub fn set_row(&mut self, r: usize, indices: Vec<usize>, values: Vec<T>) -> AnomalyResult<()> {
        if r >= self.rows.len() {
            return Err(AnomalyError::InvalidArgument(format!(
                "row {} out of range for {} rows",
                r,
                self.rows.len()
            )));
        }
        if indices.len() != values.len() {
            return Err(AnomalyError::InvalidMatrix(format!(
                "row {} has {} indices but {} values",
                r,
                indices.len(),
                values.len()
            )));
        }
        validate_row_indices(r, &indices, self.ncols).map_err(AnomalyError::InvalidMatrix)?;

        self.rows[r] = indices;
        self.data[r] = values;
        Ok(())
    }

    /// Replace row `r` with a copy of `source` (pattern and values).
    pub fn copy_row(&mut self, r: usize, source: SparseRow<'_, T>) -> AnomalyResult<()> {
        self.set_row(r, source.indices.to_vec(), source.values.to_vec())
    }

    /// Compress into CSR. O(nnz).
    pub fn into_csr(self) -> CsrMatrix<T> {
        let nrows = self.rows.len();
        let nnz = self.nnz();
        let mut indptr = Vec::with_capacity(nrows + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);

        for (cols, vals) in self.rows.into_iter().zip(self.data) {
            indices.extend(cols);
            data.extend(vals);
            indptr.push(indices.len());
        }

        CsrMatrix::from_parts_unchecked(nrows, self.ncols, indptr, indices, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_round_trip_preserves_structure() {
        let csr = CsrMatrix::from_dense(&[vec![0i32, 4, 0], vec![0, 0, 0], vec![9, 0, 1]]).unwrap();
        let lil = csr.to_lil();
        assert_eq!(lil.shape(), (3, 3));
        assert_eq!(lil.nnz(), 3);
        assert_eq!(lil.into_csr(), csr);
    }

    #[test]
    fn test_set_row() {
        let mut lil = LilMatrix::<f64>::new(2, 4);
        lil.set_row(1, vec![0, 3], vec![1.5, 2.5]).unwrap();
        assert_eq!(lil.row(1).indices, &[0, 3]);
        assert_eq!(lil.row(0).nnz(), 0);

        let csr = lil.into_csr();
        assert_eq!(csr.indptr(), &[0, 0, 2]);
        assert_eq!(csr.get(1, 3), Some(2.5));
    }

    #[test]
    fn test_set_row_rejects_invalid() {
        let mut lil = LilMatrix::<f64>::new(2, 4);
        assert!(lil.set_row(2, vec![], vec![]).unwrap_err().is_invalid_argument());
        assert!(matches!(
            lil.set_row(0, vec![1], vec![]),
            Err(AnomalyError::InvalidMatrix(_))
        ));
        assert!(matches!(
            lil.set_row(0, vec![3, 1], vec![1.0, 1.0]),
            Err(AnomalyError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_copy_row_keeps_explicit_zeros() {
        let src = CsrMatrix::new(1, 3, vec![0, 2], vec![0, 2], vec![0.0f32, 7.0]).unwrap();
        let mut lil = LilMatrix::new(2, 3);
        lil.copy_row(1, src.row(0)).unwrap();
        let out = lil.into_csr();
        assert_eq!(out.row(1), src.row(0));
    }
}
