//! Compressed sparse row matrix.

use serde::{Deserialize, Serialize};

use super::{validate_row_indices, LilMatrix, Scalar};
use crate::error::{AnomalyError, AnomalyResult};

/// Compressed sparse row (CSR) matrix.
///
/// The entries of row `r` live in `indices[indptr[r]..indptr[r + 1]]` (column
/// indices) and the matching slice of `data` (values).
///
/// - `indptr.len() == nrows + 1`, `indptr[0] == 0`
/// - `indptr[nrows] == indices.len() == data.len()`
/// - column indices strictly ascending within each row
///
/// Equality is structural: two matrices are equal when shape, pattern and
/// stored values all match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "CsrParts<T>",
    bound(deserialize = "T: Scalar + Deserialize<'de>")
)]
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<T>,
}

/// Unvalidated CSR arrays, as found in serialized graph files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrParts<T> {
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: Scalar> TryFrom<CsrParts<T>> for CsrMatrix<T> {
    type Error = AnomalyError;

    fn try_from(parts: CsrParts<T>) -> AnomalyResult<Self> {
        CsrMatrix::new(parts.nrows, parts.ncols, parts.indptr, parts.indices, parts.data)
    }
}

/// Borrowed view of one CSR row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseRow<'a, T> {
    /// Sorted column indices.
    pub indices: &'a [usize],
    /// Values aligned with `indices`.
    pub values: &'a [T],
}

impl<'a, T: Scalar> SparseRow<'a, T> {
    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether column `col` is part of the pattern.
    pub fn contains(&self, col: usize) -> bool {
        self.indices.binary_search(&col).is_ok()
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + 'a {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Euclidean (L2) distance to another row.
    ///
    /// Merge-joins the two sorted patterns; columns present in only one row
    /// contribute their full squared value. Terms are accumulated in
    /// ascending column order, so the result equals the dense computation.
    pub fn euclidean_distance(&self, other: &SparseRow<'_, T>) -> f64 {
        let mut sum = 0.0f64;
        let mut i = 0;
        let mut j = 0;

        while i < self.indices.len() && j < other.indices.len() {
            let (a, b) = (self.indices[i], other.indices[j]);
            let diff = if a == b {
                let d = self.values[i].to_f64() - other.values[j].to_f64();
                i += 1;
                j += 1;
                d
            } else if a < b {
                let d = self.values[i].to_f64();
                i += 1;
                d
            } else {
                let d = other.values[j].to_f64();
                j += 1;
                d
            };
            sum += diff * diff;
        }
        for v in &self.values[i..] {
            sum += v.to_f64() * v.to_f64();
        }
        for v in &other.values[j..] {
            sum += v.to_f64() * v.to_f64();
        }

        sum.sqrt()
    }
}

impl<T: Scalar> CsrMatrix<T> {
    /// Build a matrix from raw CSR arrays, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AnomalyError::InvalidMatrix`] if the arrays are inconsistent
    /// with each other or with the shape, or if any row's column indices are
    /// unsorted, duplicated, or out of bounds.
    pub fn new(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> AnomalyResult<Self> {
        let expected_len = nrows.checked_add(1).ok_or_else(|| {
            AnomalyError::InvalidMatrix(format!("nrows {} is too large", nrows))
        })?;
        if indptr.len() != expected_len {
            return Err(AnomalyError::InvalidMatrix(format!(
                "indptr has length {}, expected {}",
                indptr.len(),
                expected_len
            )));
        }
        if indptr[0] != 0 {
            return Err(AnomalyError::InvalidMatrix(format!(
                "indptr must start at 0, got {}",
                indptr[0]
            )));
        }
        if indices.len() != data.len() {
            return Err(AnomalyError::InvalidMatrix(format!(
                "indices ({}) and data ({}) lengths differ",
                indices.len(),
                data.len()
            )));
        }
        if indptr[nrows] != indices.len() {
            return Err(AnomalyError::InvalidMatrix(format!(
                "indptr ends at {} but {} entries are stored",
                indptr[nrows],
                indices.len()
            )));
        }
        // Whole indptr is checked before any row is sliced
        for (r, w) in indptr.windows(2).enumerate() {
            if w[1] < w[0] {
                return Err(AnomalyError::InvalidMatrix(format!(
                    "indptr decreases at row {}",
                    r
                )));
            }
            if w[1] > indices.len() {
                return Err(AnomalyError::InvalidMatrix(format!(
                    "indptr entry {} at row {} exceeds {} stored entries",
                    w[1],
                    r,
                    indices.len()
                )));
            }
        }
        for (r, w) in indptr.windows(2).enumerate() {
            validate_row_indices(r, &indices[w[0]..w[1]], ncols)
                .map_err(AnomalyError::InvalidMatrix)?;
        }

        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        })
    }

    /// Assemble from already-validated parts.
    pub(crate) fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> Self {
        debug_assert_eq!(indptr.len(), nrows + 1);
        debug_assert_eq!(indices.len(), data.len());
        Self {
            nrows,
            ncols,
            indptr,
            indices,
            data,
        }
    }

    /// Matrix with no stored entries.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_parts_unchecked(nrows, ncols, vec![0; nrows + 1], Vec::new(), Vec::new())
    }

    /// Build from `(row, col, value)` triplets in any order.
    ///
    /// When the same position appears more than once the last triplet wins.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(usize, usize, T)],
    ) -> AnomalyResult<Self> {
        let mut lil = LilMatrix::new(nrows, ncols);
        let mut sorted: Vec<(usize, usize, T)> = Vec::with_capacity(triplets.len());
        for &(r, c, v) in triplets {
            if r >= nrows || c >= ncols {
                return Err(AnomalyError::InvalidMatrix(format!(
                    "triplet ({}, {}) out of bounds for shape ({}, {})",
                    r, c, nrows, ncols
                )));
            }
            sorted.push((r, c, v));
        }
        // Stable sort keeps input order among duplicates
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut start = 0;
        while start < sorted.len() {
            let row = sorted[start].0;
            let mut end = start;
            let mut cols: Vec<usize> = Vec::new();
            let mut vals: Vec<T> = Vec::new();
            while end < sorted.len() && sorted[end].0 == row {
                let (_, c, v) = sorted[end];
                if cols.last() == Some(&c) {
                    if let Some(last) = vals.last_mut() {
                        *last = v;
                    }
                } else {
                    cols.push(c);
                    vals.push(v);
                }
                end += 1;
            }
            lil.set_row(row, cols, vals)?;
            start = end;
        }

        Ok(lil.into_csr())
    }

    /// Build from dense rows, storing every entry that is not `T::zero()`.
    pub fn from_dense(rows: &[Vec<T>]) -> AnomalyResult<Self> {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(AnomalyError::InvalidMatrix(format!(
                    "dense row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    ncols
                )));
            }
            for (c, &v) in row.iter().enumerate() {
                if v != T::zero() {
                    indices.push(c);
                    data.push(v);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self::from_parts_unchecked(rows.len(), ncols, indptr, indices, data))
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= nrows`.
    pub fn row(&self, r: usize) -> SparseRow<'_, T> {
        let (start, end) = (self.indptr[r], self.indptr[r + 1]);
        SparseRow {
            indices: &self.indices[start..end],
            values: &self.data[start..end],
        }
    }

    /// Stored value at `(r, c)`, or `None` if the position is not in the
    /// pattern or out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<T> {
        if r >= self.nrows {
            return None;
        }
        let row = self.row(r);
        row.indices.binary_search(&c).ok().map(|pos| row.values[pos])
    }

    /// Dense copy of row `r` widened to `f64`.
    pub fn row_to_dense(&self, r: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.ncols];
        for (c, v) in self.row(r).iter() {
            dense[c] = v.to_f64();
        }
        dense
    }

    /// Iterate every stored `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.nrows).flat_map(move |r| self.row(r).iter().map(move |(c, v)| (r, c, v)))
    }

    /// Euclidean distance between row `a` of `self` and row `b` of `other`.
    pub fn row_distance(&self, a: usize, other: &CsrMatrix<T>, b: usize) -> f64 {
        self.row(a).euclidean_distance(&other.row(b))
    }

    /// Copy into the row-mutable layout. O(nnz).
    pub fn to_lil(&self) -> LilMatrix<T> {
        LilMatrix::from_csr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrMatrix<f32> {
        // [[0, 2, 0],
        //  [1, 0, 3],
        //  [0, 0, 0]]
        CsrMatrix::new(3, 3, vec![0, 1, 3, 3], vec![1, 0, 2], vec![2.0, 1.0, 3.0]).unwrap()
    }

    #[test]
    fn test_new_valid() {
        let m = sample();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 2), Some(3.0));
        assert_eq!(m.get(0, 0), None);
        assert_eq!(m.get(7, 0), None);
    }

    #[test]
    fn test_new_rejects_bad_indptr() {
        let err = CsrMatrix::<f32>::new(2, 2, vec![0, 1], vec![0], vec![1.0]).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidMatrix(_)));

        let err = CsrMatrix::<f32>::new(2, 2, vec![0, 2, 1], vec![0, 1], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidMatrix(_)));
    }

    #[test]
    fn test_new_rejects_indptr_past_end() {
        // Row 0 would span 0..5 over only two stored entries
        let err = CsrMatrix::<f32>::new(2, 2, vec![0, 5, 2], vec![0, 1], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidMatrix(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_new_rejects_overflowing_nrows() {
        let err = CsrMatrix::<f32>::new(usize::MAX, 2, vec![0], vec![], vec![]).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidMatrix(_)));
    }

    #[test]
    fn test_serde_rejects_corrupt_indptr() {
        let past_end = r#"{"nrows":2,"ncols":2,"indptr":[0,5,2],"indices":[0,1],"data":[1.0,1.0]}"#;
        assert!(serde_json::from_str::<CsrMatrix<f32>>(past_end).is_err());

        let huge = format!(
            r#"{{"nrows":{},"ncols":2,"indptr":[0],"indices":[],"data":[]}}"#,
            usize::MAX
        );
        assert!(serde_json::from_str::<CsrMatrix<f32>>(&huge).is_err());
    }

    #[test]
    fn test_new_rejects_unsorted_columns() {
        let err = CsrMatrix::<f32>::new(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 1.0]).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn test_new_rejects_out_of_bounds_column() {
        let err = CsrMatrix::<f32>::new(1, 2, vec![0, 1], vec![2], vec![1.0]).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_from_dense_matches_new() {
        let dense = vec![
            vec![0.0f32, 2.0, 0.0],
            vec![1.0, 0.0, 3.0],
            vec![0.0, 0.0, 0.0],
        ];
        assert_eq!(CsrMatrix::from_dense(&dense).unwrap(), sample());
    }

    #[test]
    fn test_from_dense_ragged_rows() {
        let dense = vec![vec![1i32, 0], vec![1]];
        assert!(CsrMatrix::from_dense(&dense).is_err());
    }

    #[test]
    fn test_from_triplets_last_wins() {
        let m = CsrMatrix::from_triplets(2, 2, &[(1, 1, 5i32), (0, 1, 1), (1, 1, 7)]).unwrap();
        assert_eq!(m.get(1, 1), Some(7));
        assert_eq!(m.get(0, 1), Some(1));
        assert_eq!(m.nnz(), 2);
    }

    #[test]
    fn test_from_triplets_out_of_bounds() {
        assert!(CsrMatrix::from_triplets(2, 2, &[(2, 0, 1u8)]).is_err());
    }

    #[test]
    fn test_row_distance_matches_dense() {
        let m = sample();
        // Row 0 = [0, 2, 0], row 1 = [1, 0, 3]: sqrt(1 + 4 + 9)
        assert!((m.row_distance(0, &m, 1) - 14.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.row_distance(2, &m, 2), 0.0);
        assert!((m.row_distance(1, &m, 2) - 10.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_row_to_dense() {
        assert_eq!(sample().row_to_dense(1), vec![1.0, 0.0, 3.0]);
    }

    #[test]
    fn test_iter_row_major() {
        let entries: Vec<_> = sample().iter().collect();
        assert_eq!(entries, vec![(0, 1, 2.0), (1, 0, 1.0), (1, 2, 3.0)]);
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: CsrMatrix<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());

        let bad = r#"{"nrows":1,"ncols":2,"indptr":[0,2],"indices":[1,0],"data":[1.0,1.0]}"#;
        assert!(serde_json::from_str::<CsrMatrix<f32>>(bad).is_err());
    }
}
