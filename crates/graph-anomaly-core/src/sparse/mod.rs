//! Sparse matrix primitives for graph adjacency and node attributes.
//!
//! Two layouts are provided:
//!
//! - [`CsrMatrix`]: compressed sparse row, immutable and compact. This is the
//!   canonical input and return form of every injector.
//! - [`LilMatrix`]: list-of-lists, one sorted column list per row. Rows can be
//!   replaced wholesale, which is what the injectors need while planting.
//!
//! Converting between the two is an explicit O(nnz) step
//! ([`CsrMatrix::to_lil`], [`LilMatrix::into_csr`]); neither type caches the
//! other.
//!
//! # Invariants
//!
//! - Column indices within a row are strictly ascending (sorted, no duplicates)
//! - Every column index is `< ncols`
//! - Stored values may be zero; the sparsity pattern is what defines an edge

mod csr;
mod lil;

pub use csr::{CsrMatrix, CsrParts, SparseRow};
pub use lil::LilMatrix;

use std::fmt::Debug;

/// Element type of a sparse matrix.
///
/// Covers the numeric dtypes graph datasets ship with. `one()` is the
/// presence marker written by clique injection; `to_f64()` feeds distance
/// computations.
pub trait Scalar: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Additive identity. Dense conversion drops entries equal to this.
    fn zero() -> Self;
    /// Unit weight.
    fn one() -> Self;
    /// Lossy widening used for Euclidean distances.
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn zero() -> Self {
                    0 as $t
                }

                #[inline]
                fn one() -> Self {
                    1 as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

impl Scalar for bool {
    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
}

/// Check that `indices` is strictly ascending and bounded by `ncols`.
pub(crate) fn validate_row_indices(row: usize, indices: &[usize], ncols: usize) -> Result<(), String> {
    let mut prev: Option<usize> = None;
    for &col in indices {
        if col >= ncols {
            return Err(format!(
                "row {} has column index {} out of bounds for {} columns",
                row, col, ncols
            ));
        }
        if let Some(p) = prev {
            if col <= p {
                // col == p is a duplicate, col < p is unsorted
                return Err(format!(
                    "row {} column indices are not strictly ascending at {}",
                    row, col
                ));
            }
        }
        prev = Some(col);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_units() {
        assert_eq!(f32::one(), 1.0);
        assert_eq!(i64::zero(), 0);
        assert_eq!(u8::one().to_f64(), 1.0);
        assert!(bool::one());
        assert!(!bool::zero());
        assert_eq!(true.to_f64(), 1.0);
    }

    #[test]
    fn test_validate_row_indices() {
        assert!(validate_row_indices(0, &[0, 2, 5], 6).is_ok());
        assert!(validate_row_indices(0, &[], 0).is_ok());
        assert!(validate_row_indices(0, &[0, 6], 6).is_err());
        assert!(validate_row_indices(0, &[3, 3], 6).is_err());
        assert!(validate_row_indices(0, &[4, 1], 6).is_err());
    }
}
