//! nalgebra adapters for coordinate matrices.
//!
//! Thin conversions from [`CooMatrix`] and [`SparseVector`] to `DMatrix<F>` / `DVector<F>`.

use nalgebra::{DMatrix, DVector, RealField};

use crate::coord::{CooMatrix, SparseVector};

impl<F: num_traits::Float + RealField> CooMatrix<F> {
    /// Dense `DMatrix`; symmetric storage is mirrored.
    pub fn to_dmatrix(&self) -> DMatrix<F> {
        let mut m = DMatrix::zeros(self.nrows, self.ncols);
        for ((&i, &j), &v) in self.rows.iter().zip(&self.cols).zip(&self.vals) {
            m[(i, j)] += v;
            if self.symmetric && i != j {
                m[(j, i)] += v;
            }
        }
        m
    }
}

impl<F: num_traits::Float + RealField> SparseVector<F> {
    pub fn to_dvector(&self) -> DVector<F> {
        DVector::from_vec(self.to_dense())
    }
}
