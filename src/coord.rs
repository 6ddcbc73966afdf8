//! Coordinate (triplet) storage for Jacobians and Hessians.
//!
//! Models report sparsity as two index sequences (rows, cols) that never change
//! for the life of the model, and values as a third sequence aligned with them.
//! These types pair the two once a caller wants an assembled matrix.

use num_traits::Float;

/// Sparse matrix in coordinate format.
///
/// When `symmetric` is set, only the lower triangle (`rows[k] >= cols[k]`) is
/// stored and the upper triangle is implied. Duplicate entries are summed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooMatrix<F> {
    pub nrows: usize,
    pub ncols: usize,
    /// Row indices (0-based).
    pub rows: Vec<usize>,
    /// Column indices (0-based).
    pub cols: Vec<usize>,
    pub vals: Vec<F>,
    pub symmetric: bool,
}

impl<F: Float> CooMatrix<F> {
    /// General (unsymmetric) matrix.
    ///
    /// # Panics
    ///
    /// If the three sequences differ in length or an index is out of range.
    pub fn new(nrows: usize, ncols: usize, rows: Vec<usize>, cols: Vec<usize>, vals: Vec<F>) -> Self {
        assert_eq!(rows.len(), cols.len(), "rows and cols must have equal length");
        assert_eq!(rows.len(), vals.len(), "rows and vals must have equal length");
        assert!(rows.iter().all(|&i| i < nrows), "row index out of range");
        assert!(cols.iter().all(|&j| j < ncols), "column index out of range");
        CooMatrix {
            nrows,
            ncols,
            rows,
            cols,
            vals,
            symmetric: false,
        }
    }

    /// Symmetric `n × n` matrix given by its lower triangle.
    ///
    /// # Panics
    ///
    /// As [`CooMatrix::new`], and if any entry lies above the diagonal.
    pub fn symmetric(n: usize, rows: Vec<usize>, cols: Vec<usize>, vals: Vec<F>) -> Self {
        assert!(
            rows.iter().zip(&cols).all(|(&i, &j)| i >= j),
            "symmetric storage holds the lower triangle only"
        );
        let mut m = Self::new(n, n, rows, cols, vals);
        m.symmetric = true;
        m
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.vals.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn entries(&self) -> impl Iterator<Item = (usize, usize, F)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.vals)
            .map(|((&i, &j), &v)| (i, j, v))
    }

    /// Dense row-major copy, `dense[i][j]`.
    pub fn to_dense(&self) -> Vec<Vec<F>> {
        let mut dense = vec![vec![F::zero(); self.ncols]; self.nrows];
        for (i, j, v) in self.entries() {
            dense[i][j] = dense[i][j] + v;
            if self.symmetric && i != j {
                dense[j][i] = dense[j][i] + v;
            }
        }
        dense
    }

    /// `out = A·v`.
    pub fn mul_vec_into(&self, v: &[F], out: &mut [F]) {
        assert_eq!(v.len(), self.ncols, "v must have length ncols");
        assert_eq!(out.len(), self.nrows, "out must have length nrows");
        out.fill(F::zero());
        for (i, j, a) in self.entries() {
            out[i] = out[i] + a * v[j];
            if self.symmetric && i != j {
                out[j] = out[j] + a * v[i];
            }
        }
    }

    /// `A·v` in a fresh vector.
    pub fn mul_vec(&self, v: &[F]) -> Vec<F> {
        let mut out = vec![F::zero(); self.nrows];
        self.mul_vec_into(v, &mut out);
        out
    }

    /// `out = Aᵀ·v`.
    pub fn tr_mul_vec_into(&self, v: &[F], out: &mut [F]) {
        if self.symmetric {
            return self.mul_vec_into(v, out);
        }
        assert_eq!(v.len(), self.nrows, "v must have length nrows");
        assert_eq!(out.len(), self.ncols, "out must have length ncols");
        out.fill(F::zero());
        for (i, j, a) in self.entries() {
            out[j] = out[j] + a * v[i];
        }
    }

    /// `Aᵀ·v` in a fresh vector.
    pub fn tr_mul_vec(&self, v: &[F]) -> Vec<F> {
        let mut out = vec![F::zero(); self.ncols];
        self.tr_mul_vec_into(v, &mut out);
        out
    }
}

/// Sparse vector: the nonzero `values` at `indices` of a length-`len` vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseVector<F> {
    pub len: usize,
    pub indices: Vec<usize>,
    pub values: Vec<F>,
}

impl<F: Float> SparseVector<F> {
    /// # Panics
    ///
    /// If `indices` and `values` differ in length or an index is out of range.
    pub fn new(len: usize, indices: Vec<usize>, values: Vec<F>) -> Self {
        assert_eq!(indices.len(), values.len(), "indices and values must have equal length");
        assert!(indices.iter().all(|&i| i < len), "index out of range");
        SparseVector {
            len,
            indices,
            values,
        }
    }

    /// Keep the nonzero entries of a dense vector.
    pub fn from_dense(dense: &[F]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, &v)| (i, v))
            .unzip();
        SparseVector {
            len: dense.len(),
            indices,
            values,
        }
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn to_dense(&self) -> Vec<F> {
        let mut dense = vec![F::zero(); self.len];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            dense[i] = dense[i] + v;
        }
        dense
    }
}
