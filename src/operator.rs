//! Matrix-free views of the Jacobian and the Lagrangian Hessian.
//!
//! An operator borrows the model and the point it was built at, and applies
//! the matrix through the model's product primitives, so the matrix is never
//! formed. Every application goes through [`NlpModelExt`] and is counted.

use num_traits::Float;

use crate::coord::CooMatrix;
use crate::error::Result;
use crate::model::{NlpModel, NlpModelExt};

/// A linear map `R^ncols → R^nrows` with an adjoint.
pub trait LinearOperator<F: Float> {
    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Whether forward and adjoint application coincide.
    fn is_symmetric(&self) -> bool {
        false
    }

    /// `out = A·v`.
    fn apply_into(&mut self, v: &[F], out: &mut [F]) -> Result<()>;

    /// `out = Aᵀ·v`.
    fn apply_adjoint_into(&mut self, v: &[F], out: &mut [F]) -> Result<()>;

    fn apply(&mut self, v: &[F]) -> Result<Vec<F>> {
        let mut out = vec![F::zero(); self.nrows()];
        self.apply_into(v, &mut out)?;
        Ok(out)
    }

    fn apply_adjoint(&mut self, v: &[F]) -> Result<Vec<F>> {
        let mut out = vec![F::zero(); self.ncols()];
        self.apply_adjoint_into(v, &mut out)?;
        Ok(out)
    }
}

/// `J(x)` as an `ncon × nvar` operator: forward is `jprod`, adjoint is `jtprod`.
pub struct JacobianOperator<'a, F, M: ?Sized> {
    model: &'a mut M,
    x: &'a [F],
}

impl<'a, F: Float, M: NlpModel<F> + ?Sized> JacobianOperator<'a, F, M> {
    pub fn new(model: &'a mut M, x: &'a [F]) -> Self {
        JacobianOperator { model, x }
    }

    /// The point the Jacobian is taken at.
    pub fn point(&self) -> &[F] {
        self.x
    }
}

impl<F: Float, M: NlpModel<F> + ?Sized> LinearOperator<F> for JacobianOperator<'_, F, M> {
    fn nrows(&self) -> usize {
        self.model.meta().ncon
    }

    fn ncols(&self) -> usize {
        self.model.meta().nvar
    }

    fn apply_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.model.jprod_into(self.x, v, out)?;
        Ok(())
    }

    fn apply_adjoint_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.model.jtprod_into(self.x, v, out)?;
        Ok(())
    }
}

/// `σ·∇²f(x) + Σ yᵢ·∇²cᵢ(x)` as a symmetric `nvar × nvar` operator built on `hprod`.
pub struct HessianOperator<'a, F, M: ?Sized> {
    model: &'a mut M,
    x: &'a [F],
    y: Option<&'a [F]>,
    obj_weight: F,
}

impl<'a, F: Float, M: NlpModel<F> + ?Sized> HessianOperator<'a, F, M> {
    pub fn new(model: &'a mut M, x: &'a [F], y: Option<&'a [F]>, obj_weight: F) -> Self {
        HessianOperator {
            model,
            x,
            y,
            obj_weight,
        }
    }

    pub fn point(&self) -> &[F] {
        self.x
    }

    pub fn multipliers(&self) -> Option<&[F]> {
        self.y
    }

    pub fn obj_weight(&self) -> F {
        self.obj_weight
    }
}

impl<F: Float, M: NlpModel<F> + ?Sized> LinearOperator<F> for HessianOperator<'_, F, M> {
    fn nrows(&self) -> usize {
        self.model.meta().nvar
    }

    fn ncols(&self) -> usize {
        self.model.meta().nvar
    }

    fn is_symmetric(&self) -> bool {
        true
    }

    fn apply_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.model
            .hprod_into(self.x, self.y, v, self.obj_weight, out)?;
        Ok(())
    }

    fn apply_adjoint_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.apply_into(v, out)
    }
}

/// An operator that writes every application into caller-owned buffers.
///
/// Results are borrowed from the buffers, so the borrow checker rules out two
/// applications being alive at once. A symmetric operator may omit the adjoint
/// buffer; adjoint application then reuses the forward buffer.
pub struct BufferedOperator<'b, F, Op> {
    op: Op,
    forward: &'b mut [F],
    adjoint: Option<&'b mut [F]>,
}

impl<'b, F: Float, Op: LinearOperator<F>> BufferedOperator<'b, F, Op> {
    /// # Panics
    ///
    /// If `forward` is not `nrows` long, `adjoint` is not `ncols` long, or
    /// `adjoint` is missing for an unsymmetric operator.
    #[track_caller]
    pub fn new(op: Op, forward: &'b mut [F], adjoint: Option<&'b mut [F]>) -> Self {
        assert_eq!(forward.len(), op.nrows(), "forward buffer must have length nrows");
        match &adjoint {
            Some(buf) => assert_eq!(buf.len(), op.ncols(), "adjoint buffer must have length ncols"),
            None => assert!(op.is_symmetric(), "an unsymmetric operator needs an adjoint buffer"),
        }
        BufferedOperator {
            op,
            forward,
            adjoint,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.op.shape()
    }

    /// `A·v`, written into the forward buffer.
    pub fn apply(&mut self, v: &[F]) -> Result<&[F]> {
        self.op.apply_into(v, self.forward)?;
        Ok(&*self.forward)
    }

    /// `Aᵀ·v`, written into the adjoint buffer.
    pub fn apply_adjoint(&mut self, v: &[F]) -> Result<&[F]> {
        match self.adjoint.as_deref_mut() {
            Some(buf) => {
                self.op.apply_adjoint_into(v, buf)?;
                Ok(&*buf)
            }
            None => {
                self.op.apply_adjoint_into(v, self.forward)?;
                Ok(&*self.forward)
            }
        }
    }

    /// Release the buffers and return the wrapped operator.
    pub fn into_inner(self) -> Op {
        self.op
    }
}

impl<F: Float> LinearOperator<F> for CooMatrix<F> {
    fn nrows(&self) -> usize {
        self.nrows
    }

    fn ncols(&self) -> usize {
        self.ncols
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    fn apply_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.mul_vec_into(v, out);
        Ok(())
    }

    fn apply_adjoint_into(&mut self, v: &[F], out: &mut [F]) -> Result<()> {
        self.tr_mul_vec_into(v, out);
        Ok(())
    }
}
