//! The model evaluation contract.
//!
//! [`NlpModel`] is what a concrete problem implements: metadata, counters and
//! whichever evaluation hooks it supports. Every hook defaults to
//! [`NlpError::NotImplemented`](crate::NlpError::NotImplemented).
//!
//! [`NlpModelExt`] is what algorithms call. It is implemented for every model,
//! checks buffer shapes, increments the matching counter exactly once, then
//! dispatches to the hook. Out-of-place forms allocate a correctly sized buffer
//! and delegate to the in-place form.

use std::borrow::Cow;

use num_traits::Float;

use crate::coord::{CooMatrix, SparseVector};
use crate::counters::{Counter, Counters};
use crate::error::{not_implemented, Result};
use crate::meta::NlpModelMeta;
use crate::operator::{BufferedOperator, HessianOperator, JacobianOperator};

/// A nonlinear program
///
/// ```text
/// min  f(x)   s.t.  lcon ≤ c(x) ≤ ucon,  lvar ≤ x ≤ uvar
/// ```
///
/// described by [`NlpModelMeta`]. Implementors provide `meta`, the counter
/// accessors, `eval_obj`, and any other hook they support. Hooks receive
/// buffers already checked against the metadata and must fill all of them.
///
/// The Lagrangian Hessian is `σ·∇²f(x) + Σ yᵢ·∇²cᵢ(x)` and is always reported
/// through its lower triangle.
pub trait NlpModel<F: Float> {
    /// Dimensions, bounds and sparsity counts of the problem.
    fn meta(&self) -> &NlpModelMeta<F>;

    /// Evaluations recorded so far.
    fn counters(&self) -> &Counters;

    /// Mutable access for the dispatch layer; models never bump counters themselves.
    fn counters_mut(&mut self) -> &mut Counters;

    /// Objective value `f(x)`.
    fn eval_obj(&mut self, x: &[F]) -> Result<F> {
        let _ = x;
        not_implemented("obj")
    }

    /// Objective gradient into `g`.
    fn eval_grad(&mut self, x: &[F], g: &mut [F]) -> Result<()> {
        let _ = (x, g);
        not_implemented("grad_into")
    }

    /// Constraint values into `c`. Never called when `ncon = 0`.
    fn eval_cons(&mut self, x: &[F], c: &mut [F]) -> Result<()> {
        let _ = (x, c);
        not_implemented("cons_into")
    }

    /// Value of constraint `j`.
    fn eval_jth_con(&mut self, x: &[F], j: usize) -> Result<F> {
        let _ = (x, j);
        not_implemented("jth_con")
    }

    /// Gradient of constraint `j` into `g`.
    fn eval_jth_congrad(&mut self, x: &[F], j: usize, g: &mut [F]) -> Result<()> {
        let _ = (x, j, g);
        not_implemented("jth_congrad_into")
    }

    /// Gradient of constraint `j` as a sparse vector of length `nvar`.
    fn eval_jth_sparse_congrad(&mut self, x: &[F], j: usize) -> Result<SparseVector<F>> {
        let _ = (x, j);
        not_implemented("jth_sparse_congrad")
    }

    /// Jacobian sparsity pattern, `nnzj` entries. Must not depend on any point.
    fn fill_jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        let _ = (rows, cols);
        not_implemented("jac_structure_into")
    }

    /// Jacobian values aligned with [`fill_jac_structure`](Self::fill_jac_structure).
    fn eval_jac_coord(&mut self, x: &[F], vals: &mut [F]) -> Result<()> {
        let _ = (x, vals);
        not_implemented("jac_coord_into")
    }

    /// Assembled Jacobian.
    ///
    /// Defaults to pairing the structure with the coordinate values. A model
    /// that tracks no sparsity may return a fully populated matrix instead,
    /// giving up structure reuse.
    fn eval_jac(&mut self, x: &[F]) -> Result<CooMatrix<F>> {
        let meta = self.meta();
        let (m, n, nnz) = (meta.ncon, meta.nvar, meta.nnzj);
        let mut rows = vec![0; nnz];
        let mut cols = vec![0; nnz];
        self.fill_jac_structure(&mut rows, &mut cols)?;
        let mut vals = vec![F::zero(); nnz];
        self.eval_jac_coord(x, &mut vals)?;
        Ok(CooMatrix::new(m, n, rows, cols, vals))
    }

    /// `jv = J(x)·v`.
    fn eval_jprod(&mut self, x: &[F], v: &[F], jv: &mut [F]) -> Result<()> {
        let _ = (x, v, jv);
        not_implemented("jprod_into")
    }

    /// `jtv = J(x)ᵀ·v`.
    fn eval_jtprod(&mut self, x: &[F], v: &[F], jtv: &mut [F]) -> Result<()> {
        let _ = (x, v, jtv);
        not_implemented("jtprod_into")
    }

    /// Lower-triangular Hessian sparsity pattern, `nnzh` entries with `rows[k] >= cols[k]`.
    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        let _ = (rows, cols);
        not_implemented("hess_structure_into")
    }

    /// Lagrangian Hessian values aligned with [`fill_hess_structure`](Self::fill_hess_structure).
    fn eval_hess_coord(&mut self, x: &[F], y: &[F], obj_weight: F, vals: &mut [F]) -> Result<()> {
        let _ = (x, y, obj_weight, vals);
        not_implemented("hess_coord_into")
    }

    /// Assembled lower triangle of the Lagrangian Hessian.
    ///
    /// Same trade-off as [`eval_jac`](Self::eval_jac).
    fn eval_hess(&mut self, x: &[F], y: &[F], obj_weight: F) -> Result<CooMatrix<F>> {
        let meta = self.meta();
        let (n, nnz) = (meta.nvar, meta.nnzh);
        let mut rows = vec![0; nnz];
        let mut cols = vec![0; nnz];
        self.fill_hess_structure(&mut rows, &mut cols)?;
        let mut vals = vec![F::zero(); nnz];
        self.eval_hess_coord(x, y, obj_weight, &mut vals)?;
        Ok(CooMatrix::symmetric(n, rows, cols, vals))
    }

    /// `hv = (σ·∇²f(x) + Σ yᵢ·∇²cᵢ(x))·v`.
    fn eval_hprod(&mut self, x: &[F], y: &[F], v: &[F], obj_weight: F, hv: &mut [F]) -> Result<()> {
        let _ = (x, y, v, obj_weight, hv);
        not_implemented("hprod_into")
    }

    /// `hv = ∇²c_j(x)·v`.
    fn eval_jth_hprod(&mut self, x: &[F], v: &[F], j: usize, hv: &mut [F]) -> Result<()> {
        let _ = (x, v, j, hv);
        not_implemented("jth_hprod_into")
    }

    /// `ghv[j] = gᵀ·∇²c_j(x)·v` for every constraint.
    fn eval_ghjvprod(&mut self, x: &[F], g: &[F], v: &[F], ghv: &mut [F]) -> Result<()> {
        let _ = (x, g, v, ghv);
        not_implemented("ghjvprod_into")
    }

    /// Rescale the variables by `s`.
    fn varscale(&mut self, s: &[F]) -> Result<()> {
        let _ = s;
        not_implemented("varscale")
    }

    /// Rescale the Lagrangian by `sigma`.
    fn lagscale(&mut self, sigma: F) -> Result<()> {
        let _ = sigma;
        not_implemented("lagscale")
    }

    /// Rescale the constraints by `s`.
    fn conscale(&mut self, s: &[F]) -> Result<()> {
        let _ = s;
        not_implemented("conscale")
    }

    /// Feed a pair of vectors to a model that updates itself incrementally,
    /// such as a step/gradient-change pair or a new cut.
    fn push(&mut self, s: &[F], y: &[F]) -> Result<()> {
        let _ = (s, y);
        not_implemented("push")
    }
}

#[track_caller]
fn check_len(op: &str, name: &str, actual: usize, expected: usize) {
    assert!(
        actual == expected,
        "{op}: `{name}` has length {actual}, expected {expected}"
    );
}

#[track_caller]
fn check_index(op: &str, j: usize, ncon: usize) {
    assert!(j < ncon, "{op}: constraint index {j} out of range (ncon = {ncon})");
}

#[track_caller]
fn multipliers<'y, F: Float>(op: &str, ncon: usize, y: Option<&'y [F]>) -> Cow<'y, [F]> {
    match y {
        Some(y) => {
            check_len(op, "y", y.len(), ncon);
            Cow::Borrowed(y)
        }
        None => Cow::Owned(vec![F::zero(); ncon]),
    }
}

/// The counted, shape-checked operation vocabulary available on every [`NlpModel`].
///
/// In-place forms end in `_into` and hand back the caller's buffer. Passing a
/// buffer of the wrong length, or a constraint index `j >= ncon`, panics.
/// Multipliers `y` are optional; `None` means zero multipliers, in which case
/// the Lagrangian Hessian reduces to `σ·∇²f(x)`.
pub trait NlpModelExt<F: Float>: NlpModel<F> {
    /// Objective value. Counts [`Counter::Obj`].
    #[track_caller]
    fn obj(&mut self, x: &[F]) -> Result<F> {
        check_len("obj", "x", x.len(), self.meta().nvar);
        self.counters_mut().increment(Counter::Obj);
        self.eval_obj(x)
    }

    /// Objective gradient into `g`. Counts [`Counter::Grad`].
    #[track_caller]
    fn grad_into<'g>(&mut self, x: &[F], g: &'g mut [F]) -> Result<&'g mut [F]> {
        let n = self.meta().nvar;
        check_len("grad_into", "x", x.len(), n);
        check_len("grad_into", "g", g.len(), n);
        self.counters_mut().increment(Counter::Grad);
        self.eval_grad(x, g)?;
        Ok(g)
    }

    #[track_caller]
    fn grad(&mut self, x: &[F]) -> Result<Vec<F>> {
        let mut g = vec![F::zero(); x.len()];
        self.grad_into(x, &mut g)?;
        Ok(g)
    }

    /// Objective and gradient. Counts one objective and one gradient evaluation.
    #[track_caller]
    fn objgrad_into<'g>(&mut self, x: &[F], g: &'g mut [F]) -> Result<(F, &'g mut [F])> {
        let f = self.obj(x)?;
        let g = self.grad_into(x, g)?;
        Ok((f, g))
    }

    #[track_caller]
    fn objgrad(&mut self, x: &[F]) -> Result<(F, Vec<F>)> {
        let f = self.obj(x)?;
        let g = self.grad(x)?;
        Ok((f, g))
    }

    /// Constraint values into `c`. Counts [`Counter::Cons`].
    ///
    /// With `ncon = 0` this returns the empty buffer at once, without calling
    /// the model or counting.
    #[track_caller]
    fn cons_into<'c>(&mut self, x: &[F], c: &'c mut [F]) -> Result<&'c mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("cons_into", "x", x.len(), n);
        check_len("cons_into", "c", c.len(), m);
        if m == 0 {
            return Ok(c);
        }
        self.counters_mut().increment(Counter::Cons);
        self.eval_cons(x, c)?;
        Ok(c)
    }

    #[track_caller]
    fn cons(&mut self, x: &[F]) -> Result<Vec<F>> {
        let mut c = vec![F::zero(); self.meta().ncon];
        self.cons_into(x, &mut c)?;
        Ok(c)
    }

    /// Objective and constraints. Counts one of each.
    #[track_caller]
    fn objcons_into<'c>(&mut self, x: &[F], c: &'c mut [F]) -> Result<(F, &'c mut [F])> {
        let f = self.obj(x)?;
        let c = self.cons_into(x, c)?;
        Ok((f, c))
    }

    #[track_caller]
    fn objcons(&mut self, x: &[F]) -> Result<(F, Vec<F>)> {
        let f = self.obj(x)?;
        let c = self.cons(x)?;
        Ok((f, c))
    }

    /// Value of constraint `j`. Counts [`Counter::JCon`].
    #[track_caller]
    fn jth_con(&mut self, x: &[F], j: usize) -> Result<F> {
        let meta = self.meta();
        check_len("jth_con", "x", x.len(), meta.nvar);
        check_index("jth_con", j, meta.ncon);
        self.counters_mut().increment(Counter::JCon);
        self.eval_jth_con(x, j)
    }

    /// Gradient of constraint `j` into `g`. Counts [`Counter::JGrad`].
    #[track_caller]
    fn jth_congrad_into<'g>(&mut self, x: &[F], j: usize, g: &'g mut [F]) -> Result<&'g mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("jth_congrad_into", "x", x.len(), n);
        check_len("jth_congrad_into", "g", g.len(), n);
        check_index("jth_congrad_into", j, m);
        self.counters_mut().increment(Counter::JGrad);
        self.eval_jth_congrad(x, j, g)?;
        Ok(g)
    }

    #[track_caller]
    fn jth_congrad(&mut self, x: &[F], j: usize) -> Result<Vec<F>> {
        let mut g = vec![F::zero(); x.len()];
        self.jth_congrad_into(x, j, &mut g)?;
        Ok(g)
    }

    /// Sparse gradient of constraint `j`. Counts [`Counter::JGrad`].
    #[track_caller]
    fn jth_sparse_congrad(&mut self, x: &[F], j: usize) -> Result<SparseVector<F>> {
        let meta = self.meta();
        check_len("jth_sparse_congrad", "x", x.len(), meta.nvar);
        check_index("jth_sparse_congrad", j, meta.ncon);
        self.counters_mut().increment(Counter::JGrad);
        self.eval_jth_sparse_congrad(x, j)
    }

    /// Jacobian sparsity pattern into `rows`/`cols` (length `nnzj`). Not counted.
    #[track_caller]
    fn jac_structure_into<'s>(
        &self,
        rows: &'s mut [usize],
        cols: &'s mut [usize],
    ) -> Result<(&'s mut [usize], &'s mut [usize])> {
        let nnz = self.meta().nnzj;
        check_len("jac_structure_into", "rows", rows.len(), nnz);
        check_len("jac_structure_into", "cols", cols.len(), nnz);
        self.fill_jac_structure(rows, cols)?;
        Ok((rows, cols))
    }

    #[track_caller]
    fn jac_structure(&self) -> Result<(Vec<usize>, Vec<usize>)> {
        let nnz = self.meta().nnzj;
        let mut rows = vec![0; nnz];
        let mut cols = vec![0; nnz];
        self.jac_structure_into(&mut rows, &mut cols)?;
        Ok((rows, cols))
    }

    /// Jacobian values at `x`, aligned with [`jac_structure`](Self::jac_structure).
    /// Counts [`Counter::Jac`].
    #[track_caller]
    fn jac_coord_into<'v>(&mut self, x: &[F], vals: &'v mut [F]) -> Result<&'v mut [F]> {
        let meta = self.meta();
        check_len("jac_coord_into", "x", x.len(), meta.nvar);
        check_len("jac_coord_into", "vals", vals.len(), meta.nnzj);
        self.counters_mut().increment(Counter::Jac);
        self.eval_jac_coord(x, vals)?;
        Ok(vals)
    }

    #[track_caller]
    fn jac_coord(&mut self, x: &[F]) -> Result<Vec<F>> {
        let mut vals = vec![F::zero(); self.meta().nnzj];
        self.jac_coord_into(x, &mut vals)?;
        Ok(vals)
    }

    /// Assembled `ncon × nvar` Jacobian. Counts [`Counter::Jac`].
    #[track_caller]
    fn jac(&mut self, x: &[F]) -> Result<CooMatrix<F>> {
        check_len("jac", "x", x.len(), self.meta().nvar);
        self.counters_mut().increment(Counter::Jac);
        self.eval_jac(x)
    }

    /// `jv = J(x)·v`. Counts [`Counter::JProd`].
    #[track_caller]
    fn jprod_into<'v>(&mut self, x: &[F], v: &[F], jv: &'v mut [F]) -> Result<&'v mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("jprod_into", "x", x.len(), n);
        check_len("jprod_into", "v", v.len(), n);
        check_len("jprod_into", "jv", jv.len(), m);
        self.counters_mut().increment(Counter::JProd);
        self.eval_jprod(x, v, jv)?;
        Ok(jv)
    }

    #[track_caller]
    fn jprod(&mut self, x: &[F], v: &[F]) -> Result<Vec<F>> {
        let mut jv = vec![F::zero(); self.meta().ncon];
        self.jprod_into(x, v, &mut jv)?;
        Ok(jv)
    }

    /// `jtv = J(x)ᵀ·v`. Counts [`Counter::JtProd`].
    #[track_caller]
    fn jtprod_into<'v>(&mut self, x: &[F], v: &[F], jtv: &'v mut [F]) -> Result<&'v mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("jtprod_into", "x", x.len(), n);
        check_len("jtprod_into", "v", v.len(), m);
        check_len("jtprod_into", "jtv", jtv.len(), n);
        self.counters_mut().increment(Counter::JtProd);
        self.eval_jtprod(x, v, jtv)?;
        Ok(jtv)
    }

    #[track_caller]
    fn jtprod(&mut self, x: &[F], v: &[F]) -> Result<Vec<F>> {
        let mut jtv = vec![F::zero(); self.meta().nvar];
        self.jtprod_into(x, v, &mut jtv)?;
        Ok(jtv)
    }

    /// The Jacobian at `x` as a linear operator built on `jprod`/`jtprod`.
    ///
    /// Each application allocates its result.
    #[track_caller]
    fn jac_op<'a>(&'a mut self, x: &'a [F]) -> JacobianOperator<'a, F, Self> {
        check_len("jac_op", "x", x.len(), self.meta().nvar);
        JacobianOperator::new(self, x)
    }

    /// Like [`jac_op`](Self::jac_op), but every application writes into `jv`
    /// (forward, length `ncon`) or `jtv` (adjoint, length `nvar`).
    #[track_caller]
    fn jac_op_with_buffers<'a>(
        &'a mut self,
        x: &'a [F],
        jv: &'a mut [F],
        jtv: &'a mut [F],
    ) -> BufferedOperator<'a, F, JacobianOperator<'a, F, Self>> {
        BufferedOperator::new(self.jac_op(x), jv, Some(jtv))
    }

    /// Hessian sparsity pattern into `rows`/`cols` (length `nnzh`). Not counted.
    #[track_caller]
    fn hess_structure_into<'s>(
        &self,
        rows: &'s mut [usize],
        cols: &'s mut [usize],
    ) -> Result<(&'s mut [usize], &'s mut [usize])> {
        let nnz = self.meta().nnzh;
        check_len("hess_structure_into", "rows", rows.len(), nnz);
        check_len("hess_structure_into", "cols", cols.len(), nnz);
        self.fill_hess_structure(rows, cols)?;
        Ok((rows, cols))
    }

    #[track_caller]
    fn hess_structure(&self) -> Result<(Vec<usize>, Vec<usize>)> {
        let nnz = self.meta().nnzh;
        let mut rows = vec![0; nnz];
        let mut cols = vec![0; nnz];
        self.hess_structure_into(&mut rows, &mut cols)?;
        Ok((rows, cols))
    }

    /// Lower-triangular Lagrangian Hessian values, aligned with
    /// [`hess_structure`](Self::hess_structure). Counts [`Counter::Hess`].
    #[track_caller]
    fn hess_coord_into<'v>(
        &mut self,
        x: &[F],
        y: Option<&[F]>,
        obj_weight: F,
        vals: &'v mut [F],
    ) -> Result<&'v mut [F]> {
        let meta = self.meta();
        check_len("hess_coord_into", "x", x.len(), meta.nvar);
        check_len("hess_coord_into", "vals", vals.len(), meta.nnzh);
        let y = multipliers("hess_coord_into", meta.ncon, y);
        self.counters_mut().increment(Counter::Hess);
        self.eval_hess_coord(x, &y, obj_weight, vals)?;
        Ok(vals)
    }

    #[track_caller]
    fn hess_coord(&mut self, x: &[F], y: Option<&[F]>, obj_weight: F) -> Result<Vec<F>> {
        let mut vals = vec![F::zero(); self.meta().nnzh];
        self.hess_coord_into(x, y, obj_weight, &mut vals)?;
        Ok(vals)
    }

    /// Assembled lower triangle of the Lagrangian Hessian. Counts [`Counter::Hess`].
    ///
    /// The result is flagged symmetric; [`CooMatrix::to_dense`] mirrors it.
    #[track_caller]
    fn hess(&mut self, x: &[F], y: Option<&[F]>, obj_weight: F) -> Result<CooMatrix<F>> {
        let meta = self.meta();
        check_len("hess", "x", x.len(), meta.nvar);
        let y = multipliers("hess", meta.ncon, y);
        self.counters_mut().increment(Counter::Hess);
        self.eval_hess(x, &y, obj_weight)
    }

    /// `hv = (σ·∇²f(x) + Σ yᵢ·∇²cᵢ(x))·v`. Counts [`Counter::HProd`].
    #[track_caller]
    fn hprod_into<'v>(
        &mut self,
        x: &[F],
        y: Option<&[F]>,
        v: &[F],
        obj_weight: F,
        hv: &'v mut [F],
    ) -> Result<&'v mut [F]> {
        let meta = self.meta();
        let n = meta.nvar;
        check_len("hprod_into", "x", x.len(), n);
        check_len("hprod_into", "v", v.len(), n);
        check_len("hprod_into", "hv", hv.len(), n);
        let y = multipliers("hprod_into", meta.ncon, y);
        self.counters_mut().increment(Counter::HProd);
        self.eval_hprod(x, &y, v, obj_weight, hv)?;
        Ok(hv)
    }

    #[track_caller]
    fn hprod(&mut self, x: &[F], y: Option<&[F]>, v: &[F], obj_weight: F) -> Result<Vec<F>> {
        let mut hv = vec![F::zero(); self.meta().nvar];
        self.hprod_into(x, y, v, obj_weight, &mut hv)?;
        Ok(hv)
    }

    /// The Lagrangian Hessian at `(x, y)` as a symmetric linear operator built
    /// on `hprod`. Each application allocates its result.
    #[track_caller]
    fn hess_op<'a>(
        &'a mut self,
        x: &'a [F],
        y: Option<&'a [F]>,
        obj_weight: F,
    ) -> HessianOperator<'a, F, Self> {
        let meta = self.meta();
        check_len("hess_op", "x", x.len(), meta.nvar);
        if let Some(y) = y {
            check_len("hess_op", "y", y.len(), meta.ncon);
        }
        HessianOperator::new(self, x, y, obj_weight)
    }

    /// Like [`hess_op`](Self::hess_op), but every application writes into `hv`.
    #[track_caller]
    fn hess_op_with_buffer<'a>(
        &'a mut self,
        x: &'a [F],
        y: Option<&'a [F]>,
        obj_weight: F,
        hv: &'a mut [F],
    ) -> BufferedOperator<'a, F, HessianOperator<'a, F, Self>> {
        BufferedOperator::new(self.hess_op(x, y, obj_weight), hv, None)
    }

    /// `hv = ∇²c_j(x)·v`. Counts [`Counter::JHProd`].
    #[track_caller]
    fn jth_hprod_into<'v>(&mut self, x: &[F], v: &[F], j: usize, hv: &'v mut [F]) -> Result<&'v mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("jth_hprod_into", "x", x.len(), n);
        check_len("jth_hprod_into", "v", v.len(), n);
        check_len("jth_hprod_into", "hv", hv.len(), n);
        check_index("jth_hprod_into", j, m);
        self.counters_mut().increment(Counter::JHProd);
        self.eval_jth_hprod(x, v, j, hv)?;
        Ok(hv)
    }

    #[track_caller]
    fn jth_hprod(&mut self, x: &[F], v: &[F], j: usize) -> Result<Vec<F>> {
        let mut hv = vec![F::zero(); self.meta().nvar];
        self.jth_hprod_into(x, v, j, &mut hv)?;
        Ok(hv)
    }

    /// `ghv[j] = gᵀ·∇²c_j(x)·v` for all `j`. Counts [`Counter::JHProd`].
    #[track_caller]
    fn ghjvprod_into<'v>(&mut self, x: &[F], g: &[F], v: &[F], ghv: &'v mut [F]) -> Result<&'v mut [F]> {
        let meta = self.meta();
        let (n, m) = (meta.nvar, meta.ncon);
        check_len("ghjvprod_into", "x", x.len(), n);
        check_len("ghjvprod_into", "g", g.len(), n);
        check_len("ghjvprod_into", "v", v.len(), n);
        check_len("ghjvprod_into", "ghv", ghv.len(), m);
        self.counters_mut().increment(Counter::JHProd);
        self.eval_ghjvprod(x, g, v, ghv)?;
        Ok(ghv)
    }

    #[track_caller]
    fn ghjvprod(&mut self, x: &[F], g: &[F], v: &[F]) -> Result<Vec<F>> {
        let mut ghv = vec![F::zero(); self.meta().ncon];
        self.ghjvprod_into(x, g, v, &mut ghv)?;
        Ok(ghv)
    }

    /// Number of evaluations tracked by `counter`.
    fn neval(&self, counter: Counter) -> usize {
        self.counters().get(counter)
    }

    /// Total evaluations across all counters.
    fn sum_counters(&self) -> usize {
        self.counters().sum()
    }

    /// Zero all counters so the model can be reused for another run.
    fn reset(&mut self) -> &mut Self {
        self.counters_mut().reset();
        self
    }
}

impl<F: Float, M: NlpModel<F> + ?Sized> NlpModelExt<F> for M {}
