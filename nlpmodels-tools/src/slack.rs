//! Slack reformulation: every inequality becomes an equality.
//!
//! For a model `min f(x)  s.t.  lcon ≤ c(x) ≤ ucon,  lvar ≤ x ≤ uvar`, each
//! constraint `j` with `lcon[j] ≠ ucon[j]` receives a slack `s_k` and turns into
//! `c_j(x) − s_k = 0`, while `lcon[j] ≤ s_k ≤ ucon[j]` becomes a variable
//! bound. The variables of the wrapper are `[x; s]`, with slacks numbered in
//! increasing constraint order.

use nlpmodels::{CooMatrix, Counters, NlpModel, NlpModelExt, NlpModelMeta, Result, SparseVector};
use num_traits::Float;

/// Wraps a model and exposes its slack reformulation.
///
/// The wrapper counts its own evaluations; the wrapped model keeps counting
/// the evaluations forwarded to it.
#[derive(Debug)]
pub struct SlackModel<F, M> {
    inner: M,
    meta: NlpModelMeta<F>,
    counters: Counters,
    /// Constraint index of each slack.
    slacked: Vec<usize>,
    /// Slack index of each constraint, if it has one.
    slack_of: Vec<Option<usize>>,
}

impl<F: Float, M: NlpModel<F>> SlackModel<F, M> {
    pub fn new(inner: M) -> Self {
        let base = inner.meta();
        let (n, m) = (base.nvar, base.ncon);

        let slacked: Vec<usize> = (0..m).filter(|&j| base.lcon[j] != base.ucon[j]).collect();
        let mut slack_of = vec![None; m];
        for (k, &j) in slacked.iter().enumerate() {
            slack_of[j] = Some(k);
        }
        let ns = slacked.len();

        let mut x0 = base.x0.clone();
        x0.resize(n + ns, F::zero());
        let mut lvar = base.lvar.clone();
        let mut uvar = base.uvar.clone();
        lvar.extend(slacked.iter().map(|&j| base.lcon[j]));
        uvar.extend(slacked.iter().map(|&j| base.ucon[j]));

        let mut lcon = base.lcon.clone();
        let mut ucon = base.ucon.clone();
        for &j in &slacked {
            lcon[j] = F::zero();
            ucon[j] = F::zero();
        }

        let meta = NlpModelMeta::builder(n + ns)
            .x0(x0)
            .bounds(lvar, uvar)
            .constraints(lcon, ucon)
            .y0(base.y0.clone())
            .lin(base.lin.clone())
            .nnzj(base.nnzj + ns)
            .nnzh(base.nnzh)
            .minimize(base.minimize)
            .name(format!("{}-slack", base.name))
            .build();
        log::debug!("{}: {} slack variables added", meta.name, ns);

        SlackModel {
            inner,
            meta,
            counters: Counters::new(),
            slacked,
            slack_of,
        }
    }

    /// Number of slack variables.
    pub fn nslack(&self) -> usize {
        self.slacked.len()
    }

    /// Constraint index of each slack, in slack order.
    pub fn slacked_constraints(&self) -> &[usize] {
        &self.slacked
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }

    fn n(&self) -> usize {
        self.inner.meta().nvar
    }
}

impl<F: Float, M: NlpModel<F>> NlpModel<F> for SlackModel<F, M> {
    fn meta(&self) -> &NlpModelMeta<F> {
        &self.meta
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    fn eval_obj(&mut self, x: &[F]) -> Result<F> {
        let n = self.n();
        self.inner.obj(&x[..n])
    }

    fn eval_grad(&mut self, x: &[F], g: &mut [F]) -> Result<()> {
        let n = self.n();
        let (gx, gs) = g.split_at_mut(n);
        self.inner.grad_into(&x[..n], gx)?;
        gs.fill(F::zero());
        Ok(())
    }

    fn eval_cons(&mut self, x: &[F], c: &mut [F]) -> Result<()> {
        let n = self.n();
        self.inner.cons_into(&x[..n], c)?;
        for (k, &j) in self.slacked.iter().enumerate() {
            c[j] = c[j] - x[n + k];
        }
        Ok(())
    }

    fn eval_jth_con(&mut self, x: &[F], j: usize) -> Result<F> {
        let n = self.n();
        let cj = self.inner.jth_con(&x[..n], j)?;
        Ok(match self.slack_of[j] {
            Some(k) => cj - x[n + k],
            None => cj,
        })
    }

    fn eval_jth_congrad(&mut self, x: &[F], j: usize, g: &mut [F]) -> Result<()> {
        let n = self.n();
        let (gx, gs) = g.split_at_mut(n);
        self.inner.jth_congrad_into(&x[..n], j, gx)?;
        gs.fill(F::zero());
        if let Some(k) = self.slack_of[j] {
            gs[k] = -F::one();
        }
        Ok(())
    }

    fn eval_jth_sparse_congrad(&mut self, x: &[F], j: usize) -> Result<SparseVector<F>> {
        let n = self.n();
        let inner = self.inner.jth_sparse_congrad(&x[..n], j)?;
        let mut indices = inner.indices;
        let mut values = inner.values;
        if let Some(k) = self.slack_of[j] {
            indices.push(n + k);
            values.push(-F::one());
        }
        Ok(SparseVector::new(self.meta.nvar, indices, values))
    }

    fn fill_jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        let n = self.n();
        let nnz = self.inner.meta().nnzj;
        self.inner.jac_structure_into(&mut rows[..nnz], &mut cols[..nnz])?;
        for (k, &j) in self.slacked.iter().enumerate() {
            rows[nnz + k] = j;
            cols[nnz + k] = n + k;
        }
        Ok(())
    }

    fn eval_jac_coord(&mut self, x: &[F], vals: &mut [F]) -> Result<()> {
        let n = self.n();
        let nnz = self.inner.meta().nnzj;
        let (inner_vals, slack_vals) = vals.split_at_mut(nnz);
        self.inner.jac_coord_into(&x[..n], inner_vals)?;
        slack_vals.fill(-F::one());
        Ok(())
    }

    /// The inner `jac` plus one `-1` entry per slack column.
    fn eval_jac(&mut self, x: &[F]) -> Result<CooMatrix<F>> {
        let n = self.n();
        let inner = self.inner.jac(&x[..n])?;
        let mut rows = inner.rows;
        let mut cols = inner.cols;
        let mut vals = inner.vals;
        for (k, &j) in self.slacked.iter().enumerate() {
            rows.push(j);
            cols.push(n + k);
            vals.push(-F::one());
        }
        Ok(CooMatrix::new(self.meta.ncon, self.meta.nvar, rows, cols, vals))
    }

    fn eval_jprod(&mut self, x: &[F], v: &[F], jv: &mut [F]) -> Result<()> {
        let n = self.n();
        self.inner.jprod_into(&x[..n], &v[..n], jv)?;
        for (k, &j) in self.slacked.iter().enumerate() {
            jv[j] = jv[j] - v[n + k];
        }
        Ok(())
    }

    fn eval_jtprod(&mut self, x: &[F], v: &[F], jtv: &mut [F]) -> Result<()> {
        let n = self.n();
        let (jx, js) = jtv.split_at_mut(n);
        self.inner.jtprod_into(&x[..n], v, jx)?;
        for (k, &j) in self.slacked.iter().enumerate() {
            js[k] = -v[j];
        }
        Ok(())
    }

    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        self.inner.hess_structure_into(rows, cols)?;
        Ok(())
    }

    fn eval_hess_coord(&mut self, x: &[F], y: &[F], obj_weight: F, vals: &mut [F]) -> Result<()> {
        let n = self.n();
        self.inner.hess_coord_into(&x[..n], Some(y), obj_weight, vals)?;
        Ok(())
    }

    /// The inner `hess`, widened to `[x; s]`; the slack block is zero.
    fn eval_hess(&mut self, x: &[F], y: &[F], obj_weight: F) -> Result<CooMatrix<F>> {
        let n = self.n();
        let nvar = self.meta.nvar;
        let inner = self.inner.hess(&x[..n], Some(y), obj_weight)?;
        Ok(if inner.symmetric {
            CooMatrix::symmetric(nvar, inner.rows, inner.cols, inner.vals)
        } else {
            CooMatrix::new(nvar, nvar, inner.rows, inner.cols, inner.vals)
        })
    }

    fn eval_hprod(&mut self, x: &[F], y: &[F], v: &[F], obj_weight: F, hv: &mut [F]) -> Result<()> {
        let n = self.n();
        let (hx, hs) = hv.split_at_mut(n);
        self.inner.hprod_into(&x[..n], Some(y), &v[..n], obj_weight, hx)?;
        hs.fill(F::zero());
        Ok(())
    }

    fn eval_jth_hprod(&mut self, x: &[F], v: &[F], j: usize, hv: &mut [F]) -> Result<()> {
        let n = self.n();
        let (hx, hs) = hv.split_at_mut(n);
        self.inner.jth_hprod_into(&x[..n], &v[..n], j, hx)?;
        hs.fill(F::zero());
        Ok(())
    }

    fn eval_ghjvprod(&mut self, x: &[F], g: &[F], v: &[F], ghv: &mut [F]) -> Result<()> {
        let n = self.n();
        self.inner.ghjvprod_into(&x[..n], &g[..n], &v[..n], ghv)?;
        Ok(())
    }
}
