#![allow(dead_code)]

use nlpmodels::{Counters, NlpModel, NlpModelMeta, Result, SimpleModel, SparseVector};

// ─── HS14 ──────────────────────────────────────────────────────────────────
// min (x₁ - 2)² + (x₂ - 1)²
// s.t. x₁ - 2x₂ = -1            (linear equality)
//      -x₁²/4 - x₂² + 1 ≥ 0     (nonlinear inequality)
// x0 = (2, 2)

pub struct Hs14 {
    meta: NlpModelMeta<f64>,
    counters: Counters,
}

impl Hs14 {
    pub fn new() -> Self {
        let meta = NlpModelMeta::builder(2)
            .x0(vec![2.0, 2.0])
            .constraints(vec![-1.0, 0.0], vec![-1.0, f64::INFINITY])
            .lin(vec![0])
            .nnzj(4)
            .nnzh(2)
            .name("hs14")
            .build();
        Hs14 {
            meta,
            counters: Counters::new(),
        }
    }
}

fn con(x: &[f64], j: usize) -> f64 {
    match j {
        0 => x[0] - 2.0 * x[1],
        _ => -0.25 * x[0] * x[0] - x[1] * x[1] + 1.0,
    }
}

fn congrad(x: &[f64], j: usize) -> [f64; 2] {
    match j {
        0 => [1.0, -2.0],
        _ => [-0.5 * x[0], -2.0 * x[1]],
    }
}

/// Diagonal of ∇²c_j (both constraint Hessians are diagonal).
fn conhess(j: usize) -> [f64; 2] {
    match j {
        0 => [0.0, 0.0],
        _ => [-0.5, -2.0],
    }
}

impl NlpModel<f64> for Hs14 {
    fn meta(&self) -> &NlpModelMeta<f64> {
        &self.meta
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }

    fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    fn eval_obj(&mut self, x: &[f64]) -> Result<f64> {
        Ok((x[0] - 2.0).powi(2) + (x[1] - 1.0).powi(2))
    }

    fn eval_grad(&mut self, x: &[f64], g: &mut [f64]) -> Result<()> {
        g[0] = 2.0 * (x[0] - 2.0);
        g[1] = 2.0 * (x[1] - 1.0);
        Ok(())
    }

    fn eval_cons(&mut self, x: &[f64], c: &mut [f64]) -> Result<()> {
        c[0] = con(x, 0);
        c[1] = con(x, 1);
        Ok(())
    }

    fn eval_jth_con(&mut self, x: &[f64], j: usize) -> Result<f64> {
        Ok(con(x, j))
    }

    fn eval_jth_congrad(&mut self, x: &[f64], j: usize, g: &mut [f64]) -> Result<()> {
        g.copy_from_slice(&congrad(x, j));
        Ok(())
    }

    fn eval_jth_sparse_congrad(&mut self, x: &[f64], j: usize) -> Result<SparseVector<f64>> {
        Ok(SparseVector::new(2, vec![0, 1], congrad(x, j).to_vec()))
    }

    fn fill_jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        rows.copy_from_slice(&[0, 0, 1, 1]);
        cols.copy_from_slice(&[0, 1, 0, 1]);
        Ok(())
    }

    fn eval_jac_coord(&mut self, x: &[f64], vals: &mut [f64]) -> Result<()> {
        vals[..2].copy_from_slice(&congrad(x, 0));
        vals[2..].copy_from_slice(&congrad(x, 1));
        Ok(())
    }

    fn eval_jprod(&mut self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<()> {
        for (j, out) in jv.iter_mut().enumerate() {
            let g = congrad(x, j);
            *out = g[0] * v[0] + g[1] * v[1];
        }
        Ok(())
    }

    fn eval_jtprod(&mut self, x: &[f64], v: &[f64], jtv: &mut [f64]) -> Result<()> {
        let (g0, g1) = (congrad(x, 0), congrad(x, 1));
        jtv[0] = g0[0] * v[0] + g1[0] * v[1];
        jtv[1] = g0[1] * v[0] + g1[1] * v[1];
        Ok(())
    }

    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        rows.copy_from_slice(&[0, 1]);
        cols.copy_from_slice(&[0, 1]);
        Ok(())
    }

    fn eval_hess_coord(&mut self, _x: &[f64], y: &[f64], obj_weight: f64, vals: &mut [f64]) -> Result<()> {
        let d = conhess(1);
        vals[0] = 2.0 * obj_weight + y[1] * d[0];
        vals[1] = 2.0 * obj_weight + y[1] * d[1];
        Ok(())
    }

    fn eval_hprod(&mut self, _x: &[f64], y: &[f64], v: &[f64], obj_weight: f64, hv: &mut [f64]) -> Result<()> {
        let d = conhess(1);
        hv[0] = (2.0 * obj_weight + y[1] * d[0]) * v[0];
        hv[1] = (2.0 * obj_weight + y[1] * d[1]) * v[1];
        Ok(())
    }

    fn eval_jth_hprod(&mut self, _x: &[f64], v: &[f64], j: usize, hv: &mut [f64]) -> Result<()> {
        let d = conhess(j);
        hv[0] = d[0] * v[0];
        hv[1] = d[1] * v[1];
        Ok(())
    }

    fn eval_ghjvprod(&mut self, _x: &[f64], g: &[f64], v: &[f64], ghv: &mut [f64]) -> Result<()> {
        for (j, out) in ghv.iter_mut().enumerate() {
            let d = conhess(j);
            *out = g[0] * d[0] * v[0] + g[1] * d[1] * v[1];
        }
        Ok(())
    }
}

// ─── Rosenbrock ────────────────────────────────────────────────────────────

pub fn rosenbrock_f(x: &[f64]) -> f64 {
    (x[0] - 1.0).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
}

pub fn rosenbrock_grad(x: &[f64], g: &mut [f64]) {
    let b = x[1] - x[0] * x[0];
    g[0] = 2.0 * (x[0] - 1.0) - 400.0 * x[0] * b;
    g[1] = 200.0 * b;
}

/// Rosenbrock with gradient and Hessian; `hess_offset` is added to the
/// off-diagonal Hessian entry.
pub fn rosenbrock(hess_offset: f64) -> SimpleModel<f64> {
    let meta = NlpModelMeta::builder(2)
        .x0(vec![-1.2, 1.0])
        .nnzh(3)
        .name("rosenbrock")
        .build();
    SimpleModel::new(meta, rosenbrock_f)
        .with_grad(rosenbrock_grad)
        .with_hess(vec![0, 1, 1], vec![0, 0, 1], move |x, _y, w, vals| {
            vals[0] = w * (2.0 - 400.0 * x[1] + 1200.0 * x[0] * x[0]);
            vals[1] = w * (-400.0 * x[0] + hess_offset);
            vals[2] = w * 200.0;
        })
}
