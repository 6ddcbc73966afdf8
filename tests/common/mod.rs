#![allow(dead_code)]

use nlpmodels::{Counters, NlpModel, NlpModelMeta, Result, SimpleModel, SparseVector};

// ─── Rosenbrock ────────────────────────────────────────────────────────────
// f(x) = (x₁ - 1)² + 100(x₂ - x₁²)², x0 = (-1.2, 1), unconstrained.

pub fn rosenbrock_f(x: &[f64]) -> f64 {
    (x[0] - 1.0).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
}

pub fn rosenbrock_meta() -> NlpModelMeta<f64> {
    NlpModelMeta::builder(2)
        .x0(vec![-1.2, 1.0])
        .nnzh(3)
        .name("rosenbrock")
        .build()
}

/// Closure model that only knows its objective.
pub fn rosenbrock_obj_only() -> SimpleModel<f64> {
    SimpleModel::new(rosenbrock_meta(), rosenbrock_f)
}

/// Hand-written model with first and second derivatives.
pub struct Rosenbrock {
    meta: NlpModelMeta<f64>,
    counters: Counters,
}

impl Rosenbrock {
    pub fn new() -> Self {
        Rosenbrock {
            meta: rosenbrock_meta(),
            counters: Counters::new(),
        }
    }
}

impl NlpModel<f64> for Rosenbrock {
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
        Ok(rosenbrock_f(x))
    }

    fn eval_grad(&mut self, x: &[f64], g: &mut [f64]) -> Result<()> {
        let b = x[1] - x[0] * x[0];
        g[0] = 2.0 * (x[0] - 1.0) - 400.0 * x[0] * b;
        g[1] = 200.0 * b;
        Ok(())
    }

    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        rows.copy_from_slice(&[0, 1, 1]);
        cols.copy_from_slice(&[0, 0, 1]);
        Ok(())
    }

    fn eval_hess_coord(&mut self, x: &[f64], _y: &[f64], obj_weight: f64, vals: &mut [f64]) -> Result<()> {
        vals[0] = obj_weight * (2.0 - 400.0 * x[1] + 1200.0 * x[0] * x[0]);
        vals[1] = obj_weight * (-400.0 * x[0]);
        vals[2] = obj_weight * 200.0;
        Ok(())
    }

    fn eval_hprod(&mut self, x: &[f64], _y: &[f64], v: &[f64], obj_weight: f64, hv: &mut [f64]) -> Result<()> {
        let h00 = 2.0 - 400.0 * x[1] + 1200.0 * x[0] * x[0];
        let h10 = -400.0 * x[0];
        let h11 = 200.0;
        hv[0] = obj_weight * (h00 * v[0] + h10 * v[1]);
        hv[1] = obj_weight * (h10 * v[0] + h11 * v[1]);
        Ok(())
    }
}

// ─── HS6 ───────────────────────────────────────────────────────────────────
// min (1 - x₁)²  s.t.  10(x₂ - x₁²) = 0,  x0 = (-1.2, 1).

pub struct Hs6 {
    meta: NlpModelMeta<f64>,
    counters: Counters,
}

impl Hs6 {
    pub fn new() -> Self {
        let meta = NlpModelMeta::builder(2)
            .x0(vec![-1.2, 1.0])
            .constraints(vec![0.0], vec![0.0])
            .nnzj(2)
            .nnzh(1)
            .name("hs6")
            .build();
        Hs6 {
            meta,
            counters: Counters::new(),
        }
    }
}

impl NlpModel<f64> for Hs6 {
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
        Ok((1.0 - x[0]).powi(2))
    }

    fn eval_grad(&mut self, x: &[f64], g: &mut [f64]) -> Result<()> {
        g[0] = 2.0 * (x[0] - 1.0);
        g[1] = 0.0;
        Ok(())
    }

    fn eval_cons(&mut self, x: &[f64], c: &mut [f64]) -> Result<()> {
        c[0] = 10.0 * (x[1] - x[0] * x[0]);
        Ok(())
    }

    fn eval_jth_con(&mut self, x: &[f64], _j: usize) -> Result<f64> {
        Ok(10.0 * (x[1] - x[0] * x[0]))
    }

    fn eval_jth_congrad(&mut self, x: &[f64], _j: usize, g: &mut [f64]) -> Result<()> {
        g[0] = -20.0 * x[0];
        g[1] = 10.0;
        Ok(())
    }

    fn eval_jth_sparse_congrad(&mut self, x: &[f64], _j: usize) -> Result<SparseVector<f64>> {
        Ok(SparseVector::new(2, vec![0, 1], vec![-20.0 * x[0], 10.0]))
    }

    fn fill_jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        rows.copy_from_slice(&[0, 0]);
        cols.copy_from_slice(&[0, 1]);
        Ok(())
    }

    fn eval_jac_coord(&mut self, x: &[f64], vals: &mut [f64]) -> Result<()> {
        vals[0] = -20.0 * x[0];
        vals[1] = 10.0;
        Ok(())
    }

    fn eval_jprod(&mut self, x: &[f64], v: &[f64], jv: &mut [f64]) -> Result<()> {
        jv[0] = -20.0 * x[0] * v[0] + 10.0 * v[1];
        Ok(())
    }

    fn eval_jtprod(&mut self, x: &[f64], v: &[f64], jtv: &mut [f64]) -> Result<()> {
        jtv[0] = -20.0 * x[0] * v[0];
        jtv[1] = 10.0 * v[0];
        Ok(())
    }

    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        rows[0] = 0;
        cols[0] = 0;
        Ok(())
    }

    fn eval_hess_coord(&mut self, _x: &[f64], y: &[f64], obj_weight: f64, vals: &mut [f64]) -> Result<()> {
        vals[0] = 2.0 * obj_weight - 20.0 * y[0];
        Ok(())
    }

    fn eval_hprod(&mut self, _x: &[f64], y: &[f64], v: &[f64], obj_weight: f64, hv: &mut [f64]) -> Result<()> {
        hv[0] = (2.0 * obj_weight - 20.0 * y[0]) * v[0];
        hv[1] = 0.0;
        Ok(())
    }

    fn eval_jth_hprod(&mut self, _x: &[f64], v: &[f64], _j: usize, hv: &mut [f64]) -> Result<()> {
        hv[0] = -20.0 * v[0];
        hv[1] = 0.0;
        Ok(())
    }

    fn eval_ghjvprod(&mut self, _x: &[f64], g: &[f64], v: &[f64], ghv: &mut [f64]) -> Result<()> {
        ghv[0] = -20.0 * g[0] * v[0];
        Ok(())
    }
}

/// Full symmetric matrix from a lower-triangular coordinate list.
pub fn symmetrize(n: usize, rows: &[usize], cols: &[usize], vals: &[f64]) -> Vec<Vec<f64>> {
    let mut h = vec![vec![0.0; n]; n];
    for ((&i, &j), &v) in rows.iter().zip(cols).zip(vals) {
        h[i][j] += v;
        if i != j {
            h[j][i] += v;
        }
    }
    h
}

pub fn dense_mul(a: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    a.iter()
        .map(|row| row.iter().zip(v).map(|(aij, vj)| aij * vj).sum())
        .collect()
}
