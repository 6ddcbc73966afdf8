//! A model assembled from closures.

use std::fmt;

use num_traits::Float;

use crate::counters::Counters;
use crate::error::{not_implemented, Result};
use crate::meta::NlpModelMeta;
use crate::model::NlpModel;

type ObjFn<F> = Box<dyn FnMut(&[F]) -> F>;
/// `(x, out)`: gradient, constraints, Jacobian values.
type EvalFn<F> = Box<dyn FnMut(&[F], &mut [F])>;
/// `(x, v, out)`: Jacobian products.
type ProdFn<F> = Box<dyn FnMut(&[F], &[F], &mut [F])>;
/// `(x, y, obj_weight, vals)`.
type HessCoordFn<F> = Box<dyn FnMut(&[F], &[F], F, &mut [F])>;
/// `(x, y, v, obj_weight, hv)`.
type HessProdFn<F> = Box<dyn FnMut(&[F], &[F], &[F], F, &mut [F])>;

struct Coordinates<F> {
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: F,
}

/// A model whose primitives are plain closures.
///
/// Built from metadata and an objective; every other primitive is optional and
/// fails with `NotImplemented` until supplied.
///
/// ```
/// use nlpmodels::{NlpError, NlpModel, NlpModelExt, NlpModelMeta, SimpleModel};
///
/// let meta = NlpModelMeta::builder(2).x0(vec![-1.2, 1.0]).build();
/// let mut nlp = SimpleModel::new(meta, |x: &[f64]| {
///     (x[0] - 1.0).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
/// });
///
/// let x0 = nlp.meta().x0.clone();
/// assert!((nlp.obj(&x0).unwrap() - 24.2).abs() < 1e-12);
/// assert_eq!(nlp.grad(&x0), Err(NlpError::NotImplemented("grad_into")));
/// ```
pub struct SimpleModel<F> {
    meta: NlpModelMeta<F>,
    counters: Counters,
    obj: ObjFn<F>,
    grad: Option<EvalFn<F>>,
    cons: Option<EvalFn<F>>,
    jac: Option<Coordinates<EvalFn<F>>>,
    jprod: Option<ProdFn<F>>,
    jtprod: Option<ProdFn<F>>,
    hess: Option<Coordinates<HessCoordFn<F>>>,
    hprod: Option<HessProdFn<F>>,
}

impl<F: Float + 'static> SimpleModel<F> {
    pub fn new(meta: NlpModelMeta<F>, obj: impl FnMut(&[F]) -> F + 'static) -> Self {
        SimpleModel {
            meta,
            counters: Counters::new(),
            obj: Box::new(obj),
            grad: None,
            cons: None,
            jac: None,
            jprod: None,
            jtprod: None,
            hess: None,
            hprod: None,
        }
    }

    /// `g(x, g)` writes `∇f(x)` into `g`.
    pub fn with_grad(mut self, g: impl FnMut(&[F], &mut [F]) + 'static) -> Self {
        self.grad = Some(Box::new(g));
        self
    }

    /// `c(x, c)` writes the constraint values into `c`.
    pub fn with_cons(mut self, c: impl FnMut(&[F], &mut [F]) + 'static) -> Self {
        self.cons = Some(Box::new(c));
        self
    }

    /// Fixed Jacobian pattern plus a closure writing the values at `x`.
    ///
    /// # Panics
    ///
    /// If the pattern does not have `nnzj` entries or an index is out of range.
    pub fn with_jac(
        mut self,
        rows: Vec<usize>,
        cols: Vec<usize>,
        vals: impl FnMut(&[F], &mut [F]) + 'static,
    ) -> Self {
        assert_eq!(rows.len(), self.meta.nnzj, "Jacobian pattern must have nnzj entries");
        assert_eq!(cols.len(), self.meta.nnzj, "Jacobian pattern must have nnzj entries");
        assert!(rows.iter().all(|&i| i < self.meta.ncon), "Jacobian row out of range");
        assert!(cols.iter().all(|&j| j < self.meta.nvar), "Jacobian column out of range");
        self.jac = Some(Coordinates {
            rows,
            cols,
            vals: Box::new(vals),
        });
        self
    }

    /// `jprod(x, v, jv)` writes `J(x)·v` into `jv`.
    pub fn with_jprod(mut self, jprod: impl FnMut(&[F], &[F], &mut [F]) + 'static) -> Self {
        self.jprod = Some(Box::new(jprod));
        self
    }

    /// `jtprod(x, v, jtv)` writes `J(x)ᵀ·v` into `jtv`.
    pub fn with_jtprod(mut self, jtprod: impl FnMut(&[F], &[F], &mut [F]) + 'static) -> Self {
        self.jtprod = Some(Box::new(jtprod));
        self
    }

    /// Fixed lower-triangular Hessian pattern plus a closure
    /// `vals(x, y, obj_weight, vals)` writing the Lagrangian Hessian values.
    ///
    /// # Panics
    ///
    /// If the pattern does not have `nnzh` entries or reaches above the diagonal.
    pub fn with_hess(
        mut self,
        rows: Vec<usize>,
        cols: Vec<usize>,
        vals: impl FnMut(&[F], &[F], F, &mut [F]) + 'static,
    ) -> Self {
        assert_eq!(rows.len(), self.meta.nnzh, "Hessian pattern must have nnzh entries");
        assert_eq!(cols.len(), self.meta.nnzh, "Hessian pattern must have nnzh entries");
        assert!(
            rows.iter().zip(&cols).all(|(&i, &j)| j <= i && i < self.meta.nvar),
            "Hessian pattern must lie in the lower triangle"
        );
        self.hess = Some(Coordinates {
            rows,
            cols,
            vals: Box::new(vals),
        });
        self
    }

    /// `hprod(x, y, v, obj_weight, hv)` writes the Lagrangian Hessian times `v`.
    pub fn with_hprod(
        mut self,
        hprod: impl FnMut(&[F], &[F], &[F], F, &mut [F]) + 'static,
    ) -> Self {
        self.hprod = Some(Box::new(hprod));
        self
    }
}

impl<F> fmt::Debug for SimpleModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleModel")
            .field("name", &self.meta.name)
            .field("nvar", &self.meta.nvar)
            .field("ncon", &self.meta.ncon)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl<F: Float> NlpModel<F> for SimpleModel<F> {
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
        Ok((self.obj)(x))
    }

    fn eval_grad(&mut self, x: &[F], g: &mut [F]) -> Result<()> {
        match self.grad.as_mut() {
            Some(grad) => {
                grad(x, g);
                Ok(())
            }
            None => not_implemented("grad_into"),
        }
    }

    fn eval_cons(&mut self, x: &[F], c: &mut [F]) -> Result<()> {
        match self.cons.as_mut() {
            Some(cons) => {
                cons(x, c);
                Ok(())
            }
            None => not_implemented("cons_into"),
        }
    }

    fn fill_jac_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        match &self.jac {
            Some(jac) => {
                rows.copy_from_slice(&jac.rows);
                cols.copy_from_slice(&jac.cols);
                Ok(())
            }
            None => not_implemented("jac_structure_into"),
        }
    }

    fn eval_jac_coord(&mut self, x: &[F], vals: &mut [F]) -> Result<()> {
        match self.jac.as_mut() {
            Some(jac) => {
                (jac.vals)(x, vals);
                Ok(())
            }
            None => not_implemented("jac_coord_into"),
        }
    }

    fn eval_jprod(&mut self, x: &[F], v: &[F], jv: &mut [F]) -> Result<()> {
        match self.jprod.as_mut() {
            Some(jprod) => {
                jprod(x, v, jv);
                Ok(())
            }
            None => not_implemented("jprod_into"),
        }
    }

    fn eval_jtprod(&mut self, x: &[F], v: &[F], jtv: &mut [F]) -> Result<()> {
        match self.jtprod.as_mut() {
            Some(jtprod) => {
                jtprod(x, v, jtv);
                Ok(())
            }
            None => not_implemented("jtprod_into"),
        }
    }

    fn fill_hess_structure(&self, rows: &mut [usize], cols: &mut [usize]) -> Result<()> {
        match &self.hess {
            Some(hess) => {
                rows.copy_from_slice(&hess.rows);
                cols.copy_from_slice(&hess.cols);
                Ok(())
            }
            None => not_implemented("hess_structure_into"),
        }
    }

    fn eval_hess_coord(&mut self, x: &[F], y: &[F], obj_weight: F, vals: &mut [F]) -> Result<()> {
        match self.hess.as_mut() {
            Some(hess) => {
                (hess.vals)(x, y, obj_weight, vals);
                Ok(())
            }
            None => not_implemented("hess_coord_into"),
        }
    }

    fn eval_hprod(&mut self, x: &[F], y: &[F], v: &[F], obj_weight: F, hv: &mut [F]) -> Result<()> {
        match self.hprod.as_mut() {
            Some(hprod) => {
                hprod(x, y, v, obj_weight, hv);
                Ok(())
            }
            None => not_implemented("hprod_into"),
        }
    }
}
