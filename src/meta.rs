//! Problem shape: dimensions, bounds, sparsity counts and names.

use num_traits::Float;

/// Immutable description of a nonlinear program.
///
/// Built once through [`NlpModelMeta::builder`] and owned by the model. All
/// vector lengths agree with `nvar` and `ncon`; the builder panics otherwise.
///
/// The index sets partition variables (resp. constraints) by the shape of
/// their bounds:
///
/// | set    | condition                      |
/// |--------|--------------------------------|
/// | `fix`  | `l = u`                        |
/// | `low`  | only `l` finite                |
/// | `upp`  | only `u` finite                |
/// | `rng`  | both finite, `l < u`           |
/// | `free` | neither finite                 |
/// | `inf`  | `l > u` (infeasible)           |
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NlpModelMeta<F> {
    /// Number of variables.
    pub nvar: usize,
    /// Initial point.
    pub x0: Vec<F>,
    /// Variable lower bounds.
    pub lvar: Vec<F>,
    /// Variable upper bounds.
    pub uvar: Vec<F>,
    pub ifix: Vec<usize>,
    pub ilow: Vec<usize>,
    pub iupp: Vec<usize>,
    pub irng: Vec<usize>,
    pub ifree: Vec<usize>,
    pub iinf: Vec<usize>,

    /// Number of constraints.
    pub ncon: usize,
    /// Initial Lagrange multipliers.
    pub y0: Vec<F>,
    /// Constraint lower bounds.
    pub lcon: Vec<F>,
    /// Constraint upper bounds.
    pub ucon: Vec<F>,
    pub jfix: Vec<usize>,
    pub jlow: Vec<usize>,
    pub jupp: Vec<usize>,
    pub jrng: Vec<usize>,
    pub jfree: Vec<usize>,
    pub jinf: Vec<usize>,
    /// Indices of linear constraints.
    pub lin: Vec<usize>,
    /// Indices of nonlinear constraints.
    pub nln: Vec<usize>,

    /// Number of structural nonzeros in the constraint Jacobian.
    pub nnzj: usize,
    /// Number of structural nonzeros in the lower triangle of the Lagrangian Hessian.
    pub nnzh: usize,

    /// Whether the objective is minimized (`false` means maximized).
    pub minimize: bool,
    /// Problem name.
    pub name: String,
}

impl<F: Float> NlpModelMeta<F> {
    /// Start building metadata for a problem with `nvar` variables.
    pub fn builder(nvar: usize) -> NlpModelMetaBuilder<F> {
        NlpModelMetaBuilder::new(nvar)
    }

    /// No constraints and no finite variable bounds.
    pub fn is_unconstrained(&self) -> bool {
        self.ncon == 0 && self.ifree.len() == self.nvar
    }

    /// At least one variable has a finite bound.
    pub fn has_bounds(&self) -> bool {
        self.ifree.len() < self.nvar
    }

    /// Bounds on the variables but no constraints.
    pub fn is_bound_constrained(&self) -> bool {
        self.ncon == 0 && self.has_bounds()
    }

    pub fn has_equalities(&self) -> bool {
        !self.jfix.is_empty()
    }

    pub fn has_inequalities(&self) -> bool {
        self.ncon > self.jfix.len()
    }
}

/// Builder for [`NlpModelMeta`].
///
/// Unspecified fields default to: `x0 = 0`, unbounded variables, no
/// constraints, dense Jacobian (`nvar·ncon`) and dense lower-triangular
/// Hessian (`nvar(nvar+1)/2`) nonzero counts, minimization, name `"Generic"`.
#[derive(Debug, Clone)]
pub struct NlpModelMetaBuilder<F> {
    nvar: usize,
    x0: Option<Vec<F>>,
    lvar: Option<Vec<F>>,
    uvar: Option<Vec<F>>,
    y0: Option<Vec<F>>,
    lcon: Vec<F>,
    ucon: Vec<F>,
    lin: Vec<usize>,
    nnzj: Option<usize>,
    nnzh: Option<usize>,
    minimize: bool,
    name: String,
}

impl<F: Float> NlpModelMetaBuilder<F> {
    fn new(nvar: usize) -> Self {
        NlpModelMetaBuilder {
            nvar,
            x0: None,
            lvar: None,
            uvar: None,
            y0: None,
            lcon: Vec::new(),
            ucon: Vec::new(),
            lin: Vec::new(),
            nnzj: None,
            nnzh: None,
            minimize: true,
            name: String::from("Generic"),
        }
    }

    pub fn x0(mut self, x0: Vec<F>) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Variable bounds `lvar ≤ x ≤ uvar`.
    pub fn bounds(mut self, lvar: Vec<F>, uvar: Vec<F>) -> Self {
        self.lvar = Some(lvar);
        self.uvar = Some(uvar);
        self
    }

    /// Constraint bounds `lcon ≤ c(x) ≤ ucon`; their length sets `ncon`.
    pub fn constraints(mut self, lcon: Vec<F>, ucon: Vec<F>) -> Self {
        self.lcon = lcon;
        self.ucon = ucon;
        self
    }

    pub fn y0(mut self, y0: Vec<F>) -> Self {
        self.y0 = Some(y0);
        self
    }

    /// Mark the given constraints as linear.
    pub fn lin(mut self, lin: Vec<usize>) -> Self {
        self.lin = lin;
        self
    }

    pub fn nnzj(mut self, nnzj: usize) -> Self {
        self.nnzj = Some(nnzj);
        self
    }

    pub fn nnzh(mut self, nnzh: usize) -> Self {
        self.nnzh = Some(nnzh);
        self
    }

    pub fn minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate lengths, classify bounds and produce the metadata.
    ///
    /// # Panics
    ///
    /// If `nvar` is zero, or any vector length disagrees with `nvar`/`ncon`,
    /// or a linear-constraint index is out of range.
    pub fn build(self) -> NlpModelMeta<F> {
        let nvar = self.nvar;
        assert!(nvar > 0, "a model needs at least one variable");

        let x0 = self.x0.unwrap_or_else(|| vec![F::zero(); nvar]);
        let lvar = self.lvar.unwrap_or_else(|| vec![F::neg_infinity(); nvar]);
        let uvar = self.uvar.unwrap_or_else(|| vec![F::infinity(); nvar]);
        assert_eq!(x0.len(), nvar, "x0 must have length nvar");
        assert_eq!(lvar.len(), nvar, "lvar must have length nvar");
        assert_eq!(uvar.len(), nvar, "uvar must have length nvar");

        let ncon = self.lcon.len();
        assert_eq!(self.ucon.len(), ncon, "lcon and ucon must have equal length");
        let y0 = self.y0.unwrap_or_else(|| vec![F::zero(); ncon]);
        assert_eq!(y0.len(), ncon, "y0 must have length ncon");

        let mut lin = self.lin;
        lin.sort_unstable();
        lin.dedup();
        assert!(
            lin.iter().all(|&j| j < ncon),
            "linear constraint index out of range"
        );
        let nln = (0..ncon).filter(|j| lin.binary_search(j).is_err()).collect();

        let vars = BoundClasses::classify(&lvar, &uvar);
        let cons = BoundClasses::classify(&self.lcon, &self.ucon);
        if !vars.infeasible.is_empty() {
            log::warn!(
                "{}: variables {:?} have lower bound above upper bound",
                self.name,
                vars.infeasible
            );
        }
        if !cons.infeasible.is_empty() {
            log::warn!(
                "{}: constraints {:?} have lower bound above upper bound",
                self.name,
                cons.infeasible
            );
        }

        let nnzj = self.nnzj.unwrap_or(nvar * ncon);
        let nnzh = self.nnzh.unwrap_or(nvar * (nvar + 1) / 2);
        log::debug!("built metadata for {}: nvar = {nvar}, ncon = {ncon}", self.name);

        NlpModelMeta {
            nvar,
            x0,
            lvar,
            uvar,
            ifix: vars.fixed,
            ilow: vars.lower,
            iupp: vars.upper,
            irng: vars.range,
            ifree: vars.free,
            iinf: vars.infeasible,
            ncon,
            y0,
            lcon: self.lcon,
            ucon: self.ucon,
            jfix: cons.fixed,
            jlow: cons.lower,
            jupp: cons.upper,
            jrng: cons.range,
            jfree: cons.free,
            jinf: cons.infeasible,
            lin,
            nln,
            nnzj,
            nnzh,
            minimize: self.minimize,
            name: self.name,
        }
    }
}

#[derive(Default)]
struct BoundClasses {
    fixed: Vec<usize>,
    lower: Vec<usize>,
    upper: Vec<usize>,
    range: Vec<usize>,
    free: Vec<usize>,
    infeasible: Vec<usize>,
}

impl BoundClasses {
    fn classify<F: Float>(lower: &[F], upper: &[F]) -> Self {
        let mut classes = BoundClasses::default();
        for (i, (&l, &u)) in lower.iter().zip(upper).enumerate() {
            let bucket = if l > u {
                &mut classes.infeasible
            } else if l == u {
                &mut classes.fixed
            } else {
                match (l.is_finite(), u.is_finite()) {
                    (true, true) => &mut classes.range,
                    (true, false) => &mut classes.lower,
                    (false, true) => &mut classes.upper,
                    (false, false) => &mut classes.free,
                }
            };
            bucket.push(i);
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconstrained() {
        let meta = NlpModelMeta::<f64>::builder(3).build();
        assert_eq!(meta.x0, vec![0.0; 3]);
        assert_eq!(meta.ifree, vec![0, 1, 2]);
        assert_eq!(meta.ncon, 0);
        assert_eq!(meta.nnzj, 0);
        assert_eq!(meta.nnzh, 6);
        assert!(meta.is_unconstrained());
        assert!(!meta.has_bounds());
        assert_eq!(meta.name, "Generic");
    }

    #[test]
    fn bounds_are_classified() {
        let inf = f64::INFINITY;
        let meta = NlpModelMeta::builder(5)
            .bounds(
                vec![1.0, 0.0, -inf, -1.0, -inf],
                vec![1.0, inf, 2.0, 1.0, inf],
            )
            .build();
        assert_eq!(meta.ifix, vec![0]);
        assert_eq!(meta.ilow, vec![1]);
        assert_eq!(meta.iupp, vec![2]);
        assert_eq!(meta.irng, vec![3]);
        assert_eq!(meta.ifree, vec![4]);
        assert!(meta.iinf.is_empty());
        assert!(meta.is_bound_constrained());
    }

    #[test]
    fn constraints_are_classified() {
        let inf = f64::INFINITY;
        let meta = NlpModelMeta::builder(2)
            .constraints(vec![0.0, 1.0, -inf, 3.0], vec![0.0, inf, 5.0, 2.0])
            .lin(vec![1])
            .build();
        assert_eq!(meta.ncon, 4);
        assert_eq!(meta.jfix, vec![0]);
        assert_eq!(meta.jlow, vec![1]);
        assert_eq!(meta.jupp, vec![2]);
        assert_eq!(meta.jinf, vec![3]);
        assert_eq!(meta.lin, vec![1]);
        assert_eq!(meta.nln, vec![0, 2, 3]);
        assert_eq!(meta.y0, vec![0.0; 4]);
        assert_eq!(meta.nnzj, 8);
        assert!(meta.has_equalities());
        assert!(meta.has_inequalities());
    }

    #[test]
    #[should_panic(expected = "x0 must have length nvar")]
    fn mismatched_x0_panics() {
        let _ = NlpModelMeta::builder(2).x0(vec![1.0]).build();
    }

    #[test]
    #[should_panic(expected = "lcon and ucon must have equal length")]
    fn mismatched_constraint_bounds_panic() {
        let _ = NlpModelMeta::builder(2)
            .constraints(vec![0.0], vec![0.0, 1.0])
            .build();
    }
}
