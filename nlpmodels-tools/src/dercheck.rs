//! Finite-difference checks of a model's first and second derivatives.
//!
//! Every check drives the model through its public operations only, so the
//! model's counters record the evaluations the check performs.

use std::collections::BTreeMap;
use std::fmt::Debug;

use nlpmodels::{NlpModel, NlpModelExt, Result};
use num_traits::Float;

/// Step and tolerances for the central-difference checks.
#[derive(Debug, Clone)]
pub struct DerivativeCheckConfig<F> {
    /// Central-difference step `h` (default: cube root of machine epsilon).
    pub step: F,
    /// Absolute tolerance (default: 1e-6).
    pub atol: F,
    /// Relative tolerance, scaled by the exact value (default: square root of machine epsilon).
    pub rtol: F,
}

impl Default for DerivativeCheckConfig<f64> {
    fn default() -> Self {
        DerivativeCheckConfig {
            step: f64::EPSILON.cbrt(),
            atol: 1e-6,
            rtol: f64::EPSILON.sqrt(),
        }
    }
}

impl Default for DerivativeCheckConfig<f32> {
    fn default() -> Self {
        DerivativeCheckConfig {
            step: f32::EPSILON.cbrt(),
            atol: 1e-3,
            rtol: f32::EPSILON.sqrt(),
        }
    }
}

impl<F: Float> DerivativeCheckConfig<F> {
    fn rejects(&self, exact: F, approx: F) -> bool {
        (exact - approx).abs() > self.atol + self.rtol * exact.abs()
    }
}

/// Entries whose exact derivative disagrees with the finite difference,
/// keyed by position and holding the absolute error.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeReport<K, F> {
    pub errors: BTreeMap<K, F>,
}

impl<K: Ord, F: Float> DerivativeReport<K, F> {
    fn new() -> Self {
        DerivativeReport {
            errors: BTreeMap::new(),
        }
    }

    /// No entry exceeded the tolerance.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Largest reported error, zero when the check passed.
    pub fn max_error(&self) -> F {
        self.errors.values().fold(F::zero(), |m, &e| m.max(e))
    }

    fn compare(&mut self, key: K, exact: F, approx: F, config: &DerivativeCheckConfig<F>)
    where
        K: Debug,
        F: Debug,
    {
        if config.rejects(exact, approx) {
            log::debug!("derivative mismatch at {key:?}: exact {exact:?}, approx {approx:?}");
            self.errors.insert(key, (exact - approx).abs());
        }
    }
}

fn shifted<F: Float>(x: &[F], i: usize, delta: F) -> Vec<F> {
    let mut xs = x.to_vec();
    xs[i] = xs[i] + delta;
    xs
}

/// Central differences of a vector-valued function along each coordinate:
/// `columns[i] = (f(x + h·eᵢ) − f(x − h·eᵢ)) / 2h`.
fn difference_columns<F: Float>(
    x: &[F],
    h: F,
    mut f: impl FnMut(&[F]) -> Result<Vec<F>>,
) -> Result<Vec<Vec<F>>> {
    let two_h = h + h;
    (0..x.len())
        .map(|i| {
            let fp = f(&shifted(x, i, h))?;
            let fm = f(&shifted(x, i, -h))?;
            Ok(fp.iter().zip(&fm).map(|(&a, &b)| (a - b) / two_h).collect())
        })
        .collect()
}

/// Compare `grad` with central differences of `obj` at `x`.
pub fn gradient_check<F, M>(
    model: &mut M,
    x: &[F],
    config: &DerivativeCheckConfig<F>,
) -> Result<DerivativeReport<usize, F>>
where
    F: Float + Debug,
    M: NlpModel<F> + ?Sized,
{
    let g = model.grad(x)?;
    let h = config.step;
    let mut report = DerivativeReport::new();
    for (i, &gi) in g.iter().enumerate() {
        let fp = model.obj(&shifted(x, i, h))?;
        let fm = model.obj(&shifted(x, i, -h))?;
        report.compare(i, gi, (fp - fm) / (h + h), config);
    }
    Ok(report)
}

/// Compare the assembled Jacobian with central differences of `cons` at `x`.
///
/// Keys are `(constraint, variable)`. A model without constraints yields an
/// empty report without evaluating anything.
pub fn jacobian_check<F, M>(
    model: &mut M,
    x: &[F],
    config: &DerivativeCheckConfig<F>,
) -> Result<DerivativeReport<(usize, usize), F>>
where
    F: Float + Debug,
    M: NlpModel<F> + ?Sized,
{
    let mut report = DerivativeReport::new();
    if model.meta().ncon == 0 {
        return Ok(report);
    }
    let jac = model.jac(x)?.to_dense();
    let columns = difference_columns(x, config.step, |xs| model.cons(xs))?;
    for (i, column) in columns.iter().enumerate() {
        for (j, &approx) in column.iter().enumerate() {
            report.compare((j, i), jac[j][i], approx, config);
        }
    }
    Ok(report)
}

/// Compare the lower triangle of each Hessian with central differences of the
/// matching gradient at `x`.
///
/// Report 0 covers the objective (`σ = 1`, no multipliers) against `grad`;
/// report `j + 1` covers constraint `j` (`σ = 0`, `y = eⱼ`) against
/// `jth_congrad`. Keys are `(row, col)` with `row >= col`.
pub fn hessian_check<F, M>(
    model: &mut M,
    x: &[F],
    config: &DerivativeCheckConfig<F>,
) -> Result<Vec<DerivativeReport<(usize, usize), F>>>
where
    F: Float + Debug,
    M: NlpModel<F> + ?Sized,
{
    let ncon = model.meta().ncon;
    let mut reports = Vec::with_capacity(ncon + 1);

    let exact = model.hess(x, None, F::one())?.to_dense();
    let columns = difference_columns(x, config.step, |xs| model.grad(xs))?;
    reports.push(lower_triangle_report(&exact, &columns, config));

    let mut y = vec![F::zero(); ncon];
    for j in 0..ncon {
        y[j] = F::one();
        let exact = model.hess(x, Some(y.as_slice()), F::zero())?.to_dense();
        y[j] = F::zero();
        let columns = difference_columns(x, config.step, |xs| model.jth_congrad(xs, j))?;
        reports.push(lower_triangle_report(&exact, &columns, config));
    }
    Ok(reports)
}

fn lower_triangle_report<F: Float + Debug>(
    exact: &[Vec<F>],
    columns: &[Vec<F>],
    config: &DerivativeCheckConfig<F>,
) -> DerivativeReport<(usize, usize), F> {
    let mut report = DerivativeReport::new();
    for (col, column) in columns.iter().enumerate() {
        for row in col..column.len() {
            report.compare((row, col), exact[row][col], column[row], config);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_scales_with_exact_value() {
        let config = DerivativeCheckConfig::<f64> {
            step: 1e-5,
            atol: 1e-6,
            rtol: 1e-3,
        };
        assert!(!config.rejects(1000.0, 1000.5));
        assert!(config.rejects(1.0, 1.01));
        assert!(!config.rejects(0.0, 5e-7));
    }

    #[test]
    fn report_accessors() {
        let mut report = DerivativeReport::<usize, f64>::new();
        assert!(report.passed());
        assert_eq!(report.max_error(), 0.0);
        report.errors.insert(3, 0.5);
        report.errors.insert(1, 2.0);
        assert!(!report.passed());
        assert_eq!(report.max_error(), 2.0);
        assert_eq!(report.errors.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn default_steps() {
        let c64 = DerivativeCheckConfig::<f64>::default();
        assert!(c64.step > 6e-6 && c64.step < 7e-6);
        let c32 = DerivativeCheckConfig::<f32>::default();
        assert!(c32.step > 4e-3 && c32.step < 5e-3);
    }
}
