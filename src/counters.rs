//! Per-model evaluation counters.

use std::fmt;

/// One tracked operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Counter {
    /// Objective value.
    Obj,
    /// Objective gradient.
    Grad,
    /// Constraint vector.
    Cons,
    /// Single constraint value.
    JCon,
    /// Single constraint gradient (dense or sparse).
    JGrad,
    /// Jacobian values (coordinate or assembled).
    Jac,
    /// Jacobian-vector product.
    JProd,
    /// Transposed-Jacobian-vector product.
    JtProd,
    /// Lagrangian Hessian values (coordinate or assembled).
    Hess,
    /// Lagrangian Hessian-vector product.
    HProd,
    /// Single-constraint Hessian products (`jth_hprod`, `ghjvprod`).
    JHProd,
}

impl Counter {
    /// Every counter, in declaration order.
    pub const ALL: [Counter; 11] = [
        Counter::Obj,
        Counter::Grad,
        Counter::Cons,
        Counter::JCon,
        Counter::JGrad,
        Counter::Jac,
        Counter::JProd,
        Counter::JtProd,
        Counter::Hess,
        Counter::HProd,
        Counter::JHProd,
    ];

    /// Field name of this counter in [`Counters`].
    pub fn name(self) -> &'static str {
        match self {
            Counter::Obj => "neval_obj",
            Counter::Grad => "neval_grad",
            Counter::Cons => "neval_cons",
            Counter::JCon => "neval_jcon",
            Counter::JGrad => "neval_jgrad",
            Counter::Jac => "neval_jac",
            Counter::JProd => "neval_jprod",
            Counter::JtProd => "neval_jtprod",
            Counter::Hess => "neval_hess",
            Counter::HProd => "neval_hprod",
            Counter::JHProd => "neval_jhprod",
        }
    }
}

/// Number of evaluations of each primitive since creation or the last reset.
///
/// Incremented by the dispatch layer ([`NlpModelExt`](crate::NlpModelExt)),
/// never by concrete models. Not synchronized: share a model across threads
/// only behind external locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub neval_obj: usize,
    pub neval_grad: usize,
    pub neval_cons: usize,
    pub neval_jcon: usize,
    pub neval_jgrad: usize,
    pub neval_jac: usize,
    pub neval_jprod: usize,
    pub neval_jtprod: usize,
    pub neval_hess: usize,
    pub neval_hprod: usize,
    pub neval_jhprod: usize,
}

impl Counters {
    /// Zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, counter: Counter) -> &mut usize {
        match counter {
            Counter::Obj => &mut self.neval_obj,
            Counter::Grad => &mut self.neval_grad,
            Counter::Cons => &mut self.neval_cons,
            Counter::JCon => &mut self.neval_jcon,
            Counter::JGrad => &mut self.neval_jgrad,
            Counter::Jac => &mut self.neval_jac,
            Counter::JProd => &mut self.neval_jprod,
            Counter::JtProd => &mut self.neval_jtprod,
            Counter::Hess => &mut self.neval_hess,
            Counter::HProd => &mut self.neval_hprod,
            Counter::JHProd => &mut self.neval_jhprod,
        }
    }

    pub fn get(&self, counter: Counter) -> usize {
        match counter {
            Counter::Obj => self.neval_obj,
            Counter::Grad => self.neval_grad,
            Counter::Cons => self.neval_cons,
            Counter::JCon => self.neval_jcon,
            Counter::JGrad => self.neval_jgrad,
            Counter::Jac => self.neval_jac,
            Counter::JProd => self.neval_jprod,
            Counter::JtProd => self.neval_jtprod,
            Counter::Hess => self.neval_hess,
            Counter::HProd => self.neval_hprod,
            Counter::JHProd => self.neval_jhprod,
        }
    }

    #[inline]
    pub fn increment(&mut self, counter: Counter) {
        *self.slot(counter) += 1;
    }

    /// Total over every tracked operation.
    pub fn sum(&self) -> usize {
        Counter::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Set every counter to zero.
    pub fn reset(&mut self) {
        log::trace!("resetting {} evaluation counters", Counter::ALL.len());
        for counter in Counter::ALL {
            *self.slot(counter) = 0;
        }
    }

    /// `(counter, count)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Counter, usize)> + '_ {
        Counter::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl fmt::Display for Counters {
    /// One line listing the non-zero counters, e.g. `neval_obj: 3, neval_grad: 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (counter, count) in self.iter().filter(|&(_, n)| n > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", counter.name(), count)?;
            first = false;
        }
        if first {
            write!(f, "no evaluations")?;
        }
        Ok(())
    }
}
