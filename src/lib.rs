//! A uniform evaluation contract for nonlinear programming models.
//!
//! A model describes
//!
//! ```text
//! min f(x)  subject to  lcon ≤ c(x) ≤ ucon,  lvar ≤ x ≤ uvar
//! ```
//!
//! through [`NlpModelMeta`] and implements whichever evaluation hooks of
//! [`NlpModel`] it supports. Algorithms call the operations of
//! [`NlpModelExt`] (objective, gradient, constraints, Jacobian and Hessian in
//! coordinate form, and their matrix-free products), which check shapes, count
//! every evaluation in the model's [`Counters`], and report missing
//! capabilities as [`NlpError::NotImplemented`].
//!
//! ```
//! use nlpmodels::{NlpModelExt, NlpModelMeta, SimpleModel};
//!
//! let meta = NlpModelMeta::builder(2).build();
//! let mut nlp = SimpleModel::new(meta, |x: &[f64]| x[0] * x[0] + x[1] * x[1])
//!     .with_grad(|x, g| {
//!         g[0] = 2.0 * x[0];
//!         g[1] = 2.0 * x[1];
//!     });
//!
//! let (f, g) = nlp.objgrad(&[3.0, 4.0]).unwrap();
//! assert_eq!(f, 25.0);
//! assert_eq!(g, vec![6.0, 8.0]);
//! assert_eq!(nlp.sum_counters(), 2);
//! ```

pub mod coord;
pub mod counters;
pub mod error;
pub mod meta;
pub mod model;
pub mod operator;
pub mod simple;

#[cfg(feature = "nalgebra")]
pub mod nalgebra_support;

pub use coord::{CooMatrix, SparseVector};
pub use counters::{Counter, Counters};
pub use error::{NlpError, Result};
pub use meta::{NlpModelMeta, NlpModelMetaBuilder};
pub use model::{NlpModel, NlpModelExt};
pub use operator::{BufferedOperator, HessianOperator, JacobianOperator, LinearOperator};
pub use simple::SimpleModel;
