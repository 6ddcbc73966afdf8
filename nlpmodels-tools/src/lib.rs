//! Collaborators built on the `nlpmodels` contract: a finite-difference
//! derivative checker and a slack reformulation of inequality constraints.

pub mod dercheck;
pub mod slack;

pub use dercheck::{
    gradient_check, hessian_check, jacobian_check, DerivativeCheckConfig, DerivativeReport,
};
pub use slack::SlackModel;
