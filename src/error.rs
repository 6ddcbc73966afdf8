use thiserror::Error;

/// Errors raised by the model evaluation interface.
///
/// There is exactly one kind: the model was asked for a capability it does
/// not provide. Callers match on it to pick an alternative strategy (for
/// example a derivative-free step when `grad_into` is missing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NlpError {
    /// The named operation is not implemented by this model.
    #[error("`{0}` is not implemented for this model")]
    NotImplemented(&'static str),
}

impl NlpError {
    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            NlpError::NotImplemented(name) => name,
        }
    }
}

/// Result alias used by every evaluation operation.
pub type Result<T> = std::result::Result<T, NlpError>;

#[inline]
pub(crate) fn not_implemented<T>(name: &'static str) -> Result<T> {
    Err(NlpError::NotImplemented(name))
}
