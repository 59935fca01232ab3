use thiserror::Error;

/// Errors returned by tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operands of a tensor-tensor operation do not share a key domain.
    ///
    /// Domains are rendered with their [`Debug`] representation, eg. `3` for a 3-element vector or
    /// `(2, 3)` for a 2x3 matrix.
    #[error("domain mismatch: left operand has domain {left}, right operand has domain {right}")]
    DomainMismatch { left: String, right: String },

    /// A reduction was asked to operate along a dimension that does not exist.
    #[error("dimension {dim} out of range (expected 1 or 2)")]
    DimensionOutOfRange { dim: usize },

    /// An argument is not valid for the requested operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

impl Error {
    pub(crate) fn domain_mismatch<D: std::fmt::Debug>(left: &D, right: &D) -> Self {
        Self::DomainMismatch {
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        }
    }
}

/// Convenience alias used throughout `numlab`.
pub type Result<T> = std::result::Result<T, Error>;
