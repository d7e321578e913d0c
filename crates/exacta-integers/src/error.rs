//! Errors raised by exact arithmetic.
//!
//! Every kernel operation that can fail reports one of these kinds
//! synchronously. Nothing is retried and no approximate value is ever
//! substituted for a failed exact one.

use thiserror::Error;

/// The error type shared by all `exacta` crates.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// A zero value was used as a divisor or inverted.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// The request has no meaning for the operands (inverting a
    /// positive-degree polynomial, parsing an unparsable string, ...).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The operands belong to different rings (different primes,
    /// different polynomial base factories).
    #[error("incompatible operands: {0}")]
    IncompatibleOperands(String),
}

impl AlgebraError {
    /// Shorthand for [`AlgebraError::DivisionByZero`].
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero(context.into())
    }

    /// Shorthand for [`AlgebraError::InvalidOperation`].
    pub fn invalid(context: impl Into<String>) -> Self {
        Self::InvalidOperation(context.into())
    }

    /// Shorthand for [`AlgebraError::IncompatibleOperands`].
    pub fn incompatible(context: impl Into<String>) -> Self {
        Self::IncompatibleOperands(context.into())
    }
}

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, AlgebraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AlgebraError::division_by_zero("tried to invert zero");
        assert_eq!(err.to_string(), "division by zero: tried to invert zero");

        let err = AlgebraError::incompatible("F7 vs F11");
        assert!(matches!(err, AlgebraError::IncompatibleOperands(_)));
    }
}
