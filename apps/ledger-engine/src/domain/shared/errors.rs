//! Domain errors for the ledger engine.

use std::fmt;

/// Domain-level errors raised by explicit validation calls.
///
/// Computation passes never return these for bad records; they exclude the
/// record instead. These surface only when a caller asks for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Ledger invariant violated.
    InvariantViolation {
        /// Aggregate type.
        aggregate: String,
        /// Invariant that was violated.
        invariant: String,
        /// Current state description.
        state: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::InvariantViolation {
                aggregate,
                invariant,
                state,
            } => {
                write!(
                    f,
                    "Invariant violation in {aggregate}: {invariant} (state: {state})"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_invalid_value_display() {
        let err = DomainError::invalid("riskPercent", "must be positive");
        let msg = format!("{err}");
        assert!(msg.contains("riskPercent"));
        assert!(msg.contains("positive"));
    }

    #[test]
    fn domain_error_invariant_display() {
        let err = DomainError::InvariantViolation {
            aggregate: "Ledger".to_string(),
            invariant: "balanceAfter = balanceBefore + pnlMoney".to_string(),
            state: "trade 7".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("balanceAfter = balanceBefore + pnlMoney"));
        assert!(msg.contains("trade 7"));
    }

    #[test]
    fn domain_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(DomainError::invalid("x", "y"));
        assert!(!err.to_string().is_empty());
    }
}
