//! Failure records
//!
//! A [`ValidationFailure`] is the outcome of a single evaluator run: a flag
//! and a human-readable message. It is a value, never an error, and is
//! owned by the [`ErrorSlot`](crate::slot::ErrorSlot) that holds it.

use serde::{Deserialize, Serialize};

/// Outcome of one evaluator run against one slot.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::foundation::ValidationFailure;
///
/// let ok = ValidationFailure::passed();
/// assert!(!ok.has_error);
///
/// let failed = ValidationFailure::failed("Field is required.");
/// assert!(failed.has_error);
/// assert_eq!(failed.error_message, "Field is required.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationFailure {
    /// Whether the evaluated rule was violated.
    pub has_error: bool,

    /// Message supplied by the evaluator. Only meaningful when `has_error` is set.
    pub error_message: String,
}

impl ValidationFailure {
    /// A record for a rule that holds.
    #[must_use]
    pub fn passed() -> Self {
        Self::default()
    }

    /// A record for a violated rule.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            has_error: true,
            error_message: message.into(),
        }
    }

    /// Builds a record from a predicate result, attaching `message` only on failure.
    #[must_use]
    pub fn check(valid: bool, message: impl Into<String>) -> Self {
        if valid {
            Self::passed()
        } else {
            Self::failed(message)
        }
    }

    /// Marks this record as failed with the given message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.has_error = true;
        self.error_message = message.into();
    }

    /// Resets this record to the passing state.
    pub fn clear(&mut self) {
        self.has_error = false;
        self.error_message.clear();
    }
}
