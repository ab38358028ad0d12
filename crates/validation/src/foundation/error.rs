//! Error types
//!
//! Two kinds of things can go wrong, and neither is a validation failure:
//!
//! - an evaluator malfunctions ([`EvaluatorFault`]), which aborts the pass;
//! - the caller misuses the API, e.g. asks for a slot that was never
//!   registered.
//!
//! Both surface as [`RuleError`]. Violated rules are reported through
//! [`ValidationFailure`](super::ValidationFailure) records instead.

use std::borrow::Cow;

/// Raised by an evaluator that could not produce a verdict.
///
/// Returning this from [`Evaluator::evaluate`](super::Evaluator::evaluate)
/// aborts the whole pass. Use
/// [`ValidationFailure::failed`](super::ValidationFailure::failed) to report
/// a violated rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvaluatorFault {
    message: Cow<'static, str>,
}

impl EvaluatorFault {
    /// Creates a fault with the given message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The fault message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by templates, sessions and results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// An evaluator failed to run. Records written earlier in the pass are kept.
    #[error("evaluator '{evaluator}' failed on slot '{slot}': {source}")]
    EvaluatorFault {
        /// Slot the evaluator was bound to.
        slot: String,
        /// Name of the failing evaluator.
        evaluator: String,
        /// The fault raised by the evaluator.
        #[source]
        source: EvaluatorFault,
    },

    /// A slot name that was never registered on the template.
    #[error("unknown error slot: {0}")]
    UnknownSlot(String),
}

impl RuleError {
    /// Wraps an evaluator fault with the slot and evaluator it came from.
    pub fn evaluator_fault(
        slot: impl Into<String>,
        evaluator: impl Into<String>,
        source: EvaluatorFault,
    ) -> Self {
        Self::EvaluatorFault {
            slot: slot.into(),
            evaluator: evaluator.into(),
            source,
        }
    }

    /// Returns `true` if this error was caused by a malfunctioning evaluator.
    #[must_use]
    pub fn is_evaluator_fault(&self) -> bool {
        matches!(self, Self::EvaluatorFault { .. })
    }
}
